//! Canvas 2D implementation of the drawing surface.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::geometry::SURFACE;
use crate::render::{StoneStyle, Surface};

const GRID_COLOR: &str = "#666";
const BLACK: &str = "#000";
const WHITE: &str = "#fff";
const OUTLINE_WIDTH: f64 = 2.0;
const TAU: f64 = 2.0 * std::f64::consts::PI;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, SURFACE, SURFACE);
    }

    fn grid_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.set_stroke_style_str(GRID_COLOR);
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }

    fn stone(&mut self, cx: f64, cy: f64, radius: f64, style: StoneStyle) {
        self.ctx.begin_path();
        // arc() only fails on a negative radius.
        let _ = self.ctx.arc(cx, cy, radius, 0.0, TAU);

        match style {
            StoneStyle::Solid => {
                self.ctx.set_fill_style_str(BLACK);
                self.ctx.fill();
            }
            StoneStyle::Outlined => {
                self.ctx.set_fill_style_str(WHITE);
                self.ctx.fill();
                self.ctx.set_line_width(OUTLINE_WIDTH);
                self.ctx.set_stroke_style_str(BLACK);
                self.ctx.stroke();
            }
        }
    }
}
