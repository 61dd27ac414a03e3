use wasm_bindgen::prelude::*;

pub mod board;
pub mod geometry;
pub mod identity;
pub mod protocol;
pub mod render;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod net;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    app::boot()
}
