//! Browser wiring: DOM lookup, event handlers, and the 1s sync loop.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, UrlSearchParams, Window};

use crate::canvas::CanvasSurface;
use crate::geometry::map_click;
use crate::identity::{self, LocalStorage};
use crate::net;
use crate::protocol::{MoveRequest, Snapshot, share_url};
use crate::render::draw_board;
use crate::session::{Session, room_info_html};

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

const POLL_INTERVAL_MS: u32 = 1_000;

struct App {
    window: Window,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    info: HtmlElement,
    room_info: HtmlElement,
    session: Session,
    /// Held so the sync loop dies with the app. It is not cancelled when
    /// the game finishes; polling continues past the last move.
    poll_timer: Option<Interval>,
}

type Shared = Rc<RefCell<App>>;

pub fn boot() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = element(&document, "board")?;
    let create_btn: HtmlElement = element(&document, "createBtn")?;
    let info: HtmlElement = element(&document, "info")?;
    let room_info: HtmlElement = element(&document, "roomInfo")?;

    let mut storage = LocalStorage::from_window(&window);
    let identity = identity::get_or_create(&mut storage);

    let surface = CanvasSurface::new(&canvas)?;
    let app: Shared = Rc::new(RefCell::new(App {
        window: window.clone(),
        canvas: canvas.clone(),
        surface,
        info,
        room_info,
        session: Session::new(identity),
        poll_timer: None,
    }));

    attach_create_button(&create_btn, app.clone());
    attach_board_click(&canvas, app.clone());

    if let Some(room_id) = room_from_url(&window) {
        enter_room(app, &room_id);
    }

    Ok(())
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

fn room_from_url(window: &Window) -> Option<String> {
    let search = window.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get("room")
}

fn attach_create_button(button: &HtmlElement, app: Shared) {
    let handler = Closure::wrap(Box::new(move || {
        let app = app.clone();
        spawn_local(async move {
            let window = app.borrow().window.clone();
            match net::create_room(&window).await {
                Ok(created) => on_room_created(app, created.room_id),
                Err(err) => console_log!("create_room failed: {err}"),
            }
        });
    }) as Box<dyn FnMut()>);

    button.set_onclick(Some(handler.as_ref().unchecked_ref()));
    handler.forget();
}

/// Rewrites the address bar to the shareable `/?room=<id>` form and shows
/// the room id + link, then joins like any launch-URL visitor would.
fn on_room_created(app: Shared, room_id: String) {
    {
        let state = app.borrow();

        if let Ok(history) = state.window.history() {
            let _ = history.replace_state_with_url(
                &JsValue::NULL,
                "",
                Some(&format!("/?room={room_id}")),
            );
        }

        let origin = state.window.location().origin().unwrap_or_default();
        let link = share_url(&origin, &room_id);
        state.room_info.set_inner_html(&room_info_html(&room_id, &link));
    }

    enter_room(app, &room_id);
}

/// Binds the room, joins it, and starts the sync loop on success.
fn enter_room(app: Shared, room_id: &str) {
    if let Err(err) = app.borrow_mut().session.bind_room(room_id) {
        console_log!("room bind rejected: {err}");
        return;
    }

    let room_id = room_id.to_string();
    spawn_local(async move {
        let (window, identity) = {
            let state = app.borrow();
            (state.window.clone(), state.session.identity().to_string())
        };

        match net::join_room(&window, &room_id, &identity).await {
            Ok(joined) => {
                app.borrow_mut().session.joined(joined.role);
                start_sync_loop(app);
            }
            Err(err) => console_log!("join_room failed: {err}"),
        }
    });
}

fn start_sync_loop(app: Shared) {
    // First poll fires immediately, not one interval late.
    poll_once(app.clone());

    let tick_app = app.clone();
    let timer = Interval::new(POLL_INTERVAL_MS, move || poll_once(tick_app.clone()));
    app.borrow_mut().poll_timer = Some(timer);
}

fn poll_once(app: Shared) {
    let (window, room_id, seq) = {
        let mut state = app.borrow_mut();
        let Some(room_id) = state.session.room_id().map(str::to_string) else {
            return;
        };
        let seq = state.session.next_poll_seq();
        (state.window.clone(), room_id, seq)
    };

    spawn_local(async move {
        match net::fetch_state(&window, &room_id).await {
            Ok(raw) => match Snapshot::from_response(&raw) {
                Ok(snapshot) => apply_frame(&app, seq, &snapshot),
                Err(err) => console_log!("state frame rejected: {err}"),
            },
            Err(err) => console_log!("poll failed: {err}"),
        }
    });
}

fn apply_frame(app: &Shared, seq: u64, snapshot: &Snapshot) {
    let mut state = app.borrow_mut();

    let Some(status) = state.session.apply(seq, snapshot) else {
        // Stale frame; keep the current render.
        return;
    };

    draw_board(&mut state.surface, &snapshot.board);
    state.info.set_inner_text(&status);
}

fn attach_board_click(canvas: &HtmlCanvasElement, app: Shared) {
    let click_app = app;
    let handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        let (window, room_id, identity, col, row) = {
            let state = click_app.borrow();
            if !state.session.may_move() {
                return;
            }

            let rect = state.canvas.get_bounding_client_rect();
            let Some((col, row)) = map_click(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                rect.left(),
                rect.top(),
            ) else {
                return;
            };

            let Some(room_id) = state.session.room_id().map(str::to_string) else {
                return;
            };
            (
                state.window.clone(),
                room_id,
                state.session.identity().to_string(),
                col,
                row,
            )
        };

        // The board is never mutated locally; the next poll shows the move.
        spawn_local(async move {
            let request = MoveRequest {
                room_id: &room_id,
                player_id: &identity,
                x: col,
                y: row,
            };
            if let Err(err) = net::submit_move(&window, &request).await {
                console_log!("move not accepted: {err}");
            }
        });
    }) as Box<dyn FnMut(MouseEvent)>);

    canvas.set_onclick(Some(handler.as_ref().unchecked_ref()));
    handler.forget();
}
