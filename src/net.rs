//! HTTP calls to the room authority, over the browser fetch API.

use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, Response, Window};

use crate::protocol::{
    CreateRoomResponse, JoinRequest, JoinResponse, MoveRequest, StateResponse,
};

/// A failed call. Whatever the variant, the policy is the same: skip the
/// frame, keep the last render, and wait for the next tick.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("http status {0}")]
    Status(u16),
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("decode: {0}")]
    Decode(String),
}

impl From<JsValue> for NetError {
    fn from(err: JsValue) -> Self {
        Self::Transport(format!("{err:?}"))
    }
}

pub async fn create_room(window: &Window) -> Result<CreateRoomResponse, NetError> {
    let response = post_json(window, "/create_room", None).await?;
    decode(response).await
}

pub async fn join_room(
    window: &Window,
    room_id: &str,
    player_id: &str,
) -> Result<JoinResponse, NetError> {
    let body = serde_json::to_string(&JoinRequest { room_id, player_id })?;
    let response = post_json(window, "/join_room", Some(body)).await?;
    decode(response).await
}

/// The move response body is not consumed; the next poll reflects the
/// effect. Only transport and HTTP status failures are reported.
pub async fn submit_move(window: &Window, request: &MoveRequest<'_>) -> Result<(), NetError> {
    let body = serde_json::to_string(request)?;
    let response = post_json(window, "/move", Some(body)).await?;
    check_status(&response)
}

pub async fn fetch_state(window: &Window, room_id: &str) -> Result<StateResponse, NetError> {
    let promise = window.fetch_with_str(&format!("/state/{room_id}"));
    let response: Response = JsFuture::from(promise).await?.dyn_into()?;
    decode(response).await
}

async fn post_json(
    window: &Window,
    url: &str,
    body: Option<String>,
) -> Result<Response, NetError> {
    let init = RequestInit::new();
    init.set_method("POST");

    if let Some(body) = body {
        let headers = Headers::new()?;
        headers.set("Content-Type", "application/json")?;
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
    }

    let promise = window.fetch_with_str_and_init(url, &init);
    let response: Response = JsFuture::from(promise).await?.dyn_into()?;
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, NetError> {
    check_status(&response)?;
    let value = JsFuture::from(response.json()?).await?;
    serde_wasm_bindgen::from_value(value).map_err(|err| NetError::Decode(err.to_string()))
}

fn check_status(response: &Response) -> Result<(), NetError> {
    if response.ok() {
        Ok(())
    } else {
        Err(NetError::Status(response.status()))
    }
}
