use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::{err, NOT_IMPLEMENTED};

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    tracing::debug!(id = %req.id, method = %req.method, "request");

    if let Some(resp) = handlers::core::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::session::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::students::try_handle(state, &req) {
        return resp;
    }

    err(
        &req.id,
        NOT_IMPLEMENTED,
        format!("unknown method: {}", req.method),
        None,
    )
}
