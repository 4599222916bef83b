use crate::ipc::error::{err, NOTIFICATION_PENDING, NOT_AVAILABLE, STORE_FAILED, UNKNOWN_ROW};
use crate::ipc::types::{AppState, Request};
use crate::session::{Notification, SessionError};
use serde_json::json;

pub fn param_str<'a>(req: &'a Request, key: &str) -> Option<&'a str> {
    req.params.get(key).and_then(|v| v.as_str())
}

/// Result payload shared by every screen transition.
pub fn transition_result(state: &AppState, notification: Option<Notification>) -> serde_json::Value {
    json!({
        "view": state.session.view(),
        "notification": notification,
    })
}

pub fn session_err(state: &mut AppState, req: &Request, e: SessionError) -> serde_json::Value {
    match e {
        SessionError::NotAvailable { .. } => err(
            &req.id,
            NOT_AVAILABLE,
            e.to_string(),
            Some(json!({ "screen": state.session.screen() })),
        ),
        SessionError::NotificationPending => err(
            &req.id,
            NOTIFICATION_PENDING,
            e.to_string(),
            Some(json!({ "notification": state.session.pending() })),
        ),
        SessionError::UnknownRow(id) => err(
            &req.id,
            UNKNOWN_ROW,
            e.to_string(),
            Some(json!({ "studentId": id })),
        ),
        SessionError::Store(e) => {
            let message = format!("{e:#}");
            tracing::error!(method = %req.method, error = %message, "store operation failed");
            state.fatal = Some(message.clone());
            err(&req.id, STORE_FAILED, message, None)
        }
    }
}
