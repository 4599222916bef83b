use crate::ipc::error::{bad_params, err, ok, BAD_PARAMS};
use crate::ipc::helpers::{param_str, session_err, transition_result};
use crate::ipc::types::{AppState, Request};
use crate::session::Field;
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "dbPath": state.store.path().map(|p| p.to_string_lossy().to_string()),
            "screen": state.session.screen(),
        }),
    )
}

fn handle_view_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "view": state.session.view() }))
}

fn handle_form_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(name) = param_str(req, "field") else {
        return bad_params(&req.id, "missing field");
    };
    let Some(field) = Field::parse(name) else {
        return err(
            &req.id,
            BAD_PARAMS,
            format!("unknown field: {name}"),
            Some(json!({ "field": name })),
        );
    };
    let Some(value) = param_str(req, "value") else {
        return bad_params(&req.id, "missing value");
    };

    match state.session.set_field(field, value) {
        Ok(()) => ok(&req.id, transition_result(state, None)),
        Err(e) => session_err(state, req, e),
    }
}

fn handle_notification_dismiss(state: &mut AppState, req: &Request) -> serde_json::Value {
    let dismissed = state.session.dismiss();
    ok(
        &req.id,
        json!({
            "dismissed": dismissed,
            "view": state.session.view(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "view.get" => Some(handle_view_get(state, req)),
        "form.set" => Some(handle_form_set(state, req)),
        "notification.dismiss" => Some(handle_notification_dismiss(state, req)),
        _ => None,
    }
}
