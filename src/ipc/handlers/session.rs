use crate::ipc::error::ok;
use crate::ipc::helpers::{param_str, session_err, transition_result};
use crate::ipc::types::{AppState, Request};
use crate::session::Field;

fn handle_login_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    for (key, field) in [("username", Field::Username), ("password", Field::Password)] {
        if let Some(v) = param_str(req, key) {
            if let Err(e) = state.session.set_field(field, v) {
                return session_err(state, req, e);
            }
        }
    }

    match state.session.submit_login(&state.store) {
        Ok(n) => ok(&req.id, transition_result(state, n)),
        Err(e) => session_err(state, req, e),
    }
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.logout() {
        Ok(()) => {
            tracing::info!("logged out");
            ok(&req.id, transition_result(state, None))
        }
        Err(e) => session_err(state, req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "login.submit" => Some(handle_login_submit(state, req)),
        "session.logout" => Some(handle_logout(state, req)),
        _ => None,
    }
}
