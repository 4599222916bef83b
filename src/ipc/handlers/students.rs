use crate::ipc::error::{bad_params, ok};
use crate::ipc::helpers::{param_str, session_err, transition_result};
use crate::ipc::types::{AppState, Request};
use crate::session::Field;
use serde_json::json;

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    for (key, field) in [
        ("name", Field::Name),
        ("age", Field::Age),
        ("class", Field::Class),
    ] {
        if let Some(v) = param_str(req, key) {
            if let Err(e) = state.session.set_field(field, v) {
                return session_err(state, req, e);
            }
        }
    }

    match state.session.submit_add(&state.store) {
        Ok((student, n)) => {
            let mut result = transition_result(state, n);
            result["student"] = json!(student);
            ok(&req.id, result)
        }
        Err(e) => session_err(state, req, e),
    }
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.refresh(&state.store) {
        Ok(()) => ok(&req.id, json!({ "students": state.session.rows() })),
        Err(e) => session_err(state, req, e),
    }
}

fn handle_students_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match req.params.get("studentId") {
        None => return bad_params(&req.id, "missing studentId"),
        Some(v) if v.is_null() => None,
        Some(v) => match v.as_i64() {
            Some(id) => Some(id),
            None => return bad_params(&req.id, "studentId must be an integer or null"),
        },
    };

    match state.session.select(id) {
        Ok(()) => ok(&req.id, transition_result(state, None)),
        Err(e) => session_err(state, req, e),
    }
}

fn handle_students_delete_selected(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.submit_delete(&state.store) {
        Ok(n) => ok(&req.id, transition_result(state, n)),
        Err(e) => session_err(state, req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.add" => Some(handle_students_add(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        "students.select" => Some(handle_students_select(state, req)),
        "students.deleteSelected" => Some(handle_students_delete_selected(state, req)),
        _ => None,
    }
}
