use serde_json::json;

pub const BAD_PARAMS: &str = "bad_params";
pub const NOT_IMPLEMENTED: &str = "not_implemented";
pub const NOT_AVAILABLE: &str = "not_available";
pub const NOTIFICATION_PENDING: &str = "notification_pending";
pub const UNKNOWN_ROW: &str = "unknown_row";
pub const STORE_FAILED: &str = "store_failed";

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({ "id": id, "ok": true, "result": result })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({ "code": code, "message": message.into() });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({ "id": id, "ok": false, "error": error })
}

pub fn bad_params(id: &str, message: impl Into<String>) -> serde_json::Value {
    err(id, BAD_PARAMS, message, None)
}
