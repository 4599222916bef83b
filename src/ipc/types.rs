use crate::db::Store;
use crate::session::Session;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: Store,
    pub session: Session,
    /// Set once a store operation has failed; the main loop exits after
    /// reporting it.
    pub fatal: Option<String>,
}

impl AppState {
    pub fn new(store: Store) -> AppState {
        AppState {
            store,
            session: Session::default(),
            fatal: None,
        }
    }
}
