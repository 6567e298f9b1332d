use crate::models::AppData;
use std::collections::HashMap;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    /// Bearer token -> owning user. In-memory only; restarting the server
    /// invalidates every session.
    pub sessions: Arc<Mutex<HashMap<Uuid, Uuid>>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
