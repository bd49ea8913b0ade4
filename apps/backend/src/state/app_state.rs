use std::sync::Arc;

use crate::services::turn_engine::TurnEngine;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TurnEngine>,
}

impl AppState {
    pub fn new(engine: TurnEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn store_backend(&self) -> &'static str {
        self.engine.store_backend()
    }
}
