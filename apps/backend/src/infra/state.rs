use std::sync::Arc;

use crate::config::store::StoreProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_store;
use crate::repos::sessions::SessionStore;
use crate::services::turn_engine::TurnEngine;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    profile: StoreProfile,
    store: Option<Arc<dyn SessionStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            profile: StoreProfile::Memory,
            store: None,
        }
    }

    pub fn with_store(mut self, profile: StoreProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Use an already-built store instead of bootstrapping one.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let store = match self.store {
            Some(store) => store,
            None => bootstrap_store(&self.profile).await?,
        };
        Ok(AppState::new(TurnEngine::new(store)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
