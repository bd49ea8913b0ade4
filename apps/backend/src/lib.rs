#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod request_ctx;
pub mod routes;
pub mod services;
pub mod state;


// Re-exports for public API
pub use adapters::{InMemorySessionStore, SeaSessionStore};
pub use config::{HttpConfig, StoreProfile};
pub use error::AppError;
pub use extractors::{CallerId, SessionKey};
pub use infra::db::{bootstrap_store, connect_db};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use repos::SessionStore;
pub use services::TurnEngine;
pub use state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
