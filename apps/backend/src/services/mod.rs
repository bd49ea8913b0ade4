pub mod session_locks;
pub mod turn_engine;

pub use session_locks::SessionLocks;
pub use turn_engine::{CreatedSession, TurnEngine};
