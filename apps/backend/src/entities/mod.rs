//! SeaORM entities.

pub mod game_sessions;
