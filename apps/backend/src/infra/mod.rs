//! Infrastructure layer - store bootstrap and state assembly.

pub mod db;
pub mod state;
