//! Storage adapters implementing the repository traits.

pub mod sessions_mem;
pub mod sessions_sea;

pub use sessions_mem::InMemorySessionStore;
pub use sessions_sea::SeaSessionStore;
