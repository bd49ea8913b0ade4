pub mod server;
pub mod store;

pub use server::HttpConfig;
pub use store::StoreProfile;
