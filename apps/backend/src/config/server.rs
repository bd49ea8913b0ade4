use std::env;

use crate::error::AppError;

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl HttpConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("SKIRMISH_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("SKIRMISH_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("SKIRMISH_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => 3001,
        };
        Ok(Self { host, port })
    }
}
