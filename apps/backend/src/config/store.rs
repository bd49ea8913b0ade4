use std::env;

use crate::error::AppError;

/// Which `SessionStore` backs the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProfile {
    /// Process-local map; state is lost on restart
    Memory,
    /// SQLite file, or `:memory:`
    Sqlite { path: String },
    Postgres,
}

impl StoreProfile {
    /// Read `SKIRMISH_STORE` (and friends) from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let kind = lookup("SKIRMISH_STORE").unwrap_or_else(|| "memory".to_string());
        match kind.trim().to_ascii_lowercase().as_str() {
            "memory" | "" => Ok(StoreProfile::Memory),
            "sqlite" => Ok(StoreProfile::Sqlite {
                path: lookup("SKIRMISH_SQLITE_PATH")
                    .unwrap_or_else(|| "skirmish.sqlite".to_string()),
            }),
            "postgres" => Ok(StoreProfile::Postgres),
            other => Err(AppError::config(format!(
                "SKIRMISH_STORE must be one of memory, sqlite, postgres; got '{other}'"
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoreProfile::Memory => "memory",
            StoreProfile::Sqlite { .. } => "sqlite",
            StoreProfile::Postgres => "postgres",
        }
    }
}

/// Connection URL for database-backed profiles. `None` for the memory store.
pub fn store_url(profile: &StoreProfile) -> Result<Option<String>, AppError> {
    store_url_with(profile, |name| env::var(name).ok())
}

pub fn store_url_with(
    profile: &StoreProfile,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<String>, AppError> {
    match profile {
        StoreProfile::Memory => Ok(None),
        StoreProfile::Sqlite { path } if path == ":memory:" => {
            Ok(Some("sqlite::memory:".to_string()))
        }
        StoreProfile::Sqlite { path } => Ok(Some(format!("sqlite://{path}?mode=rwc"))),
        StoreProfile::Postgres => {
            let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = lookup("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
            let db_name = must_var(&lookup, "POSTGRES_DB")?;
            let username = must_var(&lookup, "POSTGRES_USER")?;
            let password = must_var(&lookup, "POSTGRES_PASSWORD")?;
            Ok(Some(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            )))
        }
    }
}

/// Get required environment variable or return error
fn must_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}
