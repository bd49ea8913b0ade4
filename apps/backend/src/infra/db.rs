use std::sync::Arc;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::adapters::{InMemorySessionStore, SeaSessionStore};
use crate::config::store::{store_url, StoreProfile};
use crate::error::AppError;
use crate::repos::sessions::SessionStore;

/// Connect to the database behind `profile`. Does NOT run migrations.
pub async fn connect_db(profile: &StoreProfile) -> Result<DatabaseConnection, AppError> {
    let url = store_url(profile)?
        .ok_or_else(|| AppError::config("memory store has no database connection"))?;

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    if matches!(profile, StoreProfile::Sqlite { path } if path == ":memory:") {
        // Every pooled connection would otherwise see its own empty database
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Single entrypoint for building the session store: connect, migrate, wrap.
pub async fn bootstrap_store(profile: &StoreProfile) -> Result<Arc<dyn SessionStore>, AppError> {
    match profile {
        StoreProfile::Memory => {
            info!(store = "memory", "using in-memory session store");
            Ok(Arc::new(InMemorySessionStore::new()))
        }
        StoreProfile::Sqlite { .. } | StoreProfile::Postgres => {
            let conn = connect_db(profile).await?;
            migration::migrate(&conn, MigrationCommand::Up).await?;
            info!(store = profile.label(), "session store connected and migrated");
            Ok(Arc::new(SeaSessionStore::new(conn)))
        }
    }
}
