//! Session repository contract.

use async_trait::async_trait;

use crate::domain::record::GameRecord;
use crate::errors::domain::DomainError;

/// Key-value storage for session records.
///
/// Implementations must make `upsert` atomic per key. Absence is reported as
/// `Ok(None)`, never as an error or a placeholder record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<GameRecord>, DomainError>;

    async fn upsert(&self, record: &GameRecord) -> Result<(), DomainError>;

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}
