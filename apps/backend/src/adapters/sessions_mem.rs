//! In-memory session store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::record::GameRecord;
use crate::errors::domain::DomainError;
use crate::repos::sessions::SessionStore;

/// Process-local store backed by a concurrent map.
///
/// Records are cloned in and out, so callers never share mutable state with
/// the store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: DashMap<String, GameRecord>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<GameRecord>, DomainError> {
        Ok(self.records.get(session_id).map(|r| r.value().clone()))
    }

    async fn upsert(&self, record: &GameRecord) -> Result<(), DomainError> {
        self.records
            .insert(record.session_id.clone(), record.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
