//! SeaORM adapter for the session repository.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, Set};
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::domain::record::{GameRecord, Phase};
use crate::domain::roster::Roster;
use crate::entities::game_sessions;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::sessions::SessionStore;

/// Relational store (Postgres or SQLite) for session records.
#[derive(Debug, Clone)]
pub struct SeaSessionStore {
    conn: DatabaseConnection,
}

impl SeaSessionStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl SessionStore for SeaSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<GameRecord>, DomainError> {
        let model = game_sessions::Entity::find_by_id(session_id.to_string())
            .one(&self.conn)
            .await?;

        model.map(record_from_model).transpose()
    }

    async fn upsert(&self, record: &GameRecord) -> Result<(), DomainError> {
        let now = OffsetDateTime::now_utc();
        let active = active_from_record(record, now)?;

        game_sessions::Entity::insert(active)
            .on_conflict(
                OnConflict::column(game_sessions::Column::SessionId)
                    .update_columns(conflict_columns(record.phase))
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        debug!(session_id = %record.session_id, phase = record.phase.as_str(), "session upserted");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        match self.conn.get_database_backend() {
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::Sqlite => "sqlite",
            _ => "mysql",
        }
    }
}

/// Columns overwritten when the row exists. A `Joining` write only happens
/// on create, so it also restarts `created_at` for a replaced ended game.
fn conflict_columns(phase: Phase) -> Vec<game_sessions::Column> {
    use game_sessions::Column;

    let mut columns = vec![
        Column::Phase,
        Column::Player1Id,
        Column::Player2Id,
        Column::Player1Roster,
        Column::Player2Roster,
        Column::Player1Turn,
        Column::Player2Turn,
        Column::CurrentRound,
        Column::Player1Commands,
        Column::Player2Commands,
        Column::UpdatedAt,
    ];
    if phase == Phase::Joining {
        columns.push(Column::CreatedAt);
    }
    columns
}

fn active_from_record(
    record: &GameRecord,
    now: OffsetDateTime,
) -> Result<game_sessions::ActiveModel, DomainError> {
    let id = record.session_id.as_str();
    Ok(game_sessions::ActiveModel {
        session_id: Set(record.session_id.clone()),
        phase: Set(record.phase.as_str().to_string()),
        player1_id: Set(record.player1_id.clone()),
        player2_id: Set(record.player2_id.clone().unwrap_or_default()),
        player1_roster: Set(serde_json::json!(record.player1_roster.units())),
        player2_roster: Set(serde_json::json!(record.player2_roster.units())),
        player1_turn: Set(column_counter(id, "player1_turn", record.player1_turn)?),
        player2_turn: Set(column_counter(id, "player2_turn", record.player2_turn)?),
        current_round: Set(column_counter(id, "current_round", record.current_round)?),
        player1_commands: Set(serde_json::json!(record.player1_commands)),
        player2_commands: Set(serde_json::json!(record.player2_commands)),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

fn column_counter(session_id: &str, column: &str, value: u32) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        error!(session_id, column, value, "counter exceeds column range");
        DomainError::infra(
            InfraErrorKind::Other("counter_overflow".to_string()),
            format!("session {session_id}: {column} {value} does not fit the store"),
        )
    })
}

fn corrupt(session_id: &str, detail: impl std::fmt::Display) -> DomainError {
    error!(session_id, %detail, "stored session record is unreadable");
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("session {session_id}: {detail}"),
    )
}

fn strings(session_id: &str, column: &str, value: serde_json::Value) -> Result<Vec<String>, DomainError> {
    serde_json::from_value(value).map_err(|e| corrupt(session_id, format!("{column}: {e}")))
}

fn counter(session_id: &str, column: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| corrupt(session_id, format!("{column} is negative: {value}")))
}

fn record_from_model(model: game_sessions::Model) -> Result<GameRecord, DomainError> {
    let id = model.session_id.as_str();
    let phase = Phase::parse(&model.phase)
        .ok_or_else(|| corrupt(id, format!("unknown phase {}", model.phase)))?;

    let record = GameRecord {
        session_id: model.session_id.clone(),
        phase,
        player1_id: model.player1_id.clone(),
        player2_id: Some(model.player2_id.clone()).filter(|p| !p.is_empty()),
        player1_roster: Roster::from_stored(strings(id, "player1_roster", model.player1_roster)?),
        player2_roster: Roster::from_stored(strings(id, "player2_roster", model.player2_roster)?),
        player1_turn: counter(id, "player1_turn", model.player1_turn)?,
        player2_turn: counter(id, "player2_turn", model.player2_turn)?,
        current_round: counter(id, "current_round", model.current_round)?,
        player1_commands: strings(id, "player1_commands", model.player1_commands)?,
        player2_commands: strings(id, "player2_commands", model.player2_commands)?,
    };

    record.check_invariants().map_err(|e| corrupt(id, e))?;
    Ok(record)
}
