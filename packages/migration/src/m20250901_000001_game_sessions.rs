use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum GameSessions {
    Table,
    SessionId,
    Phase,
    Player1Id,
    Player2Id,
    Player1Roster,
    Player2Roster,
    Player1Turn,
    Player2Turn,
    CurrentRound,
    Player1Commands,
    Player2Commands,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // game_sessions: one row per session id, rewritten wholesale on upsert
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::SessionId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameSessions::Phase).string().not_null())
                    .col(
                        ColumnDef::new(GameSessions::Player1Id)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(GameSessions::Player2Id)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(GameSessions::Player1Roster).json().not_null())
                    .col(ColumnDef::new(GameSessions::Player2Roster).json().not_null())
                    .col(
                        ColumnDef::new(GameSessions::Player1Turn)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::Player2Turn)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CurrentRound)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::Player1Commands)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::Player2Commands)
                            .json()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup by second player (join status / participation queries)
        manager
            .create_index(
                Index::create()
                    .name("ix_game_sessions_player2_id")
                    .table(GameSessions::Table)
                    .col(GameSessions::Player2Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_game_sessions_player2_id")
                    .table(GameSessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await?;

        Ok(())
    }
}
