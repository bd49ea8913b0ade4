use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "session_id")]
    pub session_id: String,
    /// `JOINING` | `PLAYING` | `ENDED`
    pub phase: String,
    #[sea_orm(column_name = "player1_id")]
    pub player1_id: String,
    /// Empty until the second player joins.
    #[sea_orm(column_name = "player2_id")]
    pub player2_id: String,
    #[sea_orm(column_name = "player1_roster", column_type = "Json")]
    pub player1_roster: Json,
    #[sea_orm(column_name = "player2_roster", column_type = "Json")]
    pub player2_roster: Json,
    #[sea_orm(column_name = "player1_turn")]
    pub player1_turn: i32,
    #[sea_orm(column_name = "player2_turn")]
    pub player2_turn: i32,
    #[sea_orm(column_name = "current_round")]
    pub current_round: i32,
    #[sea_orm(column_name = "player1_commands", column_type = "Json")]
    pub player1_commands: Json,
    #[sea_orm(column_name = "player2_commands", column_type = "Json")]
    pub player2_commands: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
