//! Session and turn-protocol endpoints under `/api/sessions`.
//!
//! Every handler requires a `CallerId`; the engine decides what that caller
//! may see or change.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::lifecycle::{CreateOutcome, InitialGameData, SessionSummary};
use crate::domain::protocol::{CommandHistory, TurnCommand};
use crate::domain::record::Phase;
use crate::error::AppError;
use crate::extractors::{CallerId, RoundIndex, SessionKey, ValidatedJson};
use crate::services::turn_engine::CreatedSession;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RosterRequest {
    pub roster: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub payload: String,
}

#[derive(Debug, Serialize)]
struct PhaseResponse {
    phase: Phase,
}

#[derive(Debug, Serialize)]
struct JoinedResponse {
    joined: bool,
}

#[derive(Debug, Serialize)]
struct InProgressResponse {
    in_progress: bool,
}

async fn create_session(
    caller: CallerId,
    body: ValidatedJson<RosterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let created: CreatedSession = app_state
        .engine
        .create_session(caller.as_str(), body.into_inner().roster)
        .await?;

    let mut response = match created.outcome {
        CreateOutcome::Created => HttpResponse::Created(),
        _ => HttpResponse::Ok(),
    };
    Ok(response.json(created))
}

async fn get_session(
    _caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSummary>, AppError> {
    let summary = app_state.engine.get_session(session.as_str()).await?;
    Ok(web::Json(summary))
}

async fn join_session(
    caller: CallerId,
    session: SessionKey,
    body: ValidatedJson<RosterRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionSummary>, AppError> {
    let summary = app_state
        .engine
        .join_session(session.as_str(), caller.as_str(), body.into_inner().roster)
        .await?;
    Ok(web::Json(summary))
}

async fn concede(
    caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .engine
        .concede(session.as_str(), caller.as_str())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn query_phase(
    _caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PhaseResponse>, AppError> {
    let phase = app_state.engine.query_phase(session.as_str()).await?;
    Ok(web::Json(PhaseResponse { phase }))
}

async fn query_join_status(
    caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<JoinedResponse>, AppError> {
    let joined = app_state
        .engine
        .query_join_status(session.as_str(), caller.as_str())
        .await?;
    Ok(web::Json(JoinedResponse { joined }))
}

async fn query_in_progress(
    _caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<InProgressResponse>, AppError> {
    let in_progress = app_state.engine.query_in_progress(session.as_str()).await?;
    Ok(web::Json(InProgressResponse { in_progress }))
}

async fn initial_game_data(
    _caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<InitialGameData>, AppError> {
    let data = app_state.engine.initial_game_data(session.as_str()).await?;
    Ok(web::Json(data))
}

async fn commit_command(
    caller: CallerId,
    session: SessionKey,
    body: ValidatedJson<CommitRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TurnCommand>, AppError> {
    let response = app_state
        .engine
        .commit_command(session.as_str(), caller.as_str(), &body.payload)
        .await?;
    Ok(web::Json(response))
}

async fn all_commands(
    caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CommandHistory>, AppError> {
    let history = app_state
        .engine
        .all_commands(session.as_str(), caller.as_str())
        .await?;
    Ok(web::Json(history))
}

async fn other_player_next_command(
    caller: CallerId,
    session: SessionKey,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TurnCommand>, AppError> {
    let response = app_state
        .engine
        .other_player_next_command(session.as_str(), caller.as_str())
        .await?;
    Ok(web::Json(response))
}

async fn other_player_command(
    caller: CallerId,
    session: SessionKey,
    round: RoundIndex,
    app_state: web::Data<AppState>,
) -> Result<web::Json<TurnCommand>, AppError> {
    let response = app_state
        .engine
        .other_player_command(session.as_str(), caller.as_str(), round.0)
        .await?;
    if !response.has_payload() {
        debug!(session_id = %session.as_str(), round = round.0, "opponent command not yet visible");
    }
    Ok(web::Json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_session)))
        .service(web::resource("/{session_id}").route(web::get().to(get_session)))
        .service(web::resource("/{session_id}/join").route(web::post().to(join_session)))
        .service(web::resource("/{session_id}/concede").route(web::post().to(concede)))
        .service(web::resource("/{session_id}/phase").route(web::get().to(query_phase)))
        .service(web::resource("/{session_id}/joined").route(web::get().to(query_join_status)))
        .service(
            web::resource("/{session_id}/in-progress").route(web::get().to(query_in_progress)),
        )
        .service(web::resource("/{session_id}/initial").route(web::get().to(initial_game_data)))
        .service(
            web::resource("/{session_id}/commands")
                .route(web::post().to(commit_command))
                .route(web::get().to(all_commands)),
        )
        // Must precede `{round}` so "next" is not parsed as a round index
        .service(
            web::resource("/{session_id}/commands/next")
                .route(web::get().to(other_player_next_command)),
        )
        .service(
            web::resource("/{session_id}/commands/{round}")
                .route(web::get().to(other_player_command)),
        );
}
