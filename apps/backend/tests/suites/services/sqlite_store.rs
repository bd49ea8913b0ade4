use skirmish_backend::domain::{CreateOutcome, Phase};
use skirmish_backend::errors::ErrorCode;

use crate::common::default_units;
use crate::support::engines::sqlite_engine;

#[tokio::test]
async fn full_match_persists_through_sqlite() {
    let engine = sqlite_engine().await;
    assert_eq!(engine.store_backend(), "sqlite");

    let created = engine.create_session("p1", default_units()).await.unwrap();
    assert_eq!(created.outcome, CreateOutcome::Created);
    engine.join_session("p1", "p2", default_units()).await.unwrap();

    for round in 0..3u32 {
        engine
            .commit_command("p1", "p1", &format!("{{\"p1\":{round}}}"))
            .await
            .unwrap();
        let synced = engine
            .commit_command("p1", "p2", &format!("{{\"p2\":{round}}}"))
            .await
            .unwrap();
        assert_eq!(synced.current_round, round + 1);
        assert_eq!(synced.payload, format!("{{\"p1\":{round}}}"));
    }

    let history = engine.all_commands("p1", "spectator").await.unwrap();
    assert_eq!(history.player1.len(), 3);
    assert_eq!(history.player2[2], "{\"p2\":2}");

    engine.concede("p1", "p2").await.unwrap();
    assert_eq!(engine.query_phase("p1").await.unwrap(), Phase::Ended);
}

#[tokio::test]
async fn sqlite_reports_missing_sessions() {
    let engine = sqlite_engine().await;
    let err = engine.query_phase("nobody").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::SessionNotFound);
    assert!(!engine.query_join_status("nobody", "p1").await.unwrap());
}
