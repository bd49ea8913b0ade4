use crate::domain::lifecycle::{
    concede, create_session, has_opponent_joined, initial_game_data, join_session,
    CreateOutcome, SessionSummary,
};
use crate::domain::protocol::commit;
use crate::domain::record::{Phase, Seat};
use crate::domain::test_state_helpers::{default_units, joined_record, units};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

#[test]
fn create_writes_fresh_joining_record() {
    let mut slot = None;
    let outcome = create_session(&mut slot, "alice", default_units()).unwrap();
    assert_eq!(outcome, CreateOutcome::Created);

    let record = slot.unwrap();
    assert_eq!(record.session_id, "alice");
    assert_eq!(record.player1_id, "alice");
    assert_eq!(record.phase, Phase::Joining);
    assert_eq!(record.player1_roster.units(), &default_units()[..]);
    assert_eq!((record.player1_turn, record.player2_turn), (0, 0));
    assert_eq!(record.current_round, 0);
}

#[test]
fn create_rejects_bad_rosters() {
    for bad in [units(&["a", "b"]), units(&["a", "b", "c", "d"])] {
        let mut slot = None;
        let err = create_session(&mut slot, "alice", bad).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::RosterSize, _)
        ));
        assert!(slot.is_none());
    }

    let mut slot = None;
    let err = create_session(&mut slot, "alice", units(&["a", "a", "b"])).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RosterDuplicates, _)
    ));
    assert!(slot.is_none());
}

#[test]
fn create_while_joining_keeps_existing_record() {
    let mut slot = None;
    create_session(&mut slot, "alice", default_units()).unwrap();
    let before = slot.clone();

    let outcome = create_session(&mut slot, "alice", units(&["x", "y", "z"])).unwrap();
    assert_eq!(outcome, CreateOutcome::AwaitingOpponent);
    assert!(!outcome.wrote_record());
    assert_eq!(slot, before);
}

#[test]
fn create_while_playing_keeps_existing_record() {
    let mut slot = Some(joined_record("alice", "bob"));
    let before = slot.clone();

    let outcome = create_session(&mut slot, "alice", default_units()).unwrap();
    assert_eq!(outcome, CreateOutcome::InProgress);
    assert_eq!(slot, before);
}

#[test]
fn create_after_end_resets_everything() {
    let mut record = joined_record("alice", "bob");
    commit(&mut record, Seat::Player1, "{a}");
    commit(&mut record, Seat::Player2, "{b}");
    concede(&mut record, "bob").unwrap();
    let mut slot = Some(record);

    let outcome = create_session(&mut slot, "alice", units(&["x", "y", "z"])).unwrap();
    assert_eq!(outcome, CreateOutcome::Created);

    let fresh = slot.unwrap();
    assert_eq!(fresh.phase, Phase::Joining);
    assert_eq!(fresh.player2_id, None);
    assert_eq!((fresh.player1_turn, fresh.player2_turn), (0, 0));
    assert_eq!(fresh.current_round, 0);
    assert_eq!(fresh.player1_commands, vec![String::new()]);
    assert_eq!(fresh.player2_commands, vec![String::new()]);
    assert!(fresh.check_invariants().is_ok());
}

#[test]
fn join_starts_play() {
    let record = joined_record("alice", "bob");
    assert_eq!(record.phase, Phase::Playing);
    assert_eq!(record.player2_id.as_deref(), Some("bob"));
    assert_eq!(record.player2_roster.units(), &default_units()[..]);
    assert!(record.check_invariants().is_ok());
}

#[test]
fn join_rejections() {
    let mut slot = None;
    create_session(&mut slot, "alice", default_units()).unwrap();
    let mut record = slot.unwrap();

    let err = join_session(&mut record, "alice", default_units()).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::SelfJoin, _)));

    let err = join_session(&mut record, "bob", units(&["a", "a", "b"])).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RosterDuplicates, _)
    ));
    assert_eq!(record.phase, Phase::Joining);
    assert_eq!(record.player2_id, None);

    join_session(&mut record, "bob", default_units()).unwrap();
    let err = join_session(&mut record, "carol", default_units()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::GameInProgress, _)
    ));

    concede(&mut record, "alice").unwrap();
    let err = join_session(&mut record, "carol", default_units()).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::GameEnded, _)));
}

#[test]
fn self_join_is_reported_before_phase() {
    let mut record = joined_record("alice", "bob");
    let err = join_session(&mut record, "alice", default_units()).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::SelfJoin, _)));
}

#[test]
fn concede_requires_participant_and_works_in_any_phase() {
    let mut slot = None;
    create_session(&mut slot, "alice", default_units()).unwrap();
    let mut record = slot.unwrap();

    assert!(matches!(
        concede(&mut record, "mallory"),
        Err(DomainError::NotParticipant(_))
    ));
    assert_eq!(record.phase, Phase::Joining);

    concede(&mut record, "alice").unwrap();
    assert_eq!(record.phase, Phase::Ended);

    // Conceding again is harmless
    concede(&mut record, "alice").unwrap();
    assert_eq!(record.phase, Phase::Ended);
}

#[test]
fn join_status_only_answers_for_the_creator_side() {
    let mut slot = None;
    create_session(&mut slot, "alice", default_units()).unwrap();
    let mut record = slot.unwrap();
    assert!(!has_opponent_joined(&record, "alice"));

    join_session(&mut record, "bob", default_units()).unwrap();
    assert!(has_opponent_joined(&record, "alice"));
    assert!(has_opponent_joined(&record, "spectator"));
    assert!(!has_opponent_joined(&record, "bob"));

    concede(&mut record, "bob").unwrap();
    assert!(!has_opponent_joined(&record, "alice"));
}

#[test]
fn initial_data_only_while_playing() {
    let mut slot = None;
    create_session(&mut slot, "alice", default_units()).unwrap();
    let mut record = slot.unwrap();

    let data = initial_game_data(&record);
    assert!(data.player1_roster.is_empty());
    assert!(data.player2_roster.is_empty());

    join_session(&mut record, "bob", units(&["x", "y", "z"])).unwrap();
    let data = initial_game_data(&record);
    assert_eq!(data.player1_roster.units(), &default_units()[..]);
    assert_eq!(data.player2_roster.units(), &units(&["x", "y", "z"])[..]);
    assert_eq!(data.current_round, 0);
}

#[test]
fn summary_omits_commands() {
    let mut record = joined_record("alice", "bob");
    commit(&mut record, Seat::Player1, "{secret}");
    let summary = SessionSummary::from(&record);
    assert_eq!(summary.player1_turn, 1);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(!json.contains("secret"));
}
