//! Property tests for the command-exchange protocol (pure domain, no store).
//!
//! Contract:
//! - A filled command slot never changes
//! - Repeated commits within a round are no-ops after the first
//! - p1-first and p2-first interleavings converge to the same record
//! - `next_other_command` is empty whenever turn counters differ

use proptest::prelude::*;

use crate::domain::protocol::{commit, next_other_command};
use crate::domain::record::{GameRecord, Seat};
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::joined_record;

#[derive(Debug, Clone)]
enum Op {
    Commit(Seat, String),
    Poll(Seat),
}

fn seat_strategy() -> impl Strategy<Value = Seat> {
    prop_oneof![Just(Seat::Player1), Just(Seat::Player2)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (seat_strategy(), "\\{[a-z0-9]{1,6}\\}").prop_map(|(s, p)| Op::Commit(s, p)),
        1 => seat_strategy().prop_map(Op::Poll),
    ]
}

fn apply(record: &mut GameRecord, op: &Op) {
    match op {
        Op::Commit(seat, payload) => {
            commit(record, *seat, payload);
        }
        Op::Poll(seat) => {
            next_other_command(record, *seat);
        }
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: invariants hold and filled slots stay fixed under any call sequence.
    #[test]
    fn prop_filled_slots_are_immutable(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut record = joined_record("p1", "p2");
        for op in &ops {
            let before = record.clone();
            apply(&mut record, op);

            prop_assert!(record.check_invariants().is_ok(), "{:?}", record.check_invariants());
            for seat in [Seat::Player1, Seat::Player2] {
                for (k, old) in before.commands(seat).iter().enumerate() {
                    if k < before.turn(seat) as usize {
                        prop_assert_eq!(&record.commands(seat)[k], old);
                    }
                }
                prop_assert!(record.turn(seat) >= before.turn(seat));
                prop_assert!(record.turn(seat) <= before.turn(seat) + 1);
            }
            prop_assert!(record.current_round >= before.current_round);
        }
    }

    /// Property: once a player has committed in a round, further commits change nothing.
    #[test]
    fn prop_repeat_commit_is_idempotent(
        rounds in 0usize..5,
        first in "\\{[a-z]{1,4}\\}",
        retries in prop::collection::vec("\\{[a-z]{1,4}\\}", 1..6),
        seat in seat_strategy(),
    ) {
        let mut record = joined_record("p1", "p2");
        for r in 0..rounds {
            commit(&mut record, Seat::Player1, &format!("{{p1-{r}}}"));
            commit(&mut record, Seat::Player2, &format!("{{p2-{r}}}"));
        }

        commit(&mut record, seat, &first);
        let after_first = record.clone();
        for retry in &retries {
            let result = commit(&mut record, seat, retry);
            prop_assert!(!result.mutated);
            prop_assert_eq!(&record, &after_first);
        }
    }

    /// Property: commit order within each round does not affect the final record.
    #[test]
    fn prop_round_advance_is_order_independent(
        moves in prop::collection::vec(
            ("\\{[a-z]{1,4}\\}", "\\{[a-z]{1,4}\\}", any::<bool>()),
            1..12,
        ),
    ) {
        let mut p1_first = joined_record("p1", "p2");
        let mut mixed = joined_record("p1", "p2");

        for (m1, m2, p2_leads) in &moves {
            commit(&mut p1_first, Seat::Player1, m1);
            commit(&mut p1_first, Seat::Player2, m2);

            if *p2_leads {
                commit(&mut mixed, Seat::Player2, m2);
                commit(&mut mixed, Seat::Player1, m1);
            } else {
                commit(&mut mixed, Seat::Player1, m1);
                commit(&mut mixed, Seat::Player2, m2);
            }
        }

        prop_assert_eq!(&p1_first, &mixed);
        prop_assert_eq!(p1_first.current_round as usize, moves.len());
    }

    /// Property: nothing is revealed by the next-command poll while turns are uneven.
    #[test]
    fn prop_no_move_ahead_visibility(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut record = joined_record("p1", "p2");
        for op in &ops {
            apply(&mut record, op);
            for seat in [Seat::Player1, Seat::Player2] {
                let turns = record.turns_for(seat);
                if turns.own != turns.other {
                    prop_assert_eq!(next_other_command(&record, seat).payload, "");
                }
            }
        }
    }
}
