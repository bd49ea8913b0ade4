//! Domain layer: pure session state and turn-protocol logic.

pub mod lifecycle;
pub mod protocol;
pub mod record;
pub mod roster;

#[cfg(test)]
mod tests_lifecycle;
#[cfg(test)]
mod tests_props_protocol;

// Re-exports for ergonomics
pub use lifecycle::{CreateOutcome, InitialGameData, SessionSummary};
pub use protocol::{CommandHistory, CommitResult, TurnCommand};
pub use record::{GameRecord, Phase, Seat, TurnPair};
pub use roster::{Roster, ROSTER_SIZE};
