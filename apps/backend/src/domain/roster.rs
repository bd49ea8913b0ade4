//! Unit rosters chosen at create/join time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Number of units every player fields.
pub const ROSTER_SIZE: usize = 3;

/// Ordered selection of unit-type tokens.
///
/// A roster obtained through [`Roster::parse`] always holds exactly
/// [`ROSTER_SIZE`] pairwise-distinct tokens. The only other roster that
/// exists is [`Roster::empty`], standing in for a player who has not
/// joined yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Validate a caller-supplied roster.
    ///
    /// Count is checked before uniqueness, so `[A, A]` reports a size error.
    pub fn parse(units: Vec<String>) -> Result<Self, DomainError> {
        if units.len() != ROSTER_SIZE {
            return Err(DomainError::validation(
                ValidationKind::RosterSize,
                format!("Must pass exactly {ROSTER_SIZE} units, got {}", units.len()),
            ));
        }

        let mut seen = HashSet::with_capacity(ROSTER_SIZE);
        if let Some(dup) = units.iter().find(|u| !seen.insert(u.as_str())) {
            return Err(DomainError::validation(
                ValidationKind::RosterDuplicates,
                format!("Must have {ROSTER_SIZE} unique units, '{dup}' repeats"),
            ));
        }

        Ok(Self(units))
    }

    /// Rebuild a roster read back from storage without re-validating it.
    pub(crate) fn from_stored(units: Vec<String>) -> Self {
        Self(units)
    }

    pub fn units(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this roster would pass [`Roster::parse`].
    pub fn is_valid(&self) -> bool {
        Self::parse(self.0.clone()).is_ok()
    }
}
