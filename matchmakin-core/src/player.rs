//! Player identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::roster::RosterError;

/// Number of opponents tracked in a lobby
pub const ROSTER_SIZE: usize = 7;

/// Player identifier in the closed range 1..=ROSTER_SIZE
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// Validate a raw id
    pub fn new(raw: u8) -> Result<Self, RosterError> {
        if (1..=ROSTER_SIZE as u8).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(RosterError::UnknownPlayer(raw))
        }
    }

    /// Every id in roster order (1, 2, ..., 7)
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (1..=ROSTER_SIZE as u8).map(PlayerId)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot in name tables
    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = RosterError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
