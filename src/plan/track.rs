//! Execution lanes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of tracks every step has a slot for.
pub const TRACK_COUNT: usize = 3;

/// An execution environment that may take part in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    /// The user's own machine.
    Local,
    /// The trusted execution environment.
    Enclave,
    /// The chain.
    Ledger,
}

impl Track {
    /// All tracks in slot order.
    pub const ALL: [Track; TRACK_COUNT] = [Track::Local, Track::Enclave, Track::Ledger];

    /// Slot index of this track.
    pub fn index(self) -> usize {
        match self {
            Track::Local => 0,
            Track::Enclave => 1,
            Track::Ledger => 2,
        }
    }

    /// Track for a slot index.
    pub fn from_index(index: usize) -> Option<Track> {
        Self::ALL.get(index).copied()
    }

    /// Column title used in progress tables.
    pub fn title(self) -> &'static str {
        match self {
            Track::Local => "Local",
            Track::Enclave => "TEE",
            Track::Ledger => "On-chain",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Track::Local => "local",
            Track::Enclave => "enclave",
            Track::Ledger => "ledger",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for track in Track::ALL {
            assert_eq!(Track::from_index(track.index()), Some(track));
        }
    }

    #[test]
    fn from_index_out_of_range() {
        assert_eq!(Track::from_index(TRACK_COUNT), None);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Track::Enclave.to_string(), "enclave");
        assert_eq!(Track::Ledger.to_string(), "ledger");
    }

    #[test]
    fn titles() {
        assert_eq!(Track::Local.title(), "Local");
        assert_eq!(Track::Enclave.title(), "TEE");
        assert_eq!(Track::Ledger.title(), "On-chain");
    }
}
