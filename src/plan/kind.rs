//! Workflow kinds and their fixed step layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OrdertrackError;

use super::track::{Track, TRACK_COUNT};

/// Nominal duration of the ledger half of "Submit on-chain".
pub const CHAIN_TIME: u32 = 5;

/// The two kinds of workflow a user can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Publishing a dataset to the market.
    Listing,
    /// Running a query against a listed dataset.
    Order,
}

/// Static description of one step: its label and, per track, the nominal
/// duration of the operation (absent when the track takes no part).
///
/// Durations are counted in time units (`time_unit_ms` in the configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepLayout {
    pub label: &'static str,
    pub durations: [Option<u32>; TRACK_COUNT],
}

impl StepLayout {
    const fn new(label: &'static str, durations: [Option<u32>; TRACK_COUNT]) -> Self {
        Self { label, durations }
    }

    /// Which tracks take part in this step.
    pub fn active(&self) -> [bool; TRACK_COUNT] {
        self.durations.map(|d| d.is_some())
    }

    /// Nominal duration for `track`, if it takes part.
    pub fn duration(&self, track: Track) -> Option<u32> {
        self.durations[track.index()]
    }
}

const LISTING_LAYOUT: [StepLayout; 3] = [
    StepLayout::new("Encrypt dataset", [Some(5), None, None]),
    StepLayout::new("Submit on-chain", [Some(1), None, Some(CHAIN_TIME)]),
    StepLayout::new("Upload dataset", [Some(5), Some(10), None]),
];

const ORDER_LAYOUT: [StepLayout; 6] = [
    StepLayout::new("Encrypt query", [Some(5), None, None]),
    StepLayout::new("Submit on-chain", [Some(1), None, Some(CHAIN_TIME)]),
    StepLayout::new("Upload query", [Some(5), Some(10), None]),
    StepLayout::new("Prepare dataset", [None, Some(5), None]),
    StepLayout::new("Run computation", [None, Some(10), None]),
    StepLayout::new("Encrypt result", [None, Some(5), None]),
];

impl PlanKind {
    /// Canonical step layout for this kind.
    pub fn layout(self) -> &'static [StepLayout] {
        match self {
            PlanKind::Listing => &LISTING_LAYOUT,
            PlanKind::Order => &ORDER_LAYOUT,
        }
    }

    /// Page title shown above the progress table.
    pub fn title(self) -> &'static str {
        match self {
            PlanKind::Listing => "Dataset listing",
            PlanKind::Order => "Computation order",
        }
    }
}

impl FromStr for PlanKind {
    type Err = OrdertrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "listing" | "item" => Ok(Self::Listing),
            "order" => Ok(Self::Order),
            _ => Err(OrdertrackError::UnknownKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanKind::Listing => "listing",
            PlanKind::Order => "order",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_counts(kind: PlanKind) -> Vec<usize> {
        kind.layout()
            .iter()
            .map(|l| l.active().iter().filter(|a| **a).count())
            .collect()
    }

    #[test]
    fn listing_layout_shape() {
        assert_eq!(PlanKind::Listing.layout().len(), 3);
        assert_eq!(active_counts(PlanKind::Listing), vec![1, 2, 2]);
    }

    #[test]
    fn order_layout_shape() {
        assert_eq!(PlanKind::Order.layout().len(), 6);
        assert_eq!(active_counts(PlanKind::Order), vec![1, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn submit_step_uses_ledger() {
        let submit = PlanKind::Order.layout()[1];
        assert_eq!(submit.duration(Track::Ledger), Some(CHAIN_TIME));
        assert_eq!(submit.duration(Track::Enclave), None);
    }

    #[test]
    fn trailing_order_steps_run_in_enclave_only() {
        for layout in &PlanKind::Order.layout()[3..] {
            assert_eq!(layout.active(), [false, true, false]);
        }
    }

    #[test]
    fn parses_kinds() {
        assert_eq!("listing".parse::<PlanKind>().unwrap(), PlanKind::Listing);
        assert_eq!("item".parse::<PlanKind>().unwrap(), PlanKind::Listing);
        assert_eq!("ORDER".parse::<PlanKind>().unwrap(), PlanKind::Order);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "auction".parse::<PlanKind>().unwrap_err();
        assert!(matches!(err, OrdertrackError::UnknownKind { ref kind } if kind == "auction"));
    }

    #[test]
    fn display_matches_parse() {
        for kind in [PlanKind::Listing, PlanKind::Order] {
            assert_eq!(kind.to_string().parse::<PlanKind>().unwrap(), kind);
        }
    }
}
