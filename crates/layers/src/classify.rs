//! Buckets states by coverage and by incentive count.

use std::collections::{BTreeMap, BTreeSet};

use regions::states::{Coverage, state_name, state_names_with_coverage};

use crate::filter::Filter;
use crate::layer::LayerId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncentiveTier {
    Low,
    Medium,
    High,
}

impl IncentiveTier {
    pub const ALL: [IncentiveTier; 3] = [
        IncentiveTier::Low,
        IncentiveTier::Medium,
        IncentiveTier::High,
    ];

    /// `None` for zero incentives.
    pub fn for_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1..=10 => Some(IncentiveTier::Low),
            11..=20 => Some(IncentiveTier::Medium),
            _ => Some(IncentiveTier::High),
        }
    }

    pub fn layer(self) -> LayerId {
        match self {
            IncentiveTier::Low => LayerId::IncentivesLow,
            IncentiveTier::Medium => LayerId::IncentivesMedium,
            IncentiveTier::High => LayerId::IncentivesHigh,
        }
    }
}

/// Launched / beta / uncovered state names from the static coverage lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageClasses {
    launched: Vec<&'static str>,
    beta: Vec<&'static str>,
    uncovered: Vec<&'static str>,
}

impl Default for CoverageClasses {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageClasses {
    pub fn new() -> Self {
        Self {
            launched: state_names_with_coverage(Coverage::Launched),
            beta: state_names_with_coverage(Coverage::Beta),
            uncovered: state_names_with_coverage(Coverage::Uncovered),
        }
    }

    pub fn names(&self, coverage: Coverage) -> &[&'static str] {
        match coverage {
            Coverage::Launched => &self.launched,
            Coverage::Beta => &self.beta,
            Coverage::Uncovered => &self.uncovered,
        }
    }

    pub fn filter(&self, coverage: Coverage) -> Filter {
        Filter::states_named(self.names(coverage).iter().copied())
    }
}

/// Per-state incentive counts, filled in as fetches complete in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountClassifier {
    pending: BTreeSet<String>,
    counts: BTreeMap<String, usize>,
    failed: BTreeSet<String>,
}

impl CountClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks states as awaiting a count. Returns the ones not already known
    /// or in flight, which are the ones to fetch.
    pub fn request<'a>(&mut self, states: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut fresh = Vec::new();
        for abbr in states {
            if self.pending.contains(abbr) || self.counts.contains_key(abbr) {
                continue;
            }
            self.failed.remove(abbr);
            self.pending.insert(abbr.to_string());
            fresh.push(abbr.to_string());
        }
        fresh
    }

    /// Records a count. Returns `true` if the state's tier changed.
    pub fn record_count(&mut self, state: &str, count: usize) -> bool {
        self.pending.remove(state);
        self.failed.remove(state);
        let before = self.tier_of(state);
        self.counts.insert(state.to_string(), count);
        before != IncentiveTier::for_count(count)
    }

    /// A failed fetch leaves the state untinted.
    pub fn record_failure(&mut self, state: &str) -> bool {
        self.pending.remove(state);
        self.failed.insert(state.to_string());
        let before = self.tier_of(state);
        self.counts.remove(state);
        before.is_some()
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.failed.iter().map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn count(&self, state: &str) -> Option<usize> {
        self.counts.get(state).copied()
    }

    pub fn tier_of(&self, state: &str) -> Option<IncentiveTier> {
        self.count(state).and_then(IncentiveTier::for_count)
    }

    /// Full names of states in `tier`, ordered by abbreviation.
    pub fn names_in_tier(&self, tier: IncentiveTier) -> Vec<&'static str> {
        self.counts
            .iter()
            .filter(|(_, count)| IncentiveTier::for_count(**count) == Some(tier))
            .filter_map(|(abbr, _)| state_name(abbr))
            .collect()
    }

    pub fn tier_filter(&self, tier: IncentiveTier) -> Filter {
        Filter::states_named(self.names_in_tier(tier))
    }
}
