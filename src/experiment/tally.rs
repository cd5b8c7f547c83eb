//! Conversion Tally - per-variant aggregation of subject outcomes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assignment::{Variant, VariantAssignment};
use crate::stats::{analyze_proportions, ProportionSample, ProportionTestResult};
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Counts {
    successes: u64,
    trials: u64,
}

/// Accumulates binary outcomes per variant.
///
/// ## Design
///
/// The tally is the bridge between per-subject assignment and the
/// aggregate-only statistics layer. It keeps two counters per variant and
/// never stores subject IDs, so memory is constant in the number of subjects.
///
/// Tallies built on separate threads combine with [`ConversionTally::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTally {
    counts: BTreeMap<Variant, Counts>,
}

impl ConversionTally {
    /// Create a new empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no outcome has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_trials() == 0
    }

    /// Record one outcome for a variant.
    ///
    /// Counters saturate at `u64::MAX` instead of wrapping.
    pub fn record(&mut self, variant: Variant, converted: bool) {
        let counts = self.counts.entry(variant).or_default();
        counts.trials = counts.trials.saturating_add(1);
        counts.successes = counts.successes.saturating_add(u64::from(converted));
    }

    /// Record one outcome for an assigned subject.
    pub fn record_assignment(&mut self, assignment: &VariantAssignment, converted: bool) {
        self.record(assignment.variant(), converted);
    }

    /// Fold another tally into this one. Counters saturate at `u64::MAX`.
    pub fn merge(&mut self, other: &Self) {
        for (variant, theirs) in &other.counts {
            let ours = self.counts.entry(*variant).or_default();
            ours.successes = ours.successes.saturating_add(theirs.successes);
            ours.trials = ours.trials.saturating_add(theirs.trials);
        }
    }

    /// Number of observations recorded for a variant.
    #[must_use]
    pub fn trials(&self, variant: Variant) -> u64 {
        self.counts.get(&variant).map_or(0, |c| c.trials)
    }

    /// Number of conversions recorded for a variant.
    #[must_use]
    pub fn successes(&self, variant: Variant) -> u64 {
        self.counts.get(&variant).map_or(0, |c| c.successes)
    }

    /// Number of observations across all variants.
    #[must_use]
    pub fn total_trials(&self) -> u64 {
        self.counts
            .values()
            .fold(0, |total, c| total.saturating_add(c.trials))
    }

    /// Aggregate sample for a variant. A variant with no observations yields
    /// an empty sample, which analysis rejects.
    ///
    /// # Errors
    ///
    /// Never fails for counts produced by [`ConversionTally::record`]; the
    /// `Result` carries the sample invariant check.
    pub fn sample(&self, variant: Variant) -> Result<ProportionSample> {
        ProportionSample::new(self.successes(variant), self.trials(variant))
    }

    /// Analyze treatment (B) against control (A).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`](crate::Error::DivisionByZero) if a
    /// variant has no observations, plus any error from
    /// [`analyze_proportions`].
    pub fn analyze(&self, alpha: f64) -> Result<ProportionTestResult> {
        analyze_proportions(self.sample(Variant::A)?, self.sample(Variant::B)?, alpha)
    }
}
