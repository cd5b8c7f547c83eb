//! Experiment analysis configuration
//!
//! Plain numeric settings supplied by the caller. The crate never reads
//! configuration files; deserialize `AnalysisConfig` from whatever format the
//! surrounding application uses.

use serde::{Deserialize, Serialize};

use crate::assignment::{Assigner, DEFAULT_SPLIT};
use crate::error::check_open_unit;
use crate::stats::{calculate_sample_size, DEFAULT_ALPHA, DEFAULT_POWER};
use crate::{Error, Result};

/// Default baseline conversion rate used when none is configured.
pub const DEFAULT_BASELINE: f64 = 0.12;

/// Default relative minimum detectable effect.
pub const DEFAULT_MDE: f64 = 0.10;

/// Experiment design parameters.
///
/// Missing fields deserialize to their defaults:
///
/// | field | default |
/// |---|---|
/// | `baseline` | 0.12 |
/// | `mde` | 0.10 (relative) |
/// | `alpha` | 0.05 |
/// | `power` | 0.8 |
/// | `split` | 0.5 |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Expected control conversion rate.
    pub baseline: f64,
    /// Relative minimum detectable effect.
    pub mde: f64,
    /// Significance level.
    pub alpha: f64,
    /// Statistical power.
    pub power: f64,
    /// Fraction of traffic assigned to treatment.
    pub split: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE,
            mde: DEFAULT_MDE,
            alpha: DEFAULT_ALPHA,
            power: DEFAULT_POWER,
            split: DEFAULT_SPLIT,
        }
    }
}

impl AnalysisConfig {
    /// Validate every parameter.
    ///
    /// A planned experiment needs traffic in both arms, so `split` must lie
    /// strictly inside `(0, 1)` here even though the assigner accepts 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter as [`Error::InvalidParameter`],
    /// [`Error::InvalidSplit`] or [`Error::UndefinedSampleSize`].
    pub fn validate(&self) -> Result<()> {
        if !(self.split > 0.0 && self.split < 1.0) {
            return Err(Error::InvalidSplit(self.split));
        }
        check_open_unit("alpha", self.alpha)?;
        check_open_unit("power", self.power)?;
        self.required_sample_size().map(|_| ())
    }

    /// Per-variant sample size for this design.
    ///
    /// # Errors
    ///
    /// See [`calculate_sample_size`].
    pub fn required_sample_size(&self) -> Result<u64> {
        calculate_sample_size(self.baseline, self.mde, self.alpha, self.power)
    }

    /// Total subjects to enroll so the smaller arm reaches the per-variant size.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn total_sample_size(&self) -> Result<u64> {
        self.validate()?;
        let per_variant = self.required_sample_size()?;
        let smaller_arm = self.split.min(1.0 - self.split);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let total = (per_variant as f64 / smaller_arm).ceil() as u64;
        Ok(total)
    }

    /// Build an assigner for `experiment_id` with the configured split.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSplit`] if `split` is outside `[0, 1]`.
    pub fn assigner(&self, experiment_id: impl Into<String>) -> Result<Assigner> {
        Assigner::with_split(experiment_id, self.split)
    }
}
