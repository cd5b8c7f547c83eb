//! Decision policy thresholds

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A significant guardrail with relative lift below this value blocks shipping.
pub const DEFAULT_GUARDRAIL_LIFT_THRESHOLD: f64 = -0.02;

/// A significant primary result must have relative lift above this value to ship.
pub const DEFAULT_MIN_PRIMARY_LIFT: f64 = 0.0;

/// Thresholds used by the decision rule.
///
/// Deserializes from any serde format; missing fields fall back to the
/// defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    /// Relative lift below which a significant guardrail blocks shipping.
    pub guardrail_lift_threshold: f64,
    /// Relative lift a significant primary result must exceed to ship.
    pub min_primary_lift: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            guardrail_lift_threshold: DEFAULT_GUARDRAIL_LIFT_THRESHOLD,
            min_primary_lift: DEFAULT_MIN_PRIMARY_LIFT,
        }
    }
}

impl DecisionPolicy {
    /// Check that both thresholds are finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a non-finite threshold.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("guardrail_lift_threshold", self.guardrail_lift_threshold),
            ("min_primary_lift", self.min_primary_lift),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name,
                    value,
                    expected: "a finite relative lift",
                });
            }
        }
        Ok(())
    }
}
