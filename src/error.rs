//! Error types for shipgate
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

use crate::assignment::Variant;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Shipgate error types
///
/// Every variant is a deterministic input-validation failure. None of them are
/// transient, so callers must fix the input rather than retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A sample has zero trials, so no conversion rate is defined
    #[error("Division by zero: variant {variant} has 0 trials\nEvery variant needs at least one observation before analysis")]
    DivisionByZero {
        /// Variant whose sample was empty
        variant: Variant,
    },

    /// Control conversion rate is zero, so relative lift is undefined
    #[error("Undefined lift: control conversion rate is 0\nRelative lift needs at least one control conversion")]
    UndefinedLift,

    /// Baseline and treatment rates coincide, so no sample size can detect the effect
    #[error("Undefined sample size: minimum detectable effect is 0\nUse a non-zero relative effect")]
    UndefinedSampleSize,

    /// Traffic split is outside `[0, 1]` or not finite
    #[error("Invalid split: {0}\nSplit must be a finite fraction in [0, 1]")]
    InvalidSplit(f64),

    /// Decision input is missing a field or carries a non-finite value
    #[error("Malformed test result: {0}")]
    MalformedResult(String),

    /// Sample has more successes than trials
    #[error("Invalid sample: {successes} successes out of {trials} trials\nSuccesses cannot exceed trials")]
    InvalidSample {
        /// Reported successes
        successes: u64,
        /// Reported trials
        trials: u64,
    },

    /// Numeric parameter is outside its valid range
    #[error("Invalid parameter `{name}` = {value}: expected {expected}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable valid range
        expected: &'static str,
    },
}

impl Error {
    /// Shorthand for parameters that must lie strictly inside `(0, 1)`.
    pub(crate) const fn open_unit(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter {
            name,
            value,
            expected: "a value strictly between 0 and 1",
        }
    }
}

/// Validate that `value` lies strictly inside `(0, 1)`.
pub(crate) fn check_open_unit(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(Error::open_unit(name, value))
    }
}
