//! Two-proportion z-test
//!
//! Compares the conversion rate of a control sample (A) with a treatment
//! sample (B). Significance uses the pooled standard error under the null
//! hypothesis `p_a == p_b`; the confidence interval for `p_b - p_a` uses the
//! unpooled standard error of each sample's own rate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normal;
use crate::assignment::Variant;
use crate::error::check_open_unit;
use crate::{Error, Result};

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Conversion counts for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProportionSample {
    successes: u64,
    trials: u64,
}

impl ProportionSample {
    /// Create a sample from raw counts.
    ///
    /// Zero trials are accepted here; the rate is undefined and analysis
    /// reports [`Error::DivisionByZero`] for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSample`] if `successes > trials`.
    pub const fn new(successes: u64, trials: u64) -> Result<Self> {
        if successes > trials {
            return Err(Error::InvalidSample { successes, trials });
        }
        Ok(Self { successes, trials })
    }

    /// Get the number of conversions.
    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.successes
    }

    /// Get the number of observations.
    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.trials
    }

    /// Conversion rate `successes / trials`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] (attributed to `variant`) when the
    /// sample has no trials.
    pub fn rate_for(&self, variant: Variant) -> Result<f64> {
        if self.trials == 0 {
            return Err(Error::DivisionByZero { variant });
        }
        let (successes, trials) = self.counts();
        Ok(successes / trials)
    }

    #[allow(clippy::cast_precision_loss)]
    fn counts(&self) -> (f64, f64) {
        (self.successes as f64, self.trials as f64)
    }
}

/// Outcome of a two-proportion z-test.
///
/// All fields keep full floating-point precision. Use
/// [`ProportionTestResult::report`] for the rounded presentation values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProportionTestResult {
    p_a: f64,
    p_b: f64,
    lift: f64,
    p_value: f64,
    confidence_interval: (f64, f64),
    alpha: f64,
    significant: bool,
}

impl ProportionTestResult {
    /// Create a builder for results computed outside this crate (e.g. guardrail
    /// metrics analyzed by another system).
    #[must_use]
    pub fn builder() -> ProportionTestResultBuilder {
        ProportionTestResultBuilder::default()
    }

    /// Control conversion rate.
    #[must_use]
    pub const fn p_a(&self) -> f64 {
        self.p_a
    }

    /// Treatment conversion rate.
    #[must_use]
    pub const fn p_b(&self) -> f64 {
        self.p_b
    }

    /// Relative lift `(p_b - p_a) / p_a`.
    #[must_use]
    pub const fn lift(&self) -> f64 {
        self.lift
    }

    /// Absolute difference `p_b - p_a`.
    #[must_use]
    pub fn difference(&self) -> f64 {
        self.p_b - self.p_a
    }

    /// Two-sided p-value.
    #[must_use]
    pub const fn p_value(&self) -> f64 {
        self.p_value
    }

    /// `(lower, upper)` bounds on `p_b - p_a` at confidence `1 - alpha`.
    #[must_use]
    pub const fn confidence_interval(&self) -> (f64, f64) {
        self.confidence_interval
    }

    /// Significance level the result was evaluated at.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether `p_value < alpha`.
    #[must_use]
    pub const fn is_significant(&self) -> bool {
        self.significant
    }

    /// Rounded view for presentation: 4 decimals for rates, lift and
    /// interval, 5 for the p-value.
    #[must_use]
    pub fn report(&self) -> ProportionReport {
        ProportionReport {
            p_a: round_to(self.p_a, 4),
            p_b: round_to(self.p_b, 4),
            lift: round_to(self.lift, 4),
            p_value: round_to(self.p_value, 5),
            confidence_interval: (
                round_to(self.confidence_interval.0, 4),
                round_to(self.confidence_interval.1, 4),
            ),
            significant: self.significant,
        }
    }

    /// Check the invariants a result must satisfy before it feeds a decision.
    ///
    /// Results from [`analyze_proportions`] and the builder always pass;
    /// deserialized results may not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResult`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_finite("p_a", self.p_a)?;
        check_finite("p_b", self.p_b)?;
        check_finite("lift", self.lift)?;
        check_finite("p_value", self.p_value)?;
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::MalformedResult(format!(
                "alpha {} is outside (0, 1)",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.p_value) {
            return Err(Error::MalformedResult(format!(
                "p_value {} is outside [0, 1]",
                self.p_value
            )));
        }
        let (lower, upper) = self.confidence_interval;
        check_finite("confidence_interval.lower", lower)?;
        check_finite("confidence_interval.upper", upper)?;
        if lower > upper {
            return Err(Error::MalformedResult(format!(
                "confidence interval ({lower}, {upper}) is not ordered"
            )));
        }
        if self.significant != (self.p_value < self.alpha) {
            return Err(Error::MalformedResult(format!(
                "significant = {} disagrees with p_value {} at alpha {}",
                self.significant, self.p_value, self.alpha
            )));
        }
        Ok(())
    }
}

/// Presentation copy of a [`ProportionTestResult`] with rounded values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProportionReport {
    /// Control rate, 4 decimals.
    pub p_a: f64,
    /// Treatment rate, 4 decimals.
    pub p_b: f64,
    /// Relative lift, 4 decimals.
    pub lift: f64,
    /// Two-sided p-value, 5 decimals.
    pub p_value: f64,
    /// Interval on `p_b - p_a`, 4 decimals.
    pub confidence_interval: (f64, f64),
    /// Whether the result was significant (computed before rounding).
    pub significant: bool,
}

/// Builder for `ProportionTestResult`.
///
/// Every field except `alpha` is required; `significant` is always derived
/// from `p_value < alpha`.
#[derive(Debug, Default)]
pub struct ProportionTestResultBuilder {
    p_a: Option<f64>,
    p_b: Option<f64>,
    lift: Option<f64>,
    p_value: Option<f64>,
    confidence_interval: Option<(f64, f64)>,
    alpha: Option<f64>,
}

impl ProportionTestResultBuilder {
    /// Set both observed rates.
    #[must_use]
    pub const fn rates(mut self, p_a: f64, p_b: f64) -> Self {
        self.p_a = Some(p_a);
        self.p_b = Some(p_b);
        self
    }

    /// Set the relative lift.
    #[must_use]
    pub const fn lift(mut self, lift: f64) -> Self {
        self.lift = Some(lift);
        self
    }

    /// Set the two-sided p-value.
    #[must_use]
    pub const fn p_value(mut self, p_value: f64) -> Self {
        self.p_value = Some(p_value);
        self
    }

    /// Set the interval on `p_b - p_a`.
    #[must_use]
    pub const fn confidence_interval(mut self, lower: f64, upper: f64) -> Self {
        self.confidence_interval = Some((lower, upper));
        self
    }

    /// Set the significance level (defaults to [`DEFAULT_ALPHA`]).
    #[must_use]
    pub const fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Build the `ProportionTestResult`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResult`] if a required field is missing or
    /// invalid, or [`Error::InvalidParameter`] if `alpha` is outside `(0, 1)`.
    pub fn build(self) -> Result<ProportionTestResult> {
        let alpha = check_open_unit("alpha", self.alpha.unwrap_or(DEFAULT_ALPHA))?;
        let p_value = required("p_value", self.p_value)?;
        let result = ProportionTestResult {
            p_a: required("p_a", self.p_a)?,
            p_b: required("p_b", self.p_b)?,
            lift: required("lift", self.lift)?,
            p_value,
            confidence_interval: required("confidence_interval", self.confidence_interval)?,
            alpha,
            significant: p_value < alpha,
        };
        result.validate()?;
        Ok(result)
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::MalformedResult(format!("missing required field `{field}`")))
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::MalformedResult(format!("field `{field}` is {value}")))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Run a two-sided two-proportion z-test of `sample_b` (treatment) against
/// `sample_a` (control).
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `alpha` is outside `(0, 1)`
/// - [`Error::DivisionByZero`] if either sample has zero trials
/// - [`Error::UndefinedLift`] if the control rate is zero
///
/// # Example
///
/// ```rust
/// use shipgate::stats::{analyze_proportions, ProportionSample, DEFAULT_ALPHA};
///
/// let control = ProportionSample::new(600, 5000)?;
/// let treatment = ProportionSample::new(700, 5000)?;
/// let result = analyze_proportions(control, treatment, DEFAULT_ALPHA)?;
///
/// assert!(result.is_significant());
/// assert!((result.lift() - 1.0 / 6.0).abs() < 1e-12);
/// # Ok::<(), shipgate::Error>(())
/// ```
pub fn analyze_proportions(
    sample_a: ProportionSample,
    sample_b: ProportionSample,
    alpha: f64,
) -> Result<ProportionTestResult> {
    let alpha = check_open_unit("alpha", alpha)?;
    let p_a = sample_a.rate_for(Variant::A)?;
    let p_b = sample_b.rate_for(Variant::B)?;
    if p_a == 0.0 {
        return Err(Error::UndefinedLift);
    }
    let lift = (p_b - p_a) / p_a;
    let diff = p_b - p_a;

    let (s_a, n_a) = sample_a.counts();
    let (s_b, n_b) = sample_b.counts();
    let p_pooled = (s_a + s_b) / (n_a + n_b);
    let se_pooled = (p_pooled * (1.0 - p_pooled) * (1.0 / n_a + 1.0 / n_b)).sqrt();

    // Both samples at 100% conversion: no variance and no difference.
    let z = if se_pooled > 0.0 { diff / se_pooled } else { 0.0 };
    let p_value = normal::two_sided_p_value(z);

    let se_unpooled = (p_a * (1.0 - p_a) / n_a + p_b * (1.0 - p_b) / n_b).sqrt();
    let margin = normal::quantile(1.0 - alpha / 2.0) * se_unpooled;
    let confidence_interval = (diff - margin, diff + margin);

    debug!(p_a, p_b, lift, z, p_value, se_pooled, se_unpooled, "two-proportion z-test");

    Ok(ProportionTestResult {
        p_a,
        p_b,
        lift,
        p_value,
        confidence_interval,
        alpha,
        significant: p_value < alpha,
    })
}
