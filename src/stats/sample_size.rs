//! Power analysis for the two-proportion test

use tracing::debug;

use super::normal;
use crate::error::check_open_unit;
use crate::{Error, Result};

/// Default statistical power (1 - β).
pub const DEFAULT_POWER: f64 = 0.8;

/// Minimum per-variant sample size to detect a relative effect `mde` on top of
/// `baseline` with a two-sided test at level `alpha` and the given `power`.
///
/// With `p1 = baseline`, `p2 = baseline · (1 + mde)` and `p̄ = (p1 + p2) / 2`:
///
/// ```text
/// n = [z(1-α/2)·√(2·p̄·(1-p̄)) + z(power)·√(p1·(1-p1) + p2·(1-p2))]² / (p1 - p2)²
/// ```
///
/// rounded up, so the estimate is never short.
///
/// # Errors
///
/// - [`Error::UndefinedSampleSize`] if `baseline · (1 + mde) == baseline`
///   (no effect to detect, including an `mde` lost to rounding)
/// - [`Error::InvalidParameter`] if `baseline`, `alpha` or `power` is outside
///   `(0, 1)`, `mde` is not finite, the treatment rate leaves `(0, 1)`, or
///   the effect is so small the sample size does not fit in a `u64`
///
/// # Example
///
/// ```rust
/// use shipgate::stats::{calculate_sample_size, DEFAULT_ALPHA, DEFAULT_POWER};
///
/// let n = calculate_sample_size(0.12, 0.10, DEFAULT_ALPHA, DEFAULT_POWER)?;
/// assert_eq!(n, 12_004);
/// # Ok::<(), shipgate::Error>(())
/// ```
pub fn calculate_sample_size(baseline: f64, mde: f64, alpha: f64, power: f64) -> Result<u64> {
    let p1 = check_open_unit("baseline", baseline)?;
    let alpha = check_open_unit("alpha", alpha)?;
    let power = check_open_unit("power", power)?;
    if !mde.is_finite() {
        return Err(Error::InvalidParameter {
            name: "mde",
            value: mde,
            expected: "a finite relative effect",
        });
    }
    let p2 = p1 * (1.0 + mde);
    // Also catches effects too small to move p2 off p1 in floating point.
    if p1 == p2 {
        return Err(Error::UndefinedSampleSize);
    }
    if !(p2 > 0.0 && p2 < 1.0) {
        return Err(Error::InvalidParameter {
            name: "mde",
            value: mde,
            expected: "an effect keeping baseline × (1 + mde) strictly between 0 and 1",
        });
    }

    let p_avg = (p1 + p2) / 2.0;
    let z_alpha = normal::quantile(1.0 - alpha / 2.0);
    let z_beta = normal::quantile(power);

    let spread = z_alpha * (2.0 * p_avg * (1.0 - p_avg)).sqrt()
        + z_beta * (p1 * (1.0 - p1) + p2 * (1.0 - p2)).sqrt();
    let n = spread.powi(2) / (p1 - p2).powi(2);

    debug!(baseline, mde, alpha, power, z_alpha, z_beta, n, "sample size");

    #[allow(clippy::cast_precision_loss)]
    let representable = n.is_finite() && n.ceil() < u64::MAX as f64;
    if !representable {
        return Err(Error::InvalidParameter {
            name: "mde",
            value: mde,
            expected: "an effect large enough for a sample size that fits in u64",
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = n.ceil() as u64;
    Ok(n.max(1))
}
