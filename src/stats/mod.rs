//! Proportion Testing
//!
//! Statistical core for conversion-rate experiments:
//!
//! - [`analyze_proportions`]: two-sided two-proportion z-test with lift and a
//!   confidence interval on the absolute difference
//! - [`calculate_sample_size`]: per-variant sample size for a target relative
//!   effect, significance level and power
//! - [`normal`]: standard normal CDF and quantile used by both
//!
//! ## Pipeline
//!
//! ```text
//! ProportionSample (A) ─┐
//!                       ├─> analyze_proportions ─> ProportionTestResult ─> decision
//! ProportionSample (B) ─┘                                 │
//!                                                         └─> report() (rounded)
//! ```

pub mod normal;
mod proportion;
mod sample_size;

pub use proportion::{
    analyze_proportions, ProportionReport, ProportionSample, ProportionTestResult,
    ProportionTestResultBuilder, DEFAULT_ALPHA,
};
pub use sample_size::{calculate_sample_size, DEFAULT_POWER};
