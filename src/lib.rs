//! # Shipgate: Deterministic A/B Assignment and Ship Decisions
//!
//! Shipgate covers the algorithmic core of a conversion-rate experiment:
//!
//! - **Assignment**: hash-based, deterministic bucketing of subjects into
//!   control (A) and treatment (B)
//! - **Statistics**: two-proportion z-test with lift and confidence interval,
//!   plus power-analysis sample sizing
//! - **Decision**: guardrail-first ship / block / inconclusive verdicts
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke safety**: undefined statistics (zero trials, zero baseline,
//!   zero effect) are errors, never silent `NaN`s
//! - **Jidoka**: guardrail regressions stop the line before a primary win ships
//! - **Heijunka**: every operation is a pure function over immutable values,
//!   safe to run on any thread in any order
//!
//! ## Example Usage
//!
//! ```rust
//! use shipgate::assignment::Assigner;
//! use shipgate::decision::{decide, Decision};
//! use shipgate::stats::{analyze_proportions, calculate_sample_size, ProportionSample};
//!
//! // Plan: per-variant sample size for a 10% relative lift on a 12% baseline
//! let n = calculate_sample_size(0.12, 0.10, 0.05, 0.8)?;
//! assert_eq!(n, 12_004);
//!
//! // Assign: deterministic across runs and processes
//! let assigner = Assigner::new("google_ads_conversion_test_2026");
//! assert_eq!(assigner.assign("user_3"), assigner.assign("user_3"));
//!
//! // Analyze aggregated counts, then decide
//! let result = analyze_proportions(
//!     ProportionSample::new(600, 5000)?,
//!     ProportionSample::new(700, 5000)?,
//!     0.05,
//! )?;
//! assert_eq!(decide(&result, &[])?, Decision::Ship);
//! # Ok::<(), shipgate::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod assignment;
pub mod config;
pub mod decision;
pub mod error;
pub mod experiment;
pub mod stats;

pub use assignment::{assign, Assigner, Variant, VariantAssignment};
pub use config::AnalysisConfig;
pub use decision::{decide, Decision, DecisionOutcome, DecisionPolicy};
pub use error::{Error, Result};
pub use experiment::ConversionTally;
pub use stats::{
    analyze_proportions, calculate_sample_size, ProportionReport, ProportionSample,
    ProportionTestResult,
};
