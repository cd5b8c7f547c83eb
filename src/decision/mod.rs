//! Ship Decisions
//!
//! Combines the primary metric result with guardrail results into one of
//! three verdicts. Guardrail safety always dominates primary gains:
//!
//! 1. [`Decision::Block`] if any guardrail is significant with lift below
//!    [`DecisionPolicy::guardrail_lift_threshold`] (default −0.02)
//! 2. [`Decision::Ship`] if the primary is significant with lift above
//!    [`DecisionPolicy::min_primary_lift`] (default 0)
//! 3. [`Decision::Inconclusive`] otherwise
//!
//! ## Usage
//!
//! ```rust
//! use shipgate::decision::{decide, Decision};
//! use shipgate::stats::{analyze_proportions, ProportionSample, ProportionTestResult};
//!
//! let primary = analyze_proportions(
//!     ProportionSample::new(600, 5000)?,
//!     ProportionSample::new(700, 5000)?,
//!     0.05,
//! )?;
//! let latency_guardrail = ProportionTestResult::builder()
//!     .rates(0.90, 0.873)
//!     .lift(-0.03)
//!     .p_value(0.001)
//!     .confidence_interval(-0.04, -0.014)
//!     .build()?;
//!
//! assert_eq!(decide(&primary, &[])?, Decision::Ship);
//! assert_eq!(decide(&primary, &[latency_guardrail])?, Decision::Block);
//! # Ok::<(), shipgate::Error>(())
//! ```

mod engine;
mod policy;

pub use engine::{decide, Decision, DecisionOutcome};
pub use policy::{DecisionPolicy, DEFAULT_GUARDRAIL_LIFT_THRESHOLD, DEFAULT_MIN_PRIMARY_LIFT};
