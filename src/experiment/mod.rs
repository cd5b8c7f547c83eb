//! Experiment Aggregation
//!
//! Turns per-subject outcomes into the per-variant aggregates the statistics
//! layer consumes.
//!
//! ```text
//! subject ──> Assigner ──> Variant ──┐
//! outcome ───────────────────────────┴──> ConversionTally ──> ProportionSample (A, B)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shipgate::assignment::Assigner;
//! use shipgate::experiment::ConversionTally;
//!
//! let assigner = Assigner::new("checkout-redesign");
//! let mut tally = ConversionTally::new();
//!
//! for i in 0..1000 {
//!     let subject = format!("user_{i}");
//!     let converted = i % 9 == 0;
//!     tally.record(assigner.assign(&subject), converted);
//! }
//!
//! assert_eq!(tally.total_trials(), 1000);
//! let result = tally.analyze(0.05)?;
//! assert!(result.p_value() <= 1.0);
//! # Ok::<(), shipgate::Error>(())
//! ```

mod tally;

pub use tally::ConversionTally;
