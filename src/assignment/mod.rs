//! Deterministic Variant Assignment
//!
//! Subjects are bucketed by hashing `"{subject_id}_{experiment_id}"` with
//! SHA-256. The experiment ID acts as a salt, so the same subject lands in
//! independent buckets across experiments.
//!
//! ## Bucketing
//!
//! ```text
//! sha256(subject_id + "_" + experiment_id)
//!     └─ first 4 bytes (big-endian u32) % 1000 ─> bucket ∈ [0, 999]
//!                                                   │
//!                           bucket < split × 1000 ──┴─> B (treatment), else A (control)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shipgate::assignment::{assign, Assigner, Variant, DEFAULT_SPLIT};
//!
//! // One-off assignment
//! let variant = assign("user_3", "google_ads_conversion_test_2026", DEFAULT_SPLIT)?;
//! assert_eq!(variant, Variant::B);
//!
//! // Reusable assigner, split validated once
//! let assigner = Assigner::new("google_ads_conversion_test_2026");
//! assert_eq!(assigner.assign("user_3"), variant);
//! # Ok::<(), shipgate::Error>(())
//! ```

mod assigner;
mod variant;

pub use assigner::{assign, bucket, Assigner, BUCKET_COUNT, DEFAULT_SPLIT};
pub use variant::{Variant, VariantAssignment};
