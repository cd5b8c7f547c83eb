//! Assigner - hash-based bucketing of subjects into variants

use sha2::{Digest, Sha256};
use tracing::trace;

use super::{Variant, VariantAssignment};
use crate::{Error, Result};

/// Number of buckets the digest prefix is reduced into.
pub const BUCKET_COUNT: u32 = 1000;

/// Default fraction of traffic sent to the treatment variant.
pub const DEFAULT_SPLIT: f64 = 0.5;

/// Compute the bucket in `[0, BUCKET_COUNT)` for a subject within an experiment.
///
/// The key is `"{subject_id}_{experiment_id}"`. The first 32 bits of its
/// SHA-256 digest are read big-endian and reduced modulo [`BUCKET_COUNT`].
/// With a 32-bit prefix the modulo bias is below 1 in 4 million.
#[must_use]
pub fn bucket(subject_id: &str, experiment_id: &str) -> u32 {
    let digest = Sha256::new()
        .chain_update(subject_id.as_bytes())
        .chain_update(b"_")
        .chain_update(experiment_id.as_bytes())
        .finalize();
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    prefix % BUCKET_COUNT
}

/// Assign a subject to a variant.
///
/// `split` is the fraction of traffic sent to [`Variant::B`]. A split of `0.0`
/// keeps everyone in control and `1.0` moves everyone to treatment. Both are
/// accepted for full rollouts and rollbacks.
///
/// # Errors
///
/// Returns [`Error::InvalidSplit`] if `split` is not a finite value in `[0, 1]`.
pub fn assign(subject_id: &str, experiment_id: &str, split: f64) -> Result<Variant> {
    let split = validate_split(split)?;
    Ok(variant_for(subject_id, experiment_id, split))
}

fn validate_split(split: f64) -> Result<f64> {
    if split.is_finite() && (0.0..=1.0).contains(&split) {
        Ok(split)
    } else {
        Err(Error::InvalidSplit(split))
    }
}

fn variant_for(subject_id: &str, experiment_id: &str, split: f64) -> Variant {
    let bucket = bucket(subject_id, experiment_id);
    let variant = if f64::from(bucket) < split * f64::from(BUCKET_COUNT) {
        Variant::B
    } else {
        Variant::A
    };
    trace!(subject_id, experiment_id, bucket, %variant, "assigned subject");
    variant
}

/// Reusable assigner bound to one experiment and traffic split.
///
/// The split is validated once at construction, so [`Assigner::assign`] is
/// infallible. The assigner holds no mutable state and can be shared freely
/// across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Assigner {
    experiment_id: String,
    split: f64,
}

impl Assigner {
    /// Create an assigner with the default 50/50 split.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            split: DEFAULT_SPLIT,
        }
    }

    /// Create an assigner with a custom treatment fraction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSplit`] if `split` is not a finite value in `[0, 1]`.
    pub fn with_split(experiment_id: impl Into<String>, split: f64) -> Result<Self> {
        Ok(Self {
            experiment_id: experiment_id.into(),
            split: validate_split(split)?,
        })
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the treatment fraction.
    #[must_use]
    pub const fn split(&self) -> f64 {
        self.split
    }

    /// Assign a subject to a variant.
    #[must_use]
    pub fn assign(&self, subject_id: &str) -> Variant {
        variant_for(subject_id, &self.experiment_id, self.split)
    }

    /// Assign a subject and return the full assignment record.
    #[must_use]
    pub fn assignment(&self, subject_id: impl Into<String>) -> VariantAssignment {
        let subject_id = subject_id.into();
        let variant = self.assign(&subject_id);
        VariantAssignment::new(subject_id, self.experiment_id.clone(), variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXP: &str = "google_ads_conversion_test_2026";

    #[test]
    fn test_bucket_in_range() {
        for i in 0..1_000 {
            assert!(bucket(&format!("user_{i}"), EXP) < BUCKET_COUNT);
        }
    }

    #[test]
    fn test_bucket_pinned_values() {
        // SHA-256 prefixes computed independently; guards against key-format drift
        assert_eq!(bucket("user_0", EXP), 681);
        assert_eq!(bucket("user_1", EXP), 566);
        assert_eq!(bucket("user_2", EXP), 755);
        assert_eq!(bucket("user_3", EXP), 335);
    }

    #[test]
    fn test_assign_pinned_variants() {
        assert_eq!(assign("user_0", EXP, DEFAULT_SPLIT), Ok(Variant::A));
        assert_eq!(assign("user_3", EXP, DEFAULT_SPLIT), Ok(Variant::B));
    }

    #[test]
    fn test_split_edges_are_single_variant() {
        for i in 0..500 {
            let id = format!("user_{i}");
            assert_eq!(assign(&id, EXP, 0.0), Ok(Variant::A));
            assert_eq!(assign(&id, EXP, 1.0), Ok(Variant::B));
        }
    }

    #[test]
    fn test_invalid_split_rejected() {
        for split in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(assign("u", EXP, split), Err(Error::InvalidSplit(_))));
            assert!(Assigner::with_split(EXP, split).is_err());
        }
    }

    #[test]
    fn test_assigner_matches_free_function() {
        let assigner = Assigner::with_split(EXP, 0.3).unwrap();
        for i in 0..200 {
            let id = format!("user_{i}");
            assert_eq!(Ok(assigner.assign(&id)), assign(&id, EXP, 0.3));
        }
    }

    #[test]
    fn test_assignment_record() {
        let assigner = Assigner::new(EXP);
        let record = assigner.assignment("user_3");
        assert_eq!(record.subject_id(), "user_3");
        assert_eq!(record.experiment_id(), EXP);
        assert_eq!(record.variant(), Variant::B);
    }
}
