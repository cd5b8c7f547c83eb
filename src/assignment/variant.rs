//! Variant labels and assignment records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Experimental condition a subject is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    /// Control group.
    A,
    /// Treatment group.
    B,
}

impl Variant {
    /// Both variants, control first.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Get the label as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Whether this is the treatment variant.
    #[must_use]
    pub const fn is_treatment(self) -> bool {
        matches!(self, Self::B)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant Assignment records which variant a subject received.
///
/// Produced by [`Assigner::assignment`](super::Assigner::assignment). The
/// record is immutable: re-deriving it with the same subject, experiment and
/// split always yields the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAssignment {
    subject_id: String,
    experiment_id: String,
    variant: Variant,
}

impl VariantAssignment {
    pub(crate) fn new(
        subject_id: impl Into<String>,
        experiment_id: impl Into<String>,
        variant: Variant,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            experiment_id: experiment_id.into(),
            variant,
        }
    }

    /// Get the subject ID.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the assigned variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }
}
