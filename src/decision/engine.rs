//! Decision engine - guardrail-first ship/block/inconclusive rule

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::DecisionPolicy;
use crate::stats::ProportionTestResult;
use crate::Result;

/// Ship verdict for an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Primary metric improved significantly and no guardrail regressed.
    Ship,
    /// At least one guardrail regressed significantly.
    Block,
    /// Not enough evidence either way; keep control.
    Inconclusive,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ship => "SHIP: statistically significant gain",
            Self::Block => "DO NOT SHIP: guardrail violated",
            Self::Inconclusive => "INCONCLUSIVE: keep A / collect more data",
        })
    }
}

/// Decision plus the guardrails responsible for a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    decision: Decision,
    violated_guardrails: Vec<usize>,
}

impl DecisionOutcome {
    /// Get the verdict.
    #[must_use]
    pub const fn decision(&self) -> Decision {
        self.decision
    }

    /// Indices (into the guardrail slice) of every violated guardrail.
    #[must_use]
    pub fn violated_guardrails(&self) -> &[usize] {
        &self.violated_guardrails
    }
}

impl DecisionPolicy {
    /// Evaluate the decision rule and report which guardrails were violated.
    ///
    /// All guardrails are checked, so the outcome lists every violation rather
    /// than the first one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResult`](crate::Error::MalformedResult) if
    /// any input fails [`ProportionTestResult::validate`], or
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if the
    /// policy itself is invalid.
    pub fn evaluate(
        &self,
        primary: &ProportionTestResult,
        guardrails: &[ProportionTestResult],
    ) -> Result<DecisionOutcome> {
        self.validate()?;
        primary.validate()?;
        for guardrail in guardrails {
            guardrail.validate()?;
        }

        let violated_guardrails: Vec<usize> = guardrails
            .iter()
            .enumerate()
            .filter(|(_, g)| g.is_significant() && g.lift() < self.guardrail_lift_threshold)
            .map(|(index, _)| index)
            .collect();

        for &index in &violated_guardrails {
            warn!(
                guardrail = index,
                lift = guardrails[index].lift(),
                threshold = self.guardrail_lift_threshold,
                "guardrail regressed"
            );
        }

        let decision = if !violated_guardrails.is_empty() {
            Decision::Block
        } else if primary.is_significant() && primary.lift() > self.min_primary_lift {
            Decision::Ship
        } else {
            Decision::Inconclusive
        };

        info!(
            ?decision,
            primary_lift = primary.lift(),
            primary_p_value = primary.p_value(),
            guardrails = guardrails.len(),
            "experiment decision"
        );

        Ok(DecisionOutcome {
            decision,
            violated_guardrails,
        })
    }

    /// Evaluate the decision rule and return only the verdict.
    ///
    /// # Errors
    ///
    /// See [`DecisionPolicy::evaluate`].
    pub fn decide(
        &self,
        primary: &ProportionTestResult,
        guardrails: &[ProportionTestResult],
    ) -> Result<Decision> {
        self.evaluate(primary, guardrails).map(|outcome| outcome.decision)
    }
}

/// Decide with the default [`DecisionPolicy`].
///
/// Pass an empty slice for a primary-only evaluation.
///
/// # Errors
///
/// Returns [`Error::MalformedResult`](crate::Error::MalformedResult) if any
/// input result is invalid.
pub fn decide(
    primary: &ProportionTestResult,
    guardrails: &[ProportionTestResult],
) -> Result<Decision> {
    DecisionPolicy::default().decide(primary, guardrails)
}
