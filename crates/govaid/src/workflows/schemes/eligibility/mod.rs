mod config;
mod policy;
pub mod rules;

pub use config::{MalformedRulePolicy, MatchingConfig};
pub use policy::{EligibilityDecision, EligibilityError};

use super::domain::ApplicantProfile;
use policy::comparison_passes;
use rules::parse_rules;

/// Stateless evaluator applying a scheme's eligibility text to a profile.
///
/// Rules are re-tokenized on every call; clauses run in order and the first
/// failing comparison decides the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityEngine;

impl EligibilityEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        eligibility: &str,
        profile: &ApplicantProfile,
    ) -> Result<EligibilityDecision, EligibilityError> {
        let rules = parse_rules(eligibility);

        for clause in rules.clauses() {
            for comparison in &clause.comparisons {
                if !comparison_passes(comparison, profile, &clause.text)? {
                    return Ok(EligibilityDecision::Ineligible {
                        subject: comparison.subject,
                        clause: clause.text.clone(),
                    });
                }
            }
        }

        Ok(EligibilityDecision::Eligible)
    }

    pub fn is_eligible(
        &self,
        eligibility: &str,
        profile: &ApplicantProfile,
    ) -> Result<bool, EligibilityError> {
        self.evaluate(eligibility, profile)
            .map(|decision| decision.is_eligible())
    }
}
