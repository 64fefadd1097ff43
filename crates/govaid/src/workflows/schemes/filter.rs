use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{ApplicantProfile, ApplicantRole, Scheme, SchemeId, SchemeView};
use super::eligibility::{EligibilityEngine, EligibilityError, MalformedRulePolicy, MatchingConfig};

/// Pure filter projecting the schemes an applicant qualifies for.
#[derive(Debug, Clone, Default)]
pub struct SchemeFilter {
    engine: EligibilityEngine,
    policy: MalformedRulePolicy,
}

impl SchemeFilter {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            engine: EligibilityEngine::new(),
            policy: config.malformed_rules,
        }
    }

    pub fn policy(&self) -> MalformedRulePolicy {
        self.policy
    }

    /// Keep, in source order, the schemes targeted at `role` whose rules the
    /// profile satisfies.
    pub fn filter(
        &self,
        role: ApplicantRole,
        profile: &ApplicantProfile,
        schemes: &[Scheme],
    ) -> Result<FilterOutcome, EligibilityError> {
        let mut outcome = FilterOutcome::default();

        for scheme in schemes.iter().filter(|scheme| scheme.target_group == role) {
            match self.engine.evaluate(&scheme.eligibility, profile) {
                Ok(decision) => {
                    debug!(scheme = %scheme.id.0, decision = %decision.summary(), "scheme evaluated");
                    if decision.is_eligible() {
                        outcome.schemes.push(scheme.view());
                    }
                }
                Err(error) => match self.policy {
                    MalformedRulePolicy::Abort => return Err(error),
                    MalformedRulePolicy::Skip => {
                        warn!(scheme = %scheme.id.0, %error, "skipping scheme with malformed eligibility");
                        outcome.skipped.push(SkippedScheme {
                            scheme_id: scheme.id.clone(),
                            name: scheme.name.clone(),
                            reason: error.to_string(),
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }
}

/// Schemes left out of a pass because their rules could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedScheme {
    pub scheme_id: SchemeId,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub schemes: Vec<SchemeView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedScheme>,
}
