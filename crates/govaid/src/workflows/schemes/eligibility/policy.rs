use super::super::domain::ApplicantProfile;
use super::rules::{Comparison, Operand, Subject, TextMatch};
use serde::{Deserialize, Serialize};

/// Outcome of checking one scheme's rules against one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum EligibilityDecision {
    Eligible,
    Ineligible { subject: Subject, clause: String },
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible)
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::Eligible => "eligible".to_string(),
            EligibilityDecision::Ineligible { subject, clause } => {
                format!("ineligible: {subject} fails clause '{clause}'")
            }
        }
    }
}

/// Failures raised while evaluating eligibility text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("malformed rule value '{value}' for {subject} in clause '{clause}'")]
    MalformedRuleValue {
        subject: Subject,
        clause: String,
        value: String,
    },
}

/// Returns `Ok(false)` when the comparison disqualifies the profile.
pub(crate) fn comparison_passes(
    comparison: &Comparison,
    profile: &ApplicantProfile,
    clause: &str,
) -> Result<bool, EligibilityError> {
    match &comparison.operand {
        Operand::Limit(limit) => {
            let actual = numeric_attribute(profile, comparison.subject);
            Ok(i128::from(actual) <= *limit)
        }
        Operand::Malformed(value) => Err(EligibilityError::MalformedRuleValue {
            subject: comparison.subject,
            clause: clause.to_string(),
            value: value.clone(),
        }),
        Operand::Text(allowed) => {
            if allowed == "any" {
                return Ok(true);
            }
            // Clause text is lower-cased when parsed; only the profile side needs folding.
            let actual = text_attribute(profile, comparison.subject).to_lowercase();
            Ok(match comparison.subject.text_match() {
                TextMatch::Exact => actual == *allowed,
                TextMatch::ContainedIn => allowed.contains(actual.as_str()),
            })
        }
    }
}

fn numeric_attribute(profile: &ApplicantProfile, subject: Subject) -> u64 {
    match subject {
        Subject::Income => profile.income,
        Subject::Turnover => profile.turnover,
        Subject::Age => profile.age,
        _ => 0,
    }
}

fn text_attribute(profile: &ApplicantProfile, subject: Subject) -> &str {
    match subject {
        Subject::Category => &profile.category,
        Subject::Gender => &profile.gender,
        Subject::State => &profile.state,
        Subject::StartupStage => &profile.startup_stage,
        Subject::Industry => &profile.industry,
        _ => "",
    }
}
