use serde::{Deserialize, Serialize};

/// What a filtering pass does when a scheme carries a non-numeric limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRulePolicy {
    /// Fail the whole pass with no partial results.
    #[default]
    Abort,
    /// Leave the offending scheme out and keep going.
    Skip,
}

impl MalformedRulePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" => Some(Self::Abort),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// Matching configuration handed to the scheme filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub malformed_rules: MalformedRulePolicy,
}
