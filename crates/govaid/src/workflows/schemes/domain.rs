use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for applicants (students and entrepreneurs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identifier wrapper for catalog schemes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemeId(pub String);

/// Applicant role, doubling as the target group of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantRole {
    Student,
    Entrepreneur,
}

impl ApplicantRole {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantRole::Student => "student",
            ApplicantRole::Entrepreneur => "entrepreneur",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "entrepreneur" => Some(Self::Entrepreneur),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Flat attribute view consumed by the eligibility rules.
///
/// Attributes that do not apply to the applicant's role stay at their
/// defaults (`0` or the empty string).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub income: u64,
    pub turnover: u64,
    pub age: u64,
    pub category: String,
    pub gender: String,
    pub state: String,
    pub startup_stage: String,
    pub industry: String,
}

/// Persisted profile captured from the student profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfileRecord {
    pub state: Option<String>,
    pub category: Option<String>,
    pub annual_income: Option<u64>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub education_level: Option<String>,
    pub course: Option<String>,
}

/// Persisted profile captured from the entrepreneur profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrepreneurProfileRecord {
    pub state: Option<String>,
    pub age: Option<u64>,
    pub industry_type: Option<String>,
    pub startup_stage: Option<String>,
    pub annual_turnover: Option<u64>,
    pub funding_needs: Option<u64>,
}

/// Role-specific profile as stored by the profile repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ProfileRecord {
    Student(StudentProfileRecord),
    Entrepreneur(EntrepreneurProfileRecord),
}

impl ProfileRecord {
    pub const fn role(&self) -> ApplicantRole {
        match self {
            ProfileRecord::Student(_) => ApplicantRole::Student,
            ProfileRecord::Entrepreneur(_) => ApplicantRole::Entrepreneur,
        }
    }

    /// Rebuild the rule-facing profile from the persisted record.
    pub fn applicant_profile(&self) -> ApplicantProfile {
        match self {
            ProfileRecord::Student(record) => ApplicantProfile {
                income: record.annual_income.unwrap_or_default(),
                category: record.category.clone().unwrap_or_default(),
                gender: record.gender.clone().unwrap_or_default(),
                state: record.state.clone().unwrap_or_default(),
                ..ApplicantProfile::default()
            },
            ProfileRecord::Entrepreneur(record) => ApplicantProfile {
                turnover: record.annual_turnover.unwrap_or_default(),
                age: record.age.unwrap_or_default(),
                state: record.state.clone().unwrap_or_default(),
                startup_stage: record.startup_stage.clone().unwrap_or_default(),
                industry: record.industry_type.clone().unwrap_or_default(),
                ..ApplicantProfile::default()
            },
        }
    }
}

/// Administrative listing entry: one applicant and the roles they hold profiles for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSummary {
    pub applicant_id: ApplicantId,
    pub roles: Vec<ApplicantRole>,
}

/// Administrative input for creating or replacing a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDraft {
    pub name: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub link: String,
    pub target_group: ApplicantRole,
}

/// Catalog entry describing a benefit scheme and its raw eligibility text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    pub eligibility: String,
    pub provider: String,
    pub benefits: String,
    pub link: String,
    pub target_group: ApplicantRole,
    pub last_updated: DateTime<Utc>,
}

impl Scheme {
    pub fn from_draft(id: SchemeId, draft: SchemeDraft, last_updated: DateTime<Utc>) -> Self {
        let SchemeDraft {
            name,
            eligibility,
            provider,
            benefits,
            link,
            target_group,
        } = draft;

        Self {
            id,
            name,
            eligibility,
            provider,
            benefits,
            link,
            target_group,
            last_updated,
        }
    }

    pub fn view(&self) -> SchemeView {
        SchemeView {
            name: self.name.clone(),
            eligibility: self.eligibility.clone(),
            provider: self.provider.clone(),
            benefits: self.benefits.clone(),
            link: self.link.clone(),
        }
    }
}

/// Display projection of a scheme returned to applicants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeView {
    pub name: String,
    pub eligibility: String,
    pub provider: String,
    pub benefits: String,
    pub link: String,
}
