//! Scheme matching for students and entrepreneurs.
//!
//! Each scheme carries free-text eligibility rules such as
//! `income<250000;category=sc,st`. The filter re-tokenizes those rules for
//! every request, checks them against the applicant's profile, and returns the
//! display view of every scheme the applicant qualifies for.

pub mod domain;
pub mod eligibility;
pub mod filter;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicantProfile, ApplicantRole, ApplicantSummary, EntrepreneurProfileRecord,
    ProfileRecord, Scheme, SchemeDraft, SchemeId, SchemeView, StudentProfileRecord,
};
pub use eligibility::{
    EligibilityDecision, EligibilityEngine, EligibilityError, MalformedRulePolicy,
    MatchingConfig,
};
pub use filter::{FilterOutcome, SchemeFilter, SkippedScheme};
pub use repository::{summarize_profiles, ProfileRepository, RepositoryError, SchemeRepository};
pub use router::scheme_router;
pub use service::{MatchingServiceError, SchemeMatchingService};
