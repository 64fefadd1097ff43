use std::collections::BTreeMap;

use super::domain::{ApplicantId, ApplicantRole, ApplicantSummary, ProfileRecord, Scheme, SchemeId};

/// Storage abstraction for the scheme catalog.
pub trait SchemeRepository: Send + Sync {
    fn insert(&self, scheme: Scheme) -> Result<Scheme, RepositoryError>;
    fn update(&self, scheme: Scheme) -> Result<(), RepositoryError>;
    fn delete(&self, id: &SchemeId) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SchemeId) -> Result<Option<Scheme>, RepositoryError>;
    /// Schemes for one target group, in catalog order.
    fn for_target_group(&self, role: ApplicantRole) -> Result<Vec<Scheme>, RepositoryError>;
    fn all(&self) -> Result<Vec<Scheme>, RepositoryError>;
}

/// Storage abstraction for role-specific applicant profiles.
///
/// An applicant holds at most one profile per role; `upsert` replaces it.
pub trait ProfileRepository: Send + Sync {
    fn upsert(&self, applicant: &ApplicantId, record: ProfileRecord)
        -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        applicant: &ApplicantId,
        role: ApplicantRole,
    ) -> Result<Option<ProfileRecord>, RepositoryError>;
    /// Remove every profile the applicant holds; `NotFound` when there is none.
    fn delete(&self, applicant: &ApplicantId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<ApplicantSummary>, RepositoryError>;
}

/// Group `(applicant, role)` profile keys into summaries ordered by applicant id.
pub fn summarize_profiles<'a, I>(keys: I) -> Vec<ApplicantSummary>
where
    I: IntoIterator<Item = &'a (ApplicantId, ApplicantRole)>,
{
    let mut grouped: BTreeMap<&ApplicantId, Vec<ApplicantRole>> = BTreeMap::new();
    for (applicant, role) in keys {
        grouped.entry(applicant).or_default().push(*role);
    }

    grouped
        .into_iter()
        .map(|(applicant, mut roles)| {
            roles.sort();
            roles.dedup();
            ApplicantSummary {
                applicant_id: applicant.clone(),
                roles,
            }
        })
        .collect()
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
