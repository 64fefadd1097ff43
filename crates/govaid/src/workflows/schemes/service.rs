use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    ApplicantId, ApplicantProfile, ApplicantRole, ApplicantSummary, ProfileRecord, Scheme,
    SchemeDraft, SchemeId,
};
use super::eligibility::{EligibilityError, MatchingConfig};
use super::filter::{FilterOutcome, SchemeFilter};
use super::repository::{ProfileRepository, RepositoryError, SchemeRepository};

/// Service composing the scheme catalog, profile store, and eligibility filter.
pub struct SchemeMatchingService<S, P> {
    schemes: Arc<S>,
    profiles: Arc<P>,
    filter: Arc<SchemeFilter>,
}

static SCHEME_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_scheme_id() -> SchemeId {
    let id = SCHEME_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SchemeId(format!("scheme-{id:06}"))
}

impl<S, P> SchemeMatchingService<S, P>
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    pub fn new(schemes: Arc<S>, profiles: Arc<P>, config: MatchingConfig) -> Self {
        Self {
            schemes,
            profiles,
            filter: Arc::new(SchemeFilter::new(config)),
        }
    }

    /// Schemes the applicant qualifies for under the given role.
    pub fn eligible_schemes(
        &self,
        applicant: &ApplicantId,
        role: ApplicantRole,
    ) -> Result<FilterOutcome, MatchingServiceError> {
        let record = self
            .profiles
            .fetch(applicant, role)?
            .ok_or(MatchingServiceError::ProfileIncomplete { role })?;

        let profile = record.applicant_profile();
        let schemes = self.schemes.for_target_group(role)?;
        let outcome = self.filter.filter(role, &profile, &schemes)?;

        info!(
            applicant = %applicant.0,
            %role,
            considered = schemes.len(),
            matched = outcome.schemes.len(),
            skipped = outcome.skipped.len(),
            "scheme matching completed"
        );
        Ok(outcome)
    }

    /// Store the applicant's profile for the record's role, replacing any previous one.
    pub fn save_profile(
        &self,
        applicant: &ApplicantId,
        record: ProfileRecord,
    ) -> Result<ApplicantProfile, MatchingServiceError> {
        let profile = record.applicant_profile();
        let role = record.role();
        self.profiles.upsert(applicant, record)?;
        info!(applicant = %applicant.0, %role, "applicant profile saved");
        Ok(profile)
    }

    /// Drop the applicant's student and entrepreneur profiles.
    pub fn delete_applicant(&self, applicant: &ApplicantId) -> Result<(), MatchingServiceError> {
        self.profiles.delete(applicant)?;
        info!(applicant = %applicant.0, "applicant profiles deleted");
        Ok(())
    }

    pub fn list_applicants(&self) -> Result<Vec<ApplicantSummary>, MatchingServiceError> {
        Ok(self.profiles.list()?)
    }

    pub fn add_scheme(&self, draft: SchemeDraft) -> Result<Scheme, MatchingServiceError> {
        let scheme = Scheme::from_draft(next_scheme_id(), draft, Utc::now());
        let stored = self.schemes.insert(scheme)?;
        info!(scheme = %stored.id.0, target_group = %stored.target_group, "scheme added");
        Ok(stored)
    }

    pub fn update_scheme(
        &self,
        id: &SchemeId,
        draft: SchemeDraft,
    ) -> Result<Scheme, MatchingServiceError> {
        let existing = self.schemes.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let scheme = Scheme::from_draft(existing.id, draft, Utc::now());
        self.schemes.update(scheme.clone())?;
        Ok(scheme)
    }

    pub fn delete_scheme(&self, id: &SchemeId) -> Result<(), MatchingServiceError> {
        self.schemes.delete(id)?;
        info!(scheme = %id.0, "scheme deleted");
        Ok(())
    }

    pub fn get_scheme(&self, id: &SchemeId) -> Result<Scheme, MatchingServiceError> {
        let scheme = self.schemes.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(scheme)
    }

    pub fn list_schemes(
        &self,
        target_group: Option<ApplicantRole>,
    ) -> Result<Vec<Scheme>, MatchingServiceError> {
        let schemes = match target_group {
            Some(role) => self.schemes.for_target_group(role)?,
            None => self.schemes.all()?,
        };
        Ok(schemes)
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error("profile incomplete: no {role} profile on record")]
    ProfileIncomplete { role: ApplicantRole },
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
