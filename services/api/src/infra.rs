use govaid::error::AppError;
use govaid::workflows::schemes::{
    summarize_profiles, ApplicantId, ApplicantRole, ApplicantSummary, ProfileRecord,
    ProfileRepository, RepositoryError, Scheme, SchemeDraft, SchemeId, SchemeMatchingService,
    SchemeRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog kept in insertion order so filtering preserves source order.
#[derive(Default, Clone)]
pub(crate) struct InMemorySchemeRepository {
    records: Arc<Mutex<Vec<Scheme>>>,
}

impl SchemeRepository for InMemorySchemeRepository {
    fn insert(&self, scheme: Scheme) -> Result<Scheme, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == scheme.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(scheme.clone());
        Ok(scheme)
    }

    fn update(&self, scheme: Scheme) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == scheme.id) {
            Some(slot) => {
                *slot = scheme;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &SchemeId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let position = guard
            .iter()
            .position(|scheme| &scheme.id == id)
            .ok_or(RepositoryError::NotFound)?;
        guard.remove(position);
        Ok(())
    }

    fn fetch(&self, id: &SchemeId) -> Result<Option<Scheme>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|scheme| &scheme.id == id).cloned())
    }

    fn for_target_group(&self, role: ApplicantRole) -> Result<Vec<Scheme>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|scheme| scheme.target_group == role)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<Scheme>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<(ApplicantId, ApplicantRole), ProfileRecord>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn upsert(&self, applicant: &ApplicantId, record: ProfileRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert((applicant.clone(), record.role()), record);
        Ok(())
    }

    fn fetch(
        &self,
        applicant: &ApplicantId,
        role: ApplicantRole,
    ) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&(applicant.clone(), role)).cloned())
    }
    fn delete(&self, applicant: &ApplicantId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|(owner, _), _| owner != applicant);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn list(&self) -> Result<Vec<ApplicantSummary>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(summarize_profiles(guard.keys()))
    }
}

pub(crate) type InMemoryMatchingService =
    SchemeMatchingService<InMemorySchemeRepository, InMemoryProfileRepository>;

pub(crate) fn seed_catalog(
    service: &InMemoryMatchingService,
    drafts: Vec<SchemeDraft>,
) -> Result<usize, AppError> {
    let count = drafts.len();
    for draft in drafts {
        service.add_scheme(draft)?;
    }
    Ok(count)
}

pub(crate) fn load_profile_document(path: &Path) -> Result<ProfileRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&raw)?;
    Ok(record)
}
