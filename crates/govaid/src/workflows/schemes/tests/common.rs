use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::schemes::domain::{
    ApplicantId, ApplicantProfile, ApplicantRole, ApplicantSummary, EntrepreneurProfileRecord,
    ProfileRecord, Scheme, SchemeDraft, SchemeId, StudentProfileRecord,
};
use crate::workflows::schemes::eligibility::{MalformedRulePolicy, MatchingConfig};
use crate::workflows::schemes::repository::{
    summarize_profiles, ProfileRepository, RepositoryError, SchemeRepository,
};
use crate::workflows::schemes::{scheme_router, SchemeMatchingService};

pub(super) fn scheme(name: &str, eligibility: &str, target_group: ApplicantRole) -> Scheme {
    Scheme {
        id: SchemeId(format!("scheme-{}", name.to_lowercase().replace(' ', "-"))),
        name: name.to_string(),
        eligibility: eligibility.to_string(),
        provider: "Ministry of Education".to_string(),
        benefits: format!("{name} benefits"),
        link: format!("https://schemes.example.gov/{}", name.to_lowercase()),
        target_group,
        last_updated: Utc
            .with_ymd_and_hms(2025, 4, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn draft(name: &str, eligibility: &str, target_group: ApplicantRole) -> SchemeDraft {
    SchemeDraft {
        name: name.to_string(),
        eligibility: eligibility.to_string(),
        provider: "Department of Social Justice".to_string(),
        benefits: "Tuition waiver".to_string(),
        link: "https://schemes.example.gov/apply".to_string(),
        target_group,
    }
}

pub(super) fn student_profile(income: u64, state: &str) -> ApplicantProfile {
    ApplicantProfile {
        income,
        category: "OBC".to_string(),
        gender: "Female".to_string(),
        state: state.to_string(),
        ..ApplicantProfile::default()
    }
}

pub(super) fn entrepreneur_profile(turnover: u64, age: u64) -> ApplicantProfile {
    ApplicantProfile {
        turnover,
        age,
        state: "Karnataka".to_string(),
        startup_stage: "Seed".to_string(),
        industry: "Tech".to_string(),
        ..ApplicantProfile::default()
    }
}

pub(super) fn student_record(annual_income: u64) -> ProfileRecord {
    ProfileRecord::Student(StudentProfileRecord {
        state: Some("Maharashtra".to_string()),
        category: Some("SC".to_string()),
        annual_income: Some(annual_income),
        gender: Some("Female".to_string()),
        education_level: Some("Undergraduate".to_string()),
        course: Some("B.Sc Physics".to_string()),
        ..StudentProfileRecord::default()
    })
}

pub(super) fn entrepreneur_record(annual_turnover: u64) -> ProfileRecord {
    ProfileRecord::Entrepreneur(EntrepreneurProfileRecord {
        state: Some("Kerala".to_string()),
        age: Some(29),
        industry_type: Some("Agritech".to_string()),
        startup_stage: Some("Early Traction".to_string()),
        annual_turnover: Some(annual_turnover),
        funding_needs: Some(1_500_000),
    })
}

pub(super) fn applicant(id: &str) -> ApplicantId {
    ApplicantId(id.to_string())
}

pub(super) fn matching_config(policy: MalformedRulePolicy) -> MatchingConfig {
    MatchingConfig {
        malformed_rules: policy,
    }
}

pub(super) type MemoryService = SchemeMatchingService<MemorySchemes, MemoryProfiles>;

pub(super) fn build_service(
    policy: MalformedRulePolicy,
) -> (MemoryService, Arc<MemorySchemes>, Arc<MemoryProfiles>) {
    let schemes = Arc::new(MemorySchemes::default());
    let profiles = Arc::new(MemoryProfiles::default());
    let service =
        SchemeMatchingService::new(schemes.clone(), profiles.clone(), matching_config(policy));
    (service, schemes, profiles)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    scheme_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemorySchemes {
    records: Arc<Mutex<Vec<Scheme>>>,
}

impl MemorySchemes {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("scheme mutex poisoned").len()
    }
}

impl SchemeRepository for MemorySchemes {
    fn insert(&self, scheme: Scheme) -> Result<Scheme, RepositoryError> {
        let mut guard = self.records.lock().expect("scheme mutex poisoned");
        if guard.iter().any(|existing| existing.id == scheme.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(scheme.clone());
        Ok(scheme)
    }

    fn update(&self, scheme: Scheme) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("scheme mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == scheme.id) {
            Some(slot) => {
                *slot = scheme;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &SchemeId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("scheme mutex poisoned");
        let before = guard.len();
        guard.retain(|scheme| &scheme.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn fetch(&self, id: &SchemeId) -> Result<Option<Scheme>, RepositoryError> {
        let guard = self.records.lock().expect("scheme mutex poisoned");
        Ok(guard.iter().find(|scheme| &scheme.id == id).cloned())
    }

    fn for_target_group(&self, role: ApplicantRole) -> Result<Vec<Scheme>, RepositoryError> {
        let guard = self.records.lock().expect("scheme mutex poisoned");
        Ok(guard
            .iter()
            .filter(|scheme| scheme.target_group == role)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<Scheme>, RepositoryError> {
        Ok(self.records.lock().expect("scheme mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    records: Arc<Mutex<HashMap<(ApplicantId, ApplicantRole), ProfileRecord>>>,
}

impl ProfileRepository for MemoryProfiles {
    fn upsert(&self, applicant: &ApplicantId, record: ProfileRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        guard.insert((applicant.clone(), record.role()), record);
        Ok(())
    }

    fn fetch(
        &self,
        applicant: &ApplicantId,
        role: ApplicantRole,
    ) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(guard.get(&(applicant.clone(), role)).cloned())
    }
    fn delete(&self, applicant: &ApplicantId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        let before = guard.len();
        guard.retain(|(owner, _), _| owner != applicant);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn list(&self) -> Result<Vec<ApplicantSummary>, RepositoryError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(summarize_profiles(guard.keys()))
    }
}

pub(super) struct UnavailableProfiles;

impl ProfileRepository for UnavailableProfiles {
    fn upsert(
        &self,
        _applicant: &ApplicantId,
        _record: ProfileRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _applicant: &ApplicantId,
        _role: ApplicantRole,
    ) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
    fn delete(&self, _applicant: &ApplicantId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ApplicantSummary>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
