use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ApplicantId, ApplicantProfile, ApplicantRole, ProfileRecord, SchemeDraft, SchemeId,
};
use super::eligibility::{EligibilityDecision, EligibilityEngine};
use super::filter::FilterOutcome;
use super::repository::{ProfileRepository, RepositoryError, SchemeRepository};
use super::service::{MatchingServiceError, SchemeMatchingService};

/// Router builder exposing applicant matching and catalog administration endpoints.
pub fn scheme_router<S, P>(service: Arc<SchemeMatchingService<S, P>>) -> Router
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/applicants", get(list_applicants_handler::<S, P>))
        .route(
            "/api/v1/applicants/:applicant_id",
            delete(delete_applicant_handler::<S, P>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/schemes",
            get(eligible_schemes_handler::<S, P>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/profile",
            put(save_profile_handler::<S, P>),
        )
        .route(
            "/api/v1/schemes",
            get(list_schemes_handler::<S, P>).post(add_scheme_handler::<S, P>),
        )
        .route(
            "/api/v1/schemes/:scheme_id",
            get(get_scheme_handler::<S, P>)
                .put(update_scheme_handler::<S, P>)
                .delete(delete_scheme_handler::<S, P>),
        )
        .route("/api/v1/eligibility/check", post(check_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleQuery {
    pub(crate) role: ApplicantRole,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogQuery {
    #[serde(default)]
    pub(crate) target_group: Option<ApplicantRole>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibleSchemesResponse {
    pub(crate) applicant_id: ApplicantId,
    pub(crate) role: ApplicantRole,
    #[serde(flatten)]
    pub(crate) outcome: FilterOutcome,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityCheckRequest {
    #[serde(default)]
    pub(crate) eligibility: String,
    #[serde(default)]
    pub(crate) profile: ApplicantProfile,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityCheckResponse {
    pub(crate) eligible: bool,
    pub(crate) decision: EligibilityDecision,
    pub(crate) reason: String,
}

pub(crate) async fn eligible_schemes_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Path(applicant_id): Path<String>,
    Query(query): Query<RoleQuery>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    let applicant_id = ApplicantId(applicant_id);
    match service.eligible_schemes(&applicant_id, query.role) {
        Ok(outcome) => {
            let body = EligibleSchemesResponse {
                applicant_id,
                role: query.role,
                outcome,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_profile_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Path(applicant_id): Path<String>,
    Json(record): Json<ProfileRecord>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    let applicant_id = ApplicantId(applicant_id);
    let role = record.role();
    match service.save_profile(&applicant_id, record) {
        Ok(profile) => {
            let payload = json!({
                "applicant_id": applicant_id,
                "role": role,
                "profile": profile,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_applicants_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.list_applicants() {
        Ok(applicants) => (StatusCode::OK, Json(applicants)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_applicant_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.delete_applicant(&ApplicantId(applicant_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_schemes_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Query(query): Query<CatalogQuery>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.list_schemes(query.target_group) {
        Ok(schemes) => (StatusCode::OK, Json(schemes)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_scheme_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Json(draft): Json<SchemeDraft>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.add_scheme(draft) {
        Ok(scheme) => (StatusCode::CREATED, Json(scheme)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_scheme_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Path(scheme_id): Path<String>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.get_scheme(&SchemeId(scheme_id)) {
        Ok(scheme) => (StatusCode::OK, Json(scheme)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_scheme_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Path(scheme_id): Path<String>,
    Json(draft): Json<SchemeDraft>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.update_scheme(&SchemeId(scheme_id), draft) {
        Ok(scheme) => (StatusCode::OK, Json(scheme)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_scheme_handler<S, P>(
    State(service): State<Arc<SchemeMatchingService<S, P>>>,
    Path(scheme_id): Path<String>,
) -> Response
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    match service.delete_scheme(&SchemeId(scheme_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_handler(Json(request): Json<EligibilityCheckRequest>) -> Response {
    let engine = EligibilityEngine::new();
    match engine.evaluate(&request.eligibility, &request.profile) {
        Ok(decision) => {
            let body = EligibilityCheckResponse {
                eligible: decision.is_eligible(),
                reason: decision.summary(),
                decision,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(MatchingServiceError::Eligibility(error)),
    }
}

fn error_response(error: MatchingServiceError) -> Response {
    let (status, kind) = match &error {
        MatchingServiceError::ProfileIncomplete { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "profile_incomplete")
        }
        MatchingServiceError::Eligibility(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "malformed_rule_value")
        }
        MatchingServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        MatchingServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "conflict")
        }
        MatchingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "repository_unavailable")
        }
    };

    let payload = json!({
        "status": kind,
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
