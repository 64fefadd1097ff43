use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use govaid::workflows::schemes::{
    scheme_router, ProfileRepository, SchemeMatchingService, SchemeRepository,
};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ServiceStatus {
    Ok,
    Ready,
    Initializing,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusPayload {
    pub(crate) status: ServiceStatus,
}

pub(crate) fn with_scheme_routes<S, P>(service: Arc<SchemeMatchingService<S, P>>) -> axum::Router
where
    S: SchemeRepository + 'static,
    P: ProfileRepository + 'static,
{
    scheme_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<StatusPayload> {
    Json(StatusPayload {
        status: ServiceStatus::Ok,
    })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (
            StatusCode::OK,
            Json(StatusPayload {
                status: ServiceStatus::Ready,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(StatusPayload {
                status: ServiceStatus::Initializing,
            }),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
