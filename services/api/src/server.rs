use crate::cli::ServeArgs;
use crate::infra::{seed_catalog, AppState, InMemoryProfileRepository, InMemorySchemeRepository};
use crate::routes::with_scheme_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use govaid::config::AppConfig;
use govaid::error::AppError;
use govaid::telemetry;
use govaid::workflows::catalog::SchemeCatalogImporter;
use govaid::workflows::schemes::SchemeMatchingService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let matching_service = Arc::new(SchemeMatchingService::new(
        Arc::new(InMemorySchemeRepository::default()),
        Arc::new(InMemoryProfileRepository::default()),
        config.matching,
    ));

    if let Some(path) = &config.catalog.path {
        let drafts = SchemeCatalogImporter::from_path(path)?;
        let seeded = seed_catalog(&matching_service, drafts)?;
        info!(seeded, catalog = %path.display(), "scheme catalog loaded");
    }

    let app = with_scheme_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        malformed_rules = ?config.matching.malformed_rules,
        %addr,
        "scheme matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
