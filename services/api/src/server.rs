use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentStore, InMemoryProjectRepository};
use crate::routes::with_application_routes;
use aracnidata::assessment::AssessmentService;
use aracnidata::config::AppConfig;
use aracnidata::consultation::Consultant;
use aracnidata::error::AppError;
use aracnidata::projects::{HttpProjectEvaluator, ProjectService};
use aracnidata::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
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

    let assessments = Arc::new(AssessmentService::new(Arc::new(
        InMemoryAssessmentStore::with_capacity(config.store.capacity),
    )));
    let evaluator = Arc::new(HttpProjectEvaluator::new(config.evaluator.endpoint.clone()));
    let projects = Arc::new(ProjectService::new(
        Arc::new(InMemoryProjectRepository::with_capacity(
            config.store.capacity,
        )),
        evaluator,
    ));
    let consultant = Arc::new(Consultant::new(config.consultation.reply_delay));

    let app = with_application_routes(assessments, projects, consultant)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        evaluator = %config.evaluator.endpoint,
        "compliance assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
