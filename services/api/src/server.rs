use crate::cli::ServeArgs;
use crate::infra::{
    duty_manager, AppState, InMemoryAssessmentStore, InMemoryCheckRecordStore,
    InMemoryComplianceConfig,
};
use crate::routes::with_compliance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use complychef::compliance::assessment::AssessmentService;
use complychef::compliance::identity::OrgContext;
use complychef::compliance::monitoring::ShiftMonitoringService;
use complychef::config::AppConfig;
use complychef::error::AppError;
use complychef::telemetry;
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

    let check_store = Arc::new(InMemoryCheckRecordStore::default());
    let compliance_config = Arc::new(InMemoryComplianceConfig::default());
    let monitoring = Arc::new(ShiftMonitoringService::new(check_store, compliance_config));

    let assessment_store = Arc::new(InMemoryAssessmentStore::default());
    let assessments = Arc::new(AssessmentService::new(assessment_store));

    let context = OrgContext::new(config.organization.clone(), duty_manager());

    let app = with_compliance_routes(monitoring, assessments, context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compliance diary service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
