use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRecordStore, InMemoryRedemptionStore};
use crate::routes::with_recycling_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recycle_rewards::config::AppConfig;
use recycle_rewards::error::AppError;
use recycle_rewards::recycling::{RecyclingService, StaticMaterialCatalog};
use recycle_rewards::rewards::{RewardService, StaticRewardCatalog};
use recycle_rewards::telemetry;
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

    let records = Arc::new(InMemoryRecordStore::default());
    let recycling_service = Arc::new(RecyclingService::new(
        records.clone(),
        Arc::new(StaticMaterialCatalog::standard()),
        config.limits,
    ));
    let reward_service = Arc::new(RewardService::new(
        Arc::new(InMemoryRedemptionStore::default()),
        records,
        StaticRewardCatalog::standard(),
    ));

    let app = with_recycling_routes(recycling_service, reward_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_records_per_day = config.limits.max_records_per_day,
        max_points_per_day = config.limits.max_points_per_day,
        "recycling rewards service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
