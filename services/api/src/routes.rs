use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use recycle_rewards::recycling::{
    recycling_router, MaterialCatalog, RecordStore, RecyclingService,
};
use recycle_rewards::rewards::{rewards_router, RedemptionStore, RewardService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recycling_routes<R, C, S>(
    recycling: Arc<RecyclingService<R, C>>,
    rewards: Arc<RewardService<S, R>>,
) -> axum::Router
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
    S: RedemptionStore + 'static,
{
    recycling_router(recycling)
        .merge(rewards_router(rewards))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
