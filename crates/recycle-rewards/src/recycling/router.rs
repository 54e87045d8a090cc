use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::MaterialCatalog;
use super::domain::{RecyclingRecord, SubmissionRequest, UserId};
use super::leaderboard::{LeaderboardEntry, DEFAULT_LEADERBOARD_SIZE};
use super::repository::RecordStore;
use super::rules::SubmissionOutcome;
use super::service::{DailyUsage, RecyclingService, UserStanding};
use crate::error::AppError;

/// Router builder exposing HTTP endpoints for submissions, history, and rankings.
pub fn recycling_router<R, C>(service: Arc<RecyclingService<R, C>>) -> Router
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    Router::new()
        .route("/api/v1/materials", get(materials_handler::<R, C>))
        .route(
            "/api/v1/recycling/submissions",
            post(submit_handler::<R, C>),
        )
        .route(
            "/api/v1/users/:user_id/records",
            get(history_handler::<R, C>),
        )
        .route(
            "/api/v1/users/:user_id/today",
            get(daily_usage_handler::<R, C>),
        )
        .route(
            "/api/v1/users/:user_id/standing",
            get(standing_handler::<R, C>),
        )
        .route("/api/v1/leaderboard", get(leaderboard_handler::<R, C>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeaderboardQuery {
    #[serde(default)]
    limit: Option<usize>,
}

pub(crate) async fn materials_handler<R, C>(
    State(service): State<Arc<RecyclingService<R, C>>>,
) -> Response
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    Json(service.materials()).into_response()
}

pub(crate) async fn submit_handler<R, C>(
    State(service): State<Arc<RecyclingService<R, C>>>,
    Json(request): Json<SubmissionRequest>,
) -> Result<Response, AppError>
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    let response = match service.submit(request)? {
        SubmissionOutcome::Accepted(record) => (StatusCode::CREATED, Json(record)).into_response(),
        SubmissionOutcome::Rejected(reason) => {
            let payload = json!({
                "kind": reason.kind(),
                "message": reason.summary(),
                "details": reason,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    };
    Ok(response)
}

pub(crate) async fn history_handler<R, C>(
    State(service): State<Arc<RecyclingService<R, C>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RecyclingRecord>>, AppError>
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    Ok(Json(service.history(&UserId(user_id))?))
}

pub(crate) async fn daily_usage_handler<R, C>(
    State(service): State<Arc<RecyclingService<R, C>>>,
    Path(user_id): Path<String>,
) -> Result<Json<DailyUsage>, AppError>
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    Ok(Json(service.daily_usage(&UserId(user_id))?))
}

pub(crate) async fn standing_handler<R, C>(
    State(service): State<Arc<RecyclingService<R, C>>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserStanding>, AppError>
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    Ok(Json(service.standing(&UserId(user_id))?))
}

pub(crate) async fn leaderboard_handler<R, C>(
    State(service): State<Arc<RecyclingService<R, C>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError>
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE);
    Ok(Json(service.leaderboard(limit)?))
}
