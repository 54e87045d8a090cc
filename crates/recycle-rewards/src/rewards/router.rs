use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RedeemedReward, RewardId};
use super::repository::RedemptionStore;
use super::service::{PointsBalance, RedemptionOutcome, RewardAvailability, RewardService};
use crate::error::AppError;
use crate::recycling::{RecordStore, UserId};

/// Router builder exposing the reward catalog, balances, and redemptions.
pub fn rewards_router<S, R>(service: Arc<RewardService<S, R>>) -> Router
where
    S: RedemptionStore + 'static,
    R: RecordStore + 'static,
{
    Router::new()
        .route("/api/v1/rewards", get(rewards_handler::<S, R>))
        .route(
            "/api/v1/rewards/:reward_id/redemptions",
            post(redeem_handler::<S, R>),
        )
        .route(
            "/api/v1/users/:user_id/balance",
            get(balance_handler::<S, R>),
        )
        .route(
            "/api/v1/users/:user_id/redemptions",
            get(redeemed_handler::<S, R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RedemptionRequest {
    pub(crate) user_id: UserId,
}

pub(crate) async fn rewards_handler<S, R>(
    State(service): State<Arc<RewardService<S, R>>>,
) -> Result<Json<Vec<RewardAvailability>>, AppError>
where
    S: RedemptionStore + 'static,
    R: RecordStore + 'static,
{
    Ok(Json(service.rewards()?))
}

pub(crate) async fn redeem_handler<S, R>(
    State(service): State<Arc<RewardService<S, R>>>,
    Path(reward_id): Path<String>,
    Json(request): Json<RedemptionRequest>,
) -> Result<Response, AppError>
where
    S: RedemptionStore + 'static,
    R: RecordStore + 'static,
{
    let response = match service.redeem(&request.user_id, &RewardId(reward_id))? {
        RedemptionOutcome::Redeemed(redemption) => {
            (StatusCode::CREATED, Json(redemption)).into_response()
        }
        RedemptionOutcome::Rejected(rejection) => {
            let payload = json!({
                "kind": rejection.kind(),
                "message": rejection.summary(),
                "details": rejection,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    };
    Ok(response)
}

pub(crate) async fn balance_handler<S, R>(
    State(service): State<Arc<RewardService<S, R>>>,
    Path(user_id): Path<String>,
) -> Result<Json<PointsBalance>, AppError>
where
    S: RedemptionStore + 'static,
    R: RecordStore + 'static,
{
    Ok(Json(service.balance(&UserId(user_id))?))
}

pub(crate) async fn redeemed_handler<S, R>(
    State(service): State<Arc<RewardService<S, R>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RedeemedReward>>, AppError>
where
    S: RedemptionStore + 'static,
    R: RecordStore + 'static,
{
    Ok(Json(service.redeemed(&UserId(user_id))?))
}
