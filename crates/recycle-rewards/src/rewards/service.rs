use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::catalog::StaticRewardCatalog;
use super::domain::{RedeemedReward, RedemptionStatus, Reward, RewardId};
use super::repository::RedemptionStore;
use super::rules::{check_redemption, RedemptionRejection};
use crate::recycling::{RecordStore, RepositoryError, UserId};

/// Exchanges earned points for rewards while keeping stock and balances consistent.
pub struct RewardService<S, R> {
    redemptions: Arc<S>,
    records: Arc<R>,
    catalog: StaticRewardCatalog,
    ledger_lock: Mutex<()>,
}

impl<S, R> RewardService<S, R>
where
    S: RedemptionStore + 'static,
    R: RecordStore + 'static,
{
    pub fn new(redemptions: Arc<S>, records: Arc<R>, catalog: StaticRewardCatalog) -> Self {
        Self {
            redemptions,
            records,
            catalog,
            ledger_lock: Mutex::new(()),
        }
    }

    pub fn rewards(&self) -> Result<Vec<RewardAvailability>, RewardServiceError> {
        self.catalog
            .rewards()
            .map(|reward| {
                let remaining_stock = self.remaining_stock(reward)?;
                Ok(RewardAvailability {
                    reward: reward.clone(),
                    remaining_stock,
                })
            })
            .collect()
    }

    pub fn balance(&self, user_id: &UserId) -> Result<PointsBalance, RewardServiceError> {
        let earned: f64 = self
            .records
            .history(user_id)?
            .iter()
            .map(|record| record.points_earned)
            .sum();
        let spent: f64 = self
            .redemptions
            .redeemed(user_id)?
            .iter()
            .map(|redemption| redemption.points_spent)
            .sum();

        Ok(PointsBalance {
            user_id: user_id.clone(),
            earned,
            spent,
            available: earned - spent,
        })
    }

    pub fn redeemed(&self, user_id: &UserId) -> Result<Vec<RedeemedReward>, RewardServiceError> {
        Ok(self.redemptions.redeemed(user_id)?)
    }

    pub fn redeem(
        &self,
        user_id: &UserId,
        reward_id: &RewardId,
    ) -> Result<RedemptionOutcome, RewardServiceError> {
        self.redeem_at(user_id, reward_id, Utc::now())
    }

    /// Balance, stock, and ledger write happen under one lock.
    pub fn redeem_at(
        &self,
        user_id: &UserId,
        reward_id: &RewardId,
        now: DateTime<Utc>,
    ) -> Result<RedemptionOutcome, RewardServiceError> {
        if user_id.0.trim().is_empty() {
            return Err(RewardServiceError::MissingUser);
        }

        let _serialized = self
            .ledger_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(reward) = self.catalog.reward(reward_id) else {
            return Ok(RedemptionOutcome::Rejected(
                RedemptionRejection::RewardNotFound {
                    reward_id: reward_id.clone(),
                },
            ));
        };

        let balance = self.balance(user_id)?;
        let remaining_stock = self.remaining_stock(reward)?;
        if let Err(rejection) = check_redemption(reward, balance.available, remaining_stock) {
            info!(user = %user_id, reward = %reward_id, kind = rejection.kind(), "redemption rejected");
            return Ok(RedemptionOutcome::Rejected(rejection));
        }

        let redemption = self.redemptions.record(RedeemedReward {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.clone(),
            reward_id: reward.id.clone(),
            reward_name: reward.name.clone(),
            points_spent: reward.points_required,
            redeemed_at: now,
            status: RedemptionStatus::Pending,
        })?;

        info!(
            user = %user_id,
            reward = %reward_id,
            points = redemption.points_spent,
            "reward redeemed"
        );
        Ok(RedemptionOutcome::Redeemed(redemption))
    }

    fn remaining_stock(&self, reward: &Reward) -> Result<u32, RewardServiceError> {
        let redeemed = self.redemptions.redeemed_count(&reward.id)?;
        Ok(reward.stock.saturating_sub(redeemed))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardAvailability {
    #[serde(flatten)]
    pub reward: Reward,
    pub remaining_stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsBalance {
    pub user_id: UserId,
    pub earned: f64,
    pub spent: f64,
    pub available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RedemptionOutcome {
    Redeemed(RedeemedReward),
    Rejected(RedemptionRejection),
}

#[derive(Debug, thiserror::Error)]
pub enum RewardServiceError {
    #[error("user id must not be empty")]
    MissingUser,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
