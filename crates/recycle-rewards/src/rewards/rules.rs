use serde::Serialize;

use super::domain::{Reward, RewardId};

/// Why a redemption cannot go ahead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RedemptionRejection {
    RewardNotFound {
        reward_id: RewardId,
    },
    InsufficientPoints {
        required: f64,
        available: f64,
        missing: f64,
    },
    OutOfStock {
        reward_id: RewardId,
    },
}

impl RedemptionRejection {
    pub const fn kind(&self) -> &'static str {
        match self {
            RedemptionRejection::RewardNotFound { .. } => "reward_not_found",
            RedemptionRejection::InsufficientPoints { .. } => "insufficient_points",
            RedemptionRejection::OutOfStock { .. } => "out_of_stock",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            RedemptionRejection::RewardNotFound { reward_id } => {
                format!("reward {reward_id} does not exist")
            }
            RedemptionRejection::InsufficientPoints { missing, .. } => {
                format!("needs {missing} more points")
            }
            RedemptionRejection::OutOfStock { reward_id } => {
                format!("reward {reward_id} is out of stock")
            }
        }
    }
}

/// Balance check first, stock second.
pub(crate) fn check_redemption(
    reward: &Reward,
    balance: f64,
    remaining_stock: u32,
) -> Result<(), RedemptionRejection> {
    if balance < reward.points_required {
        return Err(RedemptionRejection::InsufficientPoints {
            required: reward.points_required,
            available: balance,
            missing: reward.points_required - balance,
        });
    }

    if remaining_stock == 0 {
        return Err(RedemptionRejection::OutOfStock {
            reward_id: reward.id.clone(),
        });
    }

    Ok(())
}
