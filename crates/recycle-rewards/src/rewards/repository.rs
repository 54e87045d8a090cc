use super::domain::{RedeemedReward, RewardId};
use crate::recycling::{RepositoryError, UserId};

/// Ledger of redemptions, used for balances and remaining stock.
pub trait RedemptionStore: Send + Sync {
    /// Redemptions of `user_id`, newest first.
    fn redeemed(&self, user_id: &UserId) -> Result<Vec<RedeemedReward>, RepositoryError>;
    fn redeemed_count(&self, reward_id: &RewardId) -> Result<u32, RepositoryError>;
    fn record(&self, redemption: RedeemedReward) -> Result<RedeemedReward, RepositoryError>;
}
