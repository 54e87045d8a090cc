//! Reward catalog and point redemption.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;


pub use catalog::StaticRewardCatalog;
pub use domain::{RedeemedReward, RedemptionStatus, Reward, RewardCategory, RewardId};
pub use repository::RedemptionStore;
pub use router::rewards_router;
pub use rules::RedemptionRejection;
pub use service::{
    PointsBalance, RedemptionOutcome, RewardAvailability, RewardService, RewardServiceError,
};
