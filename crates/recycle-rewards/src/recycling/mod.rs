//! Recycling submissions: material catalog, daily caps, record history, and rankings.
//!
//! `rules::SubmissionEngine` is the pure decision function; `service::RecyclingService`
//! wraps it with a record store and serializes validate-then-append per user.

pub mod badges;
pub mod catalog;
pub mod domain;
pub mod leaderboard;
pub mod levels;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;
pub mod window;

#[cfg(test)]
mod tests;

pub use badges::{Badge, BadgeKind, BadgeProgress, Streaks, BADGES};
pub use catalog::{CatalogError, MaterialCatalog, StaticMaterialCatalog};
pub use domain::{
    InvalidSubmission, Material, MaterialId, RecordId, RecyclingRecord, SubmissionRequest, UserId,
};
pub use leaderboard::{LeaderboardEntry, DEFAULT_LEADERBOARD_SIZE};
pub use levels::{Level, LevelProgress};
pub use repository::{RecordStore, RepositoryError};
pub use router::recycling_router;
pub use rules::{
    RecyclingLimits, RejectionReason, SubmissionEngine, SubmissionOutcome, MAX_POINTS_PER_DAY,
    MAX_RECORDS_PER_DAY,
};
pub use service::{DailyUsage, MaterialUsage, RecyclingService, RecyclingServiceError, UserStanding};
pub use window::DailyWindow;
