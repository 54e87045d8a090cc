use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Serialize;
use tracing::{info, warn};

use super::badges::{self, BadgeProgress, BadgeStats, PLASTIC_CATEGORY};
use super::catalog::MaterialCatalog;
use super::domain::{
    InvalidSubmission, Material, MaterialId, RecyclingRecord, SubmissionRequest, UserId,
};
use super::leaderboard::{self, LeaderboardEntry};
use super::levels::{self, Level, LevelProgress};
use super::repository::{RecordStore, RepositoryError};
use super::rules::{RecyclingLimits, SubmissionEngine, SubmissionOutcome};
use super::window::DailyWindow;

/// Service composing the material catalog, record store, and submission engine.
pub struct RecyclingService<R, C> {
    store: Arc<R>,
    catalog: Arc<C>,
    engine: SubmissionEngine,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl<R, C> RecyclingService<R, C>
where
    R: RecordStore + 'static,
    C: MaterialCatalog + 'static,
{
    pub fn new(store: Arc<R>, catalog: Arc<C>, limits: RecyclingLimits) -> Self {
        Self {
            store,
            catalog,
            engine: SubmissionEngine::new(limits),
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn limits(&self) -> &RecyclingLimits {
        self.engine.limits()
    }

    pub fn materials(&self) -> Vec<Material> {
        self.catalog.materials()
    }

    pub fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, RecyclingServiceError> {
        self.submit_at(request, &Local::now())
    }

    /// Validate and, when accepted, append the new record.
    ///
    /// Reading today's records, deciding, and appending run under a per-user
    /// lock so concurrent submissions from one user cannot overrun a cap.
    pub fn submit_at<Tz: TimeZone>(
        &self,
        request: SubmissionRequest,
        now: &DateTime<Tz>,
    ) -> Result<SubmissionOutcome, RecyclingServiceError> {
        request.validate()?;

        let user_lock = self.acquire_user_lock(&request.user_id);
        let result = {
            let _serialized = user_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.decide_and_append(&request, now)
        };
        self.release_user_lock(&request.user_id, user_lock);
        result
    }

    fn decide_and_append<Tz: TimeZone>(
        &self,
        request: &SubmissionRequest,
        now: &DateTime<Tz>,
    ) -> Result<SubmissionOutcome, RecyclingServiceError> {
        let window = DailyWindow::containing(now);
        let todays = self
            .store
            .records_between(&request.user_id, &window)
            .inspect_err(|err| warn!(user = %request.user_id, %err, "record store read failed"))?;

        let outcome = self
            .engine
            .submit_at(request, &todays, self.catalog.as_ref(), now)?;

        match &outcome {
            SubmissionOutcome::Accepted(record) => {
                self.store.append(record.clone()).inspect_err(
                    |err| warn!(user = %request.user_id, %err, "record store append failed"),
                )?;
                info!(
                    user = %record.user_id,
                    material = %record.material_id,
                    quantity = record.quantity,
                    points = record.points_earned,
                    "recycling submission accepted"
                );
            }
            SubmissionOutcome::Rejected(reason) => {
                info!(
                    user = %request.user_id,
                    material = %request.material_id,
                    kind = reason.kind(),
                    "recycling submission rejected"
                );
            }
        }

        Ok(outcome)
    }

    pub fn history(&self, user_id: &UserId) -> Result<Vec<RecyclingRecord>, RecyclingServiceError> {
        Ok(self.store.history(user_id)?)
    }

    pub fn daily_usage(&self, user_id: &UserId) -> Result<DailyUsage, RecyclingServiceError> {
        self.daily_usage_at(user_id, &Local::now())
    }

    /// Today's consumption of every cap, for rendering remaining allowances.
    pub fn daily_usage_at<Tz: TimeZone>(
        &self,
        user_id: &UserId,
        now: &DateTime<Tz>,
    ) -> Result<DailyUsage, RecyclingServiceError> {
        let window = DailyWindow::containing(now);
        let todays = self.store.records_between(user_id, &window)?;
        let limits = self.engine.limits();

        let records_today = todays.len();
        let points_today: f64 = todays.iter().map(|record| record.points_earned).sum();

        let materials = self
            .catalog
            .materials()
            .into_iter()
            .map(|material| {
                let used_today: f64 = todays
                    .iter()
                    .filter(|record| record.material_id == material.id)
                    .map(|record| record.quantity)
                    .sum();
                MaterialUsage {
                    remaining: material
                        .max_quantity_per_day
                        .map(|cap| (cap - used_today).max(0.0)),
                    material_id: material.id,
                    material_name: material.name,
                    used_today,
                }
            })
            .collect();

        Ok(DailyUsage {
            user_id: user_id.clone(),
            day: window.day,
            records_today,
            remaining_records: limits.max_records_per_day.saturating_sub(records_today),
            points_today,
            remaining_points: (limits.max_points_per_day - points_today).max(0.0),
            materials,
        })
    }

    pub fn standing(&self, user_id: &UserId) -> Result<UserStanding, RecyclingServiceError> {
        self.standing_at(user_id, &Local::now())
    }

    /// Lifetime totals, level, streaks and badges for one user.
    pub fn standing_at<Tz: TimeZone>(
        &self,
        user_id: &UserId,
        now: &DateTime<Tz>,
    ) -> Result<UserStanding, RecyclingServiceError> {
        let history = self.store.history(user_id)?;
        let total_points: f64 = history.iter().map(|record| record.points_earned).sum();
        let total_recycled_items: f64 = history.iter().map(|record| record.quantity).sum();

        let plastic: HashSet<MaterialId> = self
            .catalog
            .materials()
            .into_iter()
            .filter(|material| material.category == PLASTIC_CATEGORY)
            .map(|material| material.id)
            .collect();
        let plastic_items: f64 = history
            .iter()
            .filter(|record| plastic.contains(&record.material_id))
            .map(|record| record.quantity)
            .sum();

        let streaks = badges::streaks(&history, now);
        let badges = badges::evaluate(&BadgeStats {
            records: history.len(),
            total_points,
            longest_streak: streaks.longest,
            plastic_items,
        });

        Ok(UserStanding {
            user_id: user_id.clone(),
            total_points,
            total_recycled_items,
            records: history.len(),
            level: levels::level_for(total_points),
            progress: levels::progress(total_points),
            current_streak: streaks.current,
            longest_streak: streaks.longest,
            badges,
        })
    }

    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, RecyclingServiceError> {
        let records = self.store.all_records()?;
        Ok(leaderboard::rank(&records, limit))
    }

    fn acquire_user_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(user_id.clone()).or_default().clone()
    }

    /// Drops the map entry once no other submission for the user holds it.
    fn release_user_lock(&self, user_id: &UserId, user_lock: Arc<Mutex<()>>) {
        let mut locks = self.user_locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here.
        if Arc::strong_count(&user_lock) == 2 {
            locks.remove(user_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_user_locks(&self) -> usize {
        self.user_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyUsage {
    pub user_id: UserId,
    pub day: NaiveDate,
    pub records_today: usize,
    pub remaining_records: usize,
    pub points_today: f64,
    pub remaining_points: f64,
    pub materials: Vec<MaterialUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialUsage {
    pub material_id: MaterialId,
    pub material_name: String,
    pub used_today: f64,
    /// `None` when the material has no daily cap.
    pub remaining: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStanding {
    pub user_id: UserId,
    pub total_points: f64,
    pub total_recycled_items: f64,
    pub records: usize,
    pub level: Level,
    pub progress: LevelProgress,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub badges: Vec<BadgeProgress>,
}

/// Error raised by the recycling service.
#[derive(Debug, thiserror::Error)]
pub enum RecyclingServiceError {
    #[error(transparent)]
    Invalid(#[from] InvalidSubmission),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
