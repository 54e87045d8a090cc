use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use recycle_rewards::recycling::{
    DailyWindow, RecordStore, RecyclingRecord, RepositoryError, UserId,
};
use recycle_rewards::rewards::{RedeemedReward, RedemptionStore, RewardId};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Append-only record log kept in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRecordStore {
    records: Arc<Mutex<Vec<RecyclingRecord>>>,
}

impl RecordStore for InMemoryRecordStore {
    fn records_between(
        &self,
        user_id: &UserId,
        window: &DailyWindow,
    ) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .iter()
            .filter(|record| &record.user_id == user_id && window.contains(&record.created_at))
            .cloned()
            .collect())
    }

    fn history(&self, user_id: &UserId) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        let mut records: Vec<RecyclingRecord> = guard
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn all_records(&self) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        Ok(lock(&self.records)?.clone())
    }

    fn append(&self, record: RecyclingRecord) -> Result<RecyclingRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRedemptionStore {
    redemptions: Arc<Mutex<Vec<RedeemedReward>>>,
}

impl RedemptionStore for InMemoryRedemptionStore {
    fn redeemed(&self, user_id: &UserId) -> Result<Vec<RedeemedReward>, RepositoryError> {
        let guard = lock(&self.redemptions)?;
        let mut redeemed: Vec<RedeemedReward> = guard
            .iter()
            .filter(|redemption| &redemption.user_id == user_id)
            .cloned()
            .collect();
        redeemed.sort_by(|a, b| b.redeemed_at.cmp(&a.redeemed_at));
        Ok(redeemed)
    }

    fn redeemed_count(&self, reward_id: &RewardId) -> Result<u32, RepositoryError> {
        let guard = lock(&self.redemptions)?;
        let count = guard
            .iter()
            .filter(|redemption| &redemption.reward_id == reward_id)
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn record(&self, redemption: RedeemedReward) -> Result<RedeemedReward, RepositoryError> {
        let mut guard = lock(&self.redemptions)?;
        if guard.iter().any(|existing| existing.id == redemption.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(redemption.clone());
        Ok(redemption)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store lock poisoned".to_string()))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
