use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use serde_json::Value;

use crate::recycling::catalog::StaticMaterialCatalog;
use crate::recycling::domain::{
    Material, MaterialId, RecordId, RecyclingRecord, SubmissionRequest, UserId,
};
use crate::recycling::repository::{RecordStore, RepositoryError};
use crate::recycling::rules::{RecyclingLimits, SubmissionEngine};
use crate::recycling::service::RecyclingService;
use crate::recycling::window::DailyWindow;

pub(super) const USER: &str = "user-ana";

pub(super) fn zone() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).expect("valid offset")
}

/// 2025-03-14 12:00 at UTC-3.
pub(super) fn noon() -> DateTime<FixedOffset> {
    zone()
        .with_ymd_and_hms(2025, 3, 14, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn yesterday_evening() -> DateTime<FixedOffset> {
    zone()
        .with_ymd_and_hms(2025, 3, 13, 23, 59, 59)
        .single()
        .expect("valid instant")
}

fn material(id: &str, points_per_unit: f64, cap: Option<f64>) -> Material {
    Material {
        id: MaterialId(id.to_string()),
        name: format!("{id} material"),
        category: "Test".to_string(),
        description: String::new(),
        points_per_unit,
        max_quantity_per_day: cap,
    }
}

/// `pet` 5/unit capped at 10, `can` 8/unit uncapped, `paper` 5/unit uncapped,
/// `foil` 6/unit capped at 5.
pub(super) fn catalog() -> StaticMaterialCatalog {
    StaticMaterialCatalog::new(vec![
        material("pet", 5.0, Some(10.0)),
        material("can", 8.0, None),
        material("paper", 5.0, None),
        material("foil", 6.0, Some(5.0)),
    ])
    .expect("valid catalog")
}

pub(super) fn engine() -> SubmissionEngine {
    SubmissionEngine::new(RecyclingLimits::default())
}

pub(super) fn request(material_id: &str, quantity: f64) -> SubmissionRequest {
    SubmissionRequest::new(USER, material_id, quantity)
}

pub(super) fn record_at(
    user: &str,
    material_id: &str,
    quantity: f64,
    points_earned: f64,
    created_at: DateTime<FixedOffset>,
) -> RecyclingRecord {
    RecyclingRecord {
        id: RecordId::generate(),
        user_id: UserId(user.to_string()),
        material_id: MaterialId(material_id.to_string()),
        material_name: format!("{material_id} material"),
        quantity,
        points_earned,
        created_at: created_at.with_timezone(&Utc),
    }
}

/// Today's record earlier in the morning.
pub(super) fn morning_record(material_id: &str, quantity: f64, points_earned: f64) -> RecyclingRecord {
    record_at(
        USER,
        material_id,
        quantity,
        points_earned,
        noon() - Duration::hours(3),
    )
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<Vec<RecyclingRecord>>>,
}

impl MemoryStore {
    pub(super) fn seeded(records: Vec<RecyclingRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl RecordStore for MemoryStore {
    fn records_between(
        &self,
        user_id: &UserId,
        window: &DailyWindow,
    ) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.user_id == user_id && window.contains(&record.created_at))
            .cloned()
            .collect())
    }

    fn history(&self, user_id: &UserId) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut records: Vec<RecyclingRecord> = guard
            .iter()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn all_records(&self) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        Ok(self.records.lock().expect("store mutex poisoned").clone())
    }

    fn append(&self, record: RecyclingRecord) -> Result<RecyclingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }
}

pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn records_between(
        &self,
        _user_id: &UserId,
        _window: &DailyWindow,
    ) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _user_id: &UserId) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all_records(&self) -> Result<Vec<RecyclingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn append(&self, _record: RecyclingRecord) -> Result<RecyclingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    RecyclingService<MemoryStore, StaticMaterialCatalog>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let service =
        RecyclingService::new(store.clone(), Arc::new(catalog()), RecyclingLimits::default());
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
