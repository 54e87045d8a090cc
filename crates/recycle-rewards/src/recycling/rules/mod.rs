mod config;
mod policy;
mod totals;

pub use config::{RecyclingLimits, MAX_POINTS_PER_DAY, MAX_RECORDS_PER_DAY};
pub use policy::RejectionReason;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::MaterialCatalog;
use super::domain::{InvalidSubmission, RecordId, RecyclingRecord, SubmissionRequest};
use super::window::DailyWindow;
use totals::daily_totals;

/// Stateless decision function applying the daily caps to one submission.
///
/// The engine never persists anything: an accepted record is handed back to
/// the caller, which is responsible for appending it to the record store.
#[derive(Debug, Clone)]
pub struct SubmissionEngine {
    limits: RecyclingLimits,
}

impl Default for SubmissionEngine {
    fn default() -> Self {
        Self::new(RecyclingLimits::default())
    }
}

impl SubmissionEngine {
    pub fn new(limits: RecyclingLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RecyclingLimits {
        &self.limits
    }

    /// Evaluates against the local wall clock.
    pub fn submit<C>(
        &self,
        request: &SubmissionRequest,
        todays_records: &[RecyclingRecord],
        catalog: &C,
    ) -> Result<SubmissionOutcome, InvalidSubmission>
    where
        C: MaterialCatalog + ?Sized,
    {
        self.submit_at(request, todays_records, catalog, &Local::now())
    }

    /// Evaluates as of `now`; the daily window is the local day of `now` in its own zone.
    ///
    /// Records outside that window or belonging to other users are ignored,
    /// so callers may pass a broader history than strictly today's records.
    pub fn submit_at<C, Tz>(
        &self,
        request: &SubmissionRequest,
        todays_records: &[RecyclingRecord],
        catalog: &C,
        now: &DateTime<Tz>,
    ) -> Result<SubmissionOutcome, InvalidSubmission>
    where
        C: MaterialCatalog + ?Sized,
        Tz: TimeZone,
    {
        request.validate()?;

        let Some(material) = catalog.material(&request.material_id) else {
            return Ok(SubmissionOutcome::Rejected(
                RejectionReason::MaterialNotFound {
                    material_id: request.material_id.clone(),
                },
            ));
        };

        let window = DailyWindow::containing(now);
        let totals = daily_totals(
            todays_records,
            &request.user_id,
            &request.material_id,
            &window,
        );

        if totals.records >= self.limits.max_records_per_day {
            return Ok(SubmissionOutcome::Rejected(
                RejectionReason::DailyRecordLimitExceeded {
                    records_today: totals.records,
                    max_records_per_day: self.limits.max_records_per_day,
                },
            ));
        }

        if let Some(cap) = material.max_quantity_per_day {
            if request.quantity > cap {
                return Ok(SubmissionOutcome::Rejected(
                    RejectionReason::SingleSubmissionExceedsMaterialCap {
                        material_id: material.id,
                        material_name: material.name,
                        requested: request.quantity,
                        max_quantity_per_day: cap,
                    },
                ));
            }

            if totals.quantity_for_material + request.quantity > cap {
                return Ok(SubmissionOutcome::Rejected(
                    RejectionReason::MaterialDailyCapExceeded {
                        material_id: material.id,
                        material_name: material.name,
                        requested: request.quantity,
                        used_today: totals.quantity_for_material,
                        remaining: cap - totals.quantity_for_material,
                        max_quantity_per_day: cap,
                    },
                ));
            }
        }

        let points_earned = material.points_for(request.quantity);
        if totals.points + points_earned > self.limits.max_points_per_day {
            return Ok(SubmissionOutcome::Rejected(
                RejectionReason::DailyPointsCapExceeded {
                    points_today: totals.points,
                    requested_points: points_earned,
                    max_points_per_day: self.limits.max_points_per_day,
                },
            ));
        }

        Ok(SubmissionOutcome::Accepted(RecyclingRecord {
            id: RecordId::generate(),
            user_id: request.user_id.clone(),
            material_id: material.id,
            material_name: material.name,
            quantity: request.quantity,
            points_earned,
            created_at: now.with_timezone(&Utc),
        }))
    }
}

/// Result of evaluating a submission; rejections are expected outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Accepted(RecyclingRecord),
    Rejected(RejectionReason),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }

    pub fn summary(&self) -> String {
        match self {
            SubmissionOutcome::Accepted(record) => format!(
                "recorded {} {} for {} points",
                record.quantity, record.material_name, record.points_earned
            ),
            SubmissionOutcome::Rejected(reason) => reason.summary(),
        }
    }
}
