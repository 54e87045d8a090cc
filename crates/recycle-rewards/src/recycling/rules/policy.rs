use serde::{Deserialize, Serialize};

use super::super::domain::MaterialId;

/// Routine business-rule rejection, carrying what a caller needs to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    MaterialNotFound {
        material_id: MaterialId,
    },
    DailyRecordLimitExceeded {
        records_today: usize,
        max_records_per_day: usize,
    },
    SingleSubmissionExceedsMaterialCap {
        material_id: MaterialId,
        material_name: String,
        requested: f64,
        max_quantity_per_day: f64,
    },
    MaterialDailyCapExceeded {
        material_id: MaterialId,
        material_name: String,
        requested: f64,
        used_today: f64,
        remaining: f64,
        max_quantity_per_day: f64,
    },
    DailyPointsCapExceeded {
        points_today: f64,
        requested_points: f64,
        max_points_per_day: f64,
    },
}

impl RejectionReason {
    pub const fn kind(&self) -> &'static str {
        match self {
            RejectionReason::MaterialNotFound { .. } => "material_not_found",
            RejectionReason::DailyRecordLimitExceeded { .. } => "daily_record_limit_exceeded",
            RejectionReason::SingleSubmissionExceedsMaterialCap { .. } => {
                "single_submission_exceeds_material_cap"
            }
            RejectionReason::MaterialDailyCapExceeded { .. } => "material_daily_cap_exceeded",
            RejectionReason::DailyPointsCapExceeded { .. } => "daily_points_cap_exceeded",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            RejectionReason::MaterialNotFound { material_id } => {
                format!("material {material_id} is not in the catalog")
            }
            RejectionReason::DailyRecordLimitExceeded {
                max_records_per_day,
                ..
            } => format!(
                "already logged {max_records_per_day} recycling records today, come back tomorrow"
            ),
            RejectionReason::SingleSubmissionExceedsMaterialCap {
                material_name,
                max_quantity_per_day,
                ..
            } => format!("maximum quantity for {material_name} is {max_quantity_per_day} per day"),
            RejectionReason::MaterialDailyCapExceeded {
                material_name,
                used_today,
                remaining,
                ..
            } => format!(
                "already recycled {used_today} {material_name} today, remaining allowance {remaining}"
            ),
            RejectionReason::DailyPointsCapExceeded {
                points_today,
                max_points_per_day,
                ..
            } => format!(
                "already earned {points_today} points today, daily limit is {max_points_per_day} points"
            ),
        }
    }
}
