use serde::{Deserialize, Serialize};

pub const MAX_RECORDS_PER_DAY: usize = 3;
pub const MAX_POINTS_PER_DAY: f64 = 50.0;

/// Daily caps applied to every user, independent of material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecyclingLimits {
    pub max_records_per_day: usize,
    pub max_points_per_day: f64,
}

impl Default for RecyclingLimits {
    fn default() -> Self {
        Self {
            max_records_per_day: MAX_RECORDS_PER_DAY,
            max_points_per_day: MAX_POINTS_PER_DAY,
        }
    }
}
