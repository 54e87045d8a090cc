use super::super::domain::{MaterialId, RecyclingRecord, UserId};
use super::super::window::DailyWindow;

/// Aggregates of a user's records inside one daily window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyTotals {
    pub records: usize,
    pub points: f64,
    pub quantity_for_material: f64,
}

fn todays_records<'a>(
    records: &'a [RecyclingRecord],
    user_id: &'a UserId,
    window: &'a DailyWindow,
) -> impl Iterator<Item = &'a RecyclingRecord> {
    records
        .iter()
        .filter(move |record| &record.user_id == user_id && window.contains(&record.created_at))
}

pub(crate) fn daily_totals(
    records: &[RecyclingRecord],
    user_id: &UserId,
    material_id: &MaterialId,
    window: &DailyWindow,
) -> DailyTotals {
    let mut totals = DailyTotals {
        records: 0,
        points: 0.0,
        quantity_for_material: 0.0,
    };

    for record in todays_records(records, user_id, window) {
        totals.records += 1;
        totals.points += record.points_earned;
        if &record.material_id == material_id {
            totals.quantity_for_material += record.quantity;
        }
    }

    totals
}
