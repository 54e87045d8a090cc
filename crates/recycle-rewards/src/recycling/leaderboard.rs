use std::collections::HashMap;

use serde::Serialize;

use super::domain::{RecyclingRecord, UserId};

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub total_points: f64,
    pub total_recycled_items: f64,
    pub ranking_position: usize,
}

/// Ranks users by lifetime points, then recycled items, then id.
pub fn rank(records: &[RecyclingRecord], limit: usize) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<&UserId, (f64, f64)> = HashMap::new();
    for record in records {
        let entry = totals.entry(&record.user_id).or_insert((0.0, 0.0));
        entry.0 += record.points_earned;
        entry.1 += record.quantity;
    }

    let mut ranked: Vec<(&UserId, f64, f64)> = totals
        .into_iter()
        .map(|(user_id, (points, items))| (user_id, points, items))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| b.2.total_cmp(&a.2))
            .then_with(|| a.0.cmp(b.0))
    });

    ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (user_id, total_points, total_recycled_items))| LeaderboardEntry {
            user_id: user_id.clone(),
            total_points,
            total_recycled_items,
            ranking_position: index + 1,
        })
        .collect()
}
