use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use super::domain::RecyclingRecord;

/// Material category counted by the plastic badge.
pub const PLASTIC_CATEGORY: &str = "Plástico";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Number of accepted records.
    Materials,
    /// Lifetime points.
    Points,
    /// Longest run of consecutive recycling days.
    Streak,
    /// Plastic items recycled.
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: BadgeKind,
    pub requirement: f64,
}

pub const BADGES: [Badge; 4] = [
    Badge {
        id: "first-recycle",
        name: "Primeira Reciclagem",
        description: "Recicle seu primeiro material",
        kind: BadgeKind::Materials,
        requirement: 1.0,
    },
    Badge {
        id: "eco-friendly",
        name: "Eco-Friendly",
        description: "Alcance 100 pontos",
        kind: BadgeKind::Points,
        requirement: 100.0,
    },
    Badge {
        id: "streak-master",
        name: "Sequência Master",
        description: "Mantenha uma sequência de 7 dias",
        kind: BadgeKind::Streak,
        requirement: 7.0,
    },
    Badge {
        id: "plastic-hero",
        name: "Herói do Plástico",
        description: "Recicle 50 materiais plásticos",
        kind: BadgeKind::Special,
        requirement: 50.0,
    },
];

/// Lifetime counters the badges are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BadgeStats {
    pub records: usize,
    pub total_points: f64,
    pub longest_streak: u32,
    pub plastic_items: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeProgress {
    #[serde(flatten)]
    pub badge: Badge,
    pub progress: f64,
    pub unlocked: bool,
}

pub fn evaluate(stats: &BadgeStats) -> Vec<BadgeProgress> {
    BADGES
        .iter()
        .map(|badge| {
            let progress = match badge.kind {
                BadgeKind::Materials => stats.records as f64,
                BadgeKind::Points => stats.total_points,
                BadgeKind::Streak => f64::from(stats.longest_streak),
                BadgeKind::Special => stats.plastic_items,
            };
            BadgeProgress {
                badge: *badge,
                progress,
                unlocked: progress >= badge.requirement,
            }
        })
        .collect()
}

/// Runs of consecutive local days with at least one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Streaks {
    /// Run ending today, or yesterday when nothing was recycled yet today.
    pub current: u32,
    pub longest: u32,
}

pub fn streaks<Tz: TimeZone>(records: &[RecyclingRecord], now: &DateTime<Tz>) -> Streaks {
    let zone = now.timezone();
    let days: BTreeSet<NaiveDate> = records
        .iter()
        .map(|record| record.created_at.with_timezone(&zone).date_naive())
        .collect();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for day in &days {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(*day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }

    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|yesterday| days.contains(yesterday))
    };
    let mut current = 0;
    while let Some(day) = cursor.filter(|day| days.contains(day)) {
        current += 1;
        cursor = day.pred_opt();
    }

    Streaks { current, longest }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recycling::domain::{MaterialId, RecordId, UserId};
    use chrono::{Duration, FixedOffset};

    fn zone() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).expect("valid offset")
    }

    fn evening(day: u32) -> DateTime<FixedOffset> {
        zone()
            .with_ymd_and_hms(2025, 4, day, 21, 30, 0)
            .single()
            .expect("valid instant")
    }

    fn record_on(day: u32) -> RecyclingRecord {
        RecyclingRecord {
            id: RecordId::generate(),
            user_id: UserId("user-ana".to_string()),
            material_id: MaterialId("1".to_string()),
            material_name: "Garrafa PET".to_string(),
            quantity: 1.0,
            points_earned: 5.0,
            created_at: evening(day).with_timezone(&chrono::Utc),
        }
    }

    #[test]
    fn streaks_follow_local_days() {
        let records: Vec<_> = [1, 2, 3, 5, 6, 7, 8, 10, 11]
            .into_iter()
            .map(record_on)
            .collect();

        let today = streaks(&records, &evening(11));
        assert_eq!(today, Streaks { current: 2, longest: 4 });

        let next_morning = evening(12) - Duration::hours(12);
        assert_eq!(streaks(&records, &next_morning).current, 2);

        assert_eq!(streaks(&records, &evening(13)).current, 0);
    }

    #[test]
    fn late_evening_records_count_on_their_local_day() {
        // 21:30 on the 1st at UTC-3 is already the 2nd in UTC.
        let mut early = record_on(2);
        early.created_at = early.created_at - Duration::hours(20);
        let records = vec![record_on(1), early];

        let local_view = streaks(&records, &evening(2));
        let utc_view = streaks(&records, &evening(2).with_timezone(&chrono::Utc));

        assert_eq!(local_view.longest, 2);
        assert_eq!(utc_view.longest, 1);
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streaks(&[], &evening(1)), Streaks::default());
    }

    #[test]
    fn badges_unlock_at_their_thresholds() {
        let stats = BadgeStats {
            records: 1,
            total_points: 100.0,
            longest_streak: 6,
            plastic_items: 50.0,
        };

        let unlocked: Vec<&str> = evaluate(&stats)
            .into_iter()
            .filter(|entry| entry.unlocked)
            .map(|entry| entry.badge.id)
            .collect();

        assert_eq!(unlocked, vec!["first-recycle", "eco-friendly", "plastic-hero"]);
    }

    #[test]
    fn no_badges_before_the_first_record() {
        assert!(evaluate(&BadgeStats::default())
            .iter()
            .all(|entry| !entry.unlocked && entry.progress == 0.0));
    }
}
