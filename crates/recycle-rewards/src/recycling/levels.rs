use serde::Serialize;

/// Named tier unlocked by lifetime points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    pub level: u8,
    pub name: &'static str,
    pub min_points: f64,
    /// `None` for the top tier.
    pub max_points: Option<f64>,
}

pub const LEVELS: [Level; 5] = [
    Level {
        level: 1,
        name: "Eco-Iniciante",
        min_points: 0.0,
        max_points: Some(99.0),
    },
    Level {
        level: 2,
        name: "Eco-Amigo",
        min_points: 100.0,
        max_points: Some(299.0),
    },
    Level {
        level: 3,
        name: "Eco-Warrior",
        min_points: 300.0,
        max_points: Some(799.0),
    },
    Level {
        level: 4,
        name: "Eco-Master",
        min_points: 800.0,
        max_points: Some(1999.0),
    },
    Level {
        level: 5,
        name: "Eco-Legend",
        min_points: 2000.0,
        max_points: None,
    },
];

/// Highest level whose threshold `points` has reached.
pub fn level_for(points: f64) -> Level {
    LEVELS
        .iter()
        .rev()
        .find(|level| points >= level.min_points)
        .copied()
        .unwrap_or(LEVELS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub current: f64,
    pub needed: f64,
    pub percentage: u8,
}

pub fn progress(points: f64) -> LevelProgress {
    let level = level_for(points);
    let next = LEVELS.iter().find(|candidate| candidate.level == level.level + 1);

    match next {
        None => LevelProgress {
            current: points,
            needed: 0.0,
            percentage: 100,
        },
        Some(next) => {
            let current = points - level.min_points;
            let needed = next.min_points - level.min_points;
            let percentage = ((current / needed) * 100.0).round().clamp(0.0, 100.0) as u8;
            LevelProgress {
                current,
                needed,
                percentage,
            }
        }
    }
}
