use crate::infra::{InMemoryRecordStore, InMemoryRedemptionStore};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use clap::Args;
use recycle_rewards::error::AppError;
use recycle_rewards::recycling::{
    MaterialCatalog, RecyclingLimits, RecyclingService, StaticMaterialCatalog, SubmissionOutcome,
    SubmissionRequest, UserId,
};
use recycle_rewards::rewards::{RedemptionOutcome, RewardId, RewardService, StaticRewardCatalog};
use std::sync::Arc;

/// Material id and quantity for each scripted submission, in order.
const SCRIPTED_DAY: [(&str, f64); 8] = [
    ("1", 4.0),
    ("1", 7.0),
    ("3", 6.0),
    ("2", 3.0),
    ("4", 4.0),
    ("4", 3.0),
    ("99", 1.0),
    ("6", 1.0),
];

const DEMO_REWARD: &str = "6";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// User whose day is replayed
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Day to replay (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) day: Option<NaiveDate>,
}

pub(crate) fn run_materials() -> Result<(), AppError> {
    let catalog = StaticMaterialCatalog::standard();

    println!("Accepted materials");
    for material in catalog.materials() {
        let cap = material
            .max_quantity_per_day
            .map(|cap| format!("{cap} per day"))
            .unwrap_or_else(|| "no daily cap".to_string());
        println!(
            "- [{}] {} ({}) | {} points per unit | {}",
            material.id, material.name, material.category, material.points_per_unit, cap
        );
    }

    let limits = RecyclingLimits::default();
    println!(
        "\nDaily limits: {} records | {} points",
        limits.max_records_per_day, limits.max_points_per_day
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { user, day } = args;
    let user_id = UserId(user);
    let start = morning_of(day);

    let records = Arc::new(InMemoryRecordStore::default());
    let recycling = RecyclingService::new(
        records.clone(),
        Arc::new(StaticMaterialCatalog::standard()),
        RecyclingLimits::default(),
    );
    let rewards = RewardService::new(
        Arc::new(InMemoryRedemptionStore::default()),
        records,
        StaticRewardCatalog::standard(),
    );

    println!(
        "Recycling day replay for {} on {}",
        user_id,
        start.date_naive()
    );
    for (step, (material_id, quantity)) in SCRIPTED_DAY.into_iter().enumerate() {
        let at = start + Duration::minutes(30 * step as i64);
        let request = SubmissionRequest::new(user_id.0.clone(), material_id, quantity);
        let outcome = recycling.submit_at(request, &at)?;
        let verdict = match &outcome {
            SubmissionOutcome::Accepted(record) => format!(
                "accepted {} x {} for {} points",
                record.quantity, record.material_name, record.points_earned
            ),
            SubmissionOutcome::Rejected(reason) => {
                format!("rejected ({}): {}", reason.kind(), reason.summary())
            }
        };
        println!(
            "{:>2}. {} material {} x {} -> {}",
            step + 1,
            at.format("%H:%M"),
            material_id,
            quantity,
            verdict
        );
    }

    let usage = recycling.daily_usage_at(&user_id, &start)?;
    println!("\nEnd of day usage");
    println!(
        "- {} records ({} remaining) | {} points ({} remaining)",
        usage.records_today, usage.remaining_records, usage.points_today, usage.remaining_points
    );
    for material in usage.materials.iter().filter(|entry| entry.used_today > 0.0) {
        let remaining = material
            .remaining
            .map(|left| left.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        println!(
            "  - {}: {} used | {} left",
            material.material_name, material.used_today, remaining
        );
    }

    let standing = recycling.standing_at(&user_id, &start)?;
    println!(
        "\nStanding: {} points | level {} {} | {}% to next level",
        standing.total_points,
        standing.level.level,
        standing.level.name,
        standing.progress.percentage
    );
    println!(
        "Streak: {} day(s) | longest {} day(s)",
        standing.current_streak, standing.longest_streak
    );
    for entry in &standing.badges {
        let marker = if entry.unlocked { "x" } else { " " };
        println!(
            "  [{marker}] {} ({}/{})",
            entry.badge.name, entry.progress, entry.badge.requirement
        );
    }

    println!("\nRedeeming reward {DEMO_REWARD}");
    match rewards.redeem(&user_id, &RewardId(DEMO_REWARD.to_string()))? {
        RedemptionOutcome::Redeemed(redemption) => println!(
            "- redeemed {} for {} points",
            redemption.reward_name, redemption.points_spent
        ),
        RedemptionOutcome::Rejected(rejection) => {
            println!("- refused ({}): {}", rejection.kind(), rejection.summary())
        }
    }

    Ok(())
}

/// 08:00 local time on `day`, defaulting to today.
fn morning_of(day: Option<NaiveDate>) -> DateTime<Local> {
    day.unwrap_or_else(|| Local::now().date_naive())
        .and_hms_opt(8, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .unwrap_or_else(Local::now)
}
