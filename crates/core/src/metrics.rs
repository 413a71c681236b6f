//! Derived figures shown on the dashboards.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::{PlanBooking, TrainerSalary};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Remaining-days progress of one plan subscription.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanProgress {
    pub total_days: i64,
    pub days_left: i64,
    pub used_days: i64,
    /// Share of the plan already used, clamped to `0..=100`.
    pub percent: f64,
}

/// Progress of a subscription booked at `booked_at` for `duration_days`
/// days, as seen at `now`.
///
/// An unknown or zero duration yields an empty (0%) bar rather than a
/// division by zero.
pub fn plan_progress(
    booked_at: NaiveDateTime,
    duration_days: Option<u32>,
    now: NaiveDateTime,
) -> PlanProgress {
    let total_days = i64::from(duration_days.unwrap_or(0));
    // booked_at + duration can leave chrono's range; stay in milliseconds.
    let elapsed_ms = (now - booked_at).num_milliseconds();
    let remaining_ms = (total_days * MILLIS_PER_DAY).saturating_sub(elapsed_ms);
    let days_left = ceil_div(remaining_ms, MILLIS_PER_DAY).max(0);
    let used_days = total_days - days_left;

    let percent = if total_days == 0 {
        0.0
    } else {
        (used_days as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0)
    };

    PlanProgress {
        total_days,
        days_left,
        used_days,
        percent,
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    let q = a.div_euclid(b);
    if a.rem_euclid(b) == 0 { q } else { q + 1 }
}

/// Headline figures of the revenue page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub total_income: f64,
    pub total_salaries: f64,
    pub net_profit: f64,
}

impl RevenueSummary {
    pub fn is_profit(&self) -> bool {
        self.net_profit >= 0.0
    }
}

/// Income counts only active subscriptions; every salary on record counts.
pub fn revenue_summary(bookings: &[PlanBooking], salaries: &[TrainerSalary]) -> RevenueSummary {
    let total_income: f64 = bookings
        .iter()
        .filter(|b| b.active)
        .map(|b| b.plan_price.unwrap_or(0.0))
        .sum();
    let total_salaries: f64 = salaries.iter().map(|s| s.salary).sum();

    RevenueSummary {
        total_income,
        total_salaries,
        net_profit: total_income - total_salaries,
    }
}
