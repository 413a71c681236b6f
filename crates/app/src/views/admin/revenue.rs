use std::collections::BTreeMap;

use myfit_client::{AdminApi, ApiError};
use myfit_core::{BookingId, PlanBooking, RevenueSummary, TrainerSalary, User, UserId, revenue_summary};

use crate::views::Notice;

/// Income, payroll, and the member subscriptions behind them.
#[derive(Debug, Clone, Default)]
pub struct RevenueView {
    pub trainers: Vec<User>,
    pub salaries: Vec<TrainerSalary>,
    pub bookings: Vec<PlanBooking>,
    /// Salary inputs per trainer, as typed.
    pub salary_edits: BTreeMap<UserId, String>,
    pub notice: Notice,
}

impl RevenueView {
    pub async fn load(&mut self, api: &dyn AdminApi) {
        self.notice.error = None;
        match fetch(api).await {
            Ok((trainers, salaries, bookings)) => {
                self.salary_edits = salaries
                    .iter()
                    .map(|s| (s.trainer.id, s.salary.to_string()))
                    .collect();
                self.trainers = trainers;
                self.salaries = salaries;
                self.bookings = bookings;
            }
            Err(err) => {
                tracing::warn!(error = %err, "revenue load failed");
                self.notice.fail("Failed to load revenue related data");
            }
        }
    }

    pub fn summary(&self) -> RevenueSummary {
        revenue_summary(&self.bookings, &self.salaries)
    }

    pub fn salary_for(&self, trainer: UserId) -> Option<&TrainerSalary> {
        self.salaries.iter().find(|s| s.trainer.id == trainer)
    }

    pub fn edit_salary(&mut self, trainer: UserId, value: impl Into<String>) {
        self.salary_edits.insert(trainer, value.into());
    }

    /// Post the edited salary of `trainer` and reload. Nothing is sent when
    /// no value was entered.
    pub async fn save_salary(&mut self, api: &dyn AdminApi, trainer: UserId) {
        self.notice.clear();
        let Some(raw) = self.salary_edits.get(&trainer).filter(|v| !v.trim().is_empty()) else {
            return;
        };

        let salary = match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => value,
            _ => {
                return self
                    .notice
                    .fail("Please enter a valid non-negative number for salary");
            }
        };

        match api.set_trainer_salary(trainer, salary).await {
            Ok(()) => {
                self.notice.succeed("Salary saved.");
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to save salary"),
        }
    }

    /// Delete a member's plan booking and drop it locally; no reload.
    pub async fn remove_booking(&mut self, api: &dyn AdminApi, booking: BookingId) {
        self.notice.clear();
        match api.delete_member_plan_booking(booking).await {
            Ok(()) => self.bookings.retain(|b| b.booking_id != booking),
            Err(_) => self.notice.fail("Error deleting plan booking"),
        }
    }
}

async fn fetch(
    api: &dyn AdminApi,
) -> Result<(Vec<User>, Vec<TrainerSalary>, Vec<PlanBooking>), ApiError> {
    let trainers = api.trainers().await?;
    let salaries = api.trainer_salaries().await?;
    let bookings = api.member_plan_bookings().await?;
    Ok((trainers, salaries, bookings))
}
