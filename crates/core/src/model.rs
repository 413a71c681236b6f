//! Read models returned by the gym API (matches its camelCase JSON shape).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use myfit_auth::Role;

use crate::id::{BookingId, ClassSessionId, PlanId, SalaryId, UserId};
use crate::time;

/// The backend emits boxed booleans; `null` reads as `false`.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Nullable day counts; `null` and negative values read as unknown.
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.and_then(|days| u32::try_from(days).ok()))
}

/// A scheduled class run by a trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: ClassSessionId,
    pub class_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "time::deserialize")]
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    pub trainer_id: UserId,
    #[serde(default)]
    pub trainer_name: Option<String>,
}

/// A member's seat in a class. Trainers see `member_name` and `present`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassBooking {
    pub booking_id: BookingId,
    pub class_session_id: ClassSessionId,
    pub class_name: String,
    #[serde(deserialize_with = "time::deserialize")]
    pub scheduled_at: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
    #[serde(default, deserialize_with = "time::deserialize_opt")]
    pub booked_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub present: Option<bool>,
    #[serde(default)]
    pub member_name: Option<String>,
}

/// A membership plan in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_days")]
    pub duration_in_days: Option<u32>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
}

/// A plan subscription. The admin listing also carries member details and
/// the plan price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanBooking {
    pub booking_id: BookingId,
    pub plan_id: PlanId,
    pub plan_name: String,
    #[serde(deserialize_with = "time::deserialize")]
    pub booking_date: NaiveDateTime,
    #[serde(default, deserialize_with = "null_as_false")]
    pub payment_completed: bool,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub member_email: Option<String>,
    #[serde(default)]
    pub plan_price: Option<f64>,
}

/// A user account as listed by the admin endpoints. Trainers are users with
/// the trainer role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
}

impl User {
    pub fn status_label(&self) -> &'static str {
        if self.active { "active" } else { "suspended" }
    }
}

/// Current salary of one trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSalary {
    pub id: SalaryId,
    pub trainer: User,
    pub salary: f64,
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
}
