//! `myfit-core`: read models and client-side arithmetic for the gym client.
//!
//! Nothing in here talks to the network; the API client produces these types
//! and the views consume them.

pub mod error;
pub mod id;
pub mod metrics;
pub mod model;
pub mod time;

pub use error::{DomainError, DomainResult};
pub use id::{BookingId, ClassSessionId, PlanId, SalaryId, UserId};
pub use metrics::{PlanProgress, RevenueSummary, plan_progress, revenue_summary};
pub use model::{ClassBooking, ClassSession, Plan, PlanBooking, TrainerSalary, User};
pub use time::{format_input, parse_local_datetime};
