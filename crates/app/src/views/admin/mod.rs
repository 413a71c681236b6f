//! Pages of the admin subtree.

pub mod plans;
pub mod revenue;
pub mod trainers;
pub mod users;

pub use plans::{PlanForm, PlansView};
pub use revenue::RevenueView;
pub use trainers::{TrainerForm, TrainersView};
pub use users::{RoleFilter, UserForm, UsersView};
