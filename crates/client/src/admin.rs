use async_trait::async_trait;
use reqwest::Method;

use myfit_auth::Role;
use myfit_core::{BookingId, Plan, PlanBooking, PlanId, TrainerSalary, User, UserId};

use crate::client::{ApiClient, NO_QUERY};
use crate::dto::{NewTrainer, NewUser, PlanRequest, TrainerUpdate, UserUpdate};
use crate::error::ApiError;

/// Administration endpoints: users, plans, trainers and revenue data.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// All users, or only those holding `role`.
    async fn users(&self, role: Option<Role>) -> Result<Vec<User>, ApiError>;
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError>;
    async fn update_user(&self, id: UserId, user: &UserUpdate) -> Result<(), ApiError>;
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;
    /// Suspend (`false`) or reactivate (`true`) any account, trainers included.
    async fn set_user_active(&self, id: UserId, active: bool) -> Result<(), ApiError>;

    async fn plans(&self) -> Result<Vec<Plan>, ApiError>;
    async fn create_plan(&self, plan: &PlanRequest) -> Result<(), ApiError>;
    async fn update_plan(&self, id: PlanId, plan: &PlanRequest) -> Result<(), ApiError>;
    async fn delete_plan(&self, id: PlanId) -> Result<(), ApiError>;

    async fn trainers(&self) -> Result<Vec<User>, ApiError>;
    async fn create_trainer(&self, trainer: &NewTrainer) -> Result<(), ApiError>;
    async fn update_trainer(&self, id: UserId, trainer: &TrainerUpdate) -> Result<(), ApiError>;
    async fn delete_trainer(&self, id: UserId) -> Result<(), ApiError>;

    async fn trainer_salaries(&self) -> Result<Vec<TrainerSalary>, ApiError>;
    /// Create or replace the salary of one trainer.
    async fn set_trainer_salary(&self, trainer: UserId, salary: f64) -> Result<(), ApiError>;
    async fn member_plan_bookings(&self) -> Result<Vec<PlanBooking>, ApiError>;
    async fn delete_member_plan_booking(&self, booking: BookingId) -> Result<(), ApiError>;
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn users(&self, role: Option<Role>) -> Result<Vec<User>, ApiError> {
        match role {
            None => self.get_json("/api/admin/users").await,
            Some(role) => {
                let req = self
                    .request(Method::GET, "/api/admin/users")?
                    .query(&[("role", role.as_str())]);
                crate::client::decode(self.send(req).await?).await
            }
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.send_body(Method::POST, "/api/admin/users", user).await
    }

    async fn update_user(&self, id: UserId, user: &UserUpdate) -> Result<(), ApiError> {
        self.send_body(Method::PUT, &format!("/api/admin/users/{id}"), user)
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/api/admin/users/{id}"), NO_QUERY)
            .await
    }

    async fn set_user_active(&self, id: UserId, active: bool) -> Result<(), ApiError> {
        let path = format!("/api/admin/users/{id}/active");
        self.send_empty(Method::PATCH, &path, &[("active", active)])
            .await
    }

    async fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.get_json("/api/admin/plans").await
    }

    async fn create_plan(&self, plan: &PlanRequest) -> Result<(), ApiError> {
        self.send_body(Method::POST, "/api/admin/plans", plan).await
    }

    async fn update_plan(&self, id: PlanId, plan: &PlanRequest) -> Result<(), ApiError> {
        self.send_body(Method::PUT, &format!("/api/admin/plans/{id}"), plan)
            .await
    }

    async fn delete_plan(&self, id: PlanId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/api/admin/plans/{id}"), NO_QUERY)
            .await
    }

    async fn trainers(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/api/admin/trainers").await
    }

    async fn create_trainer(&self, trainer: &NewTrainer) -> Result<(), ApiError> {
        self.send_body(Method::POST, "/api/admin/trainers", trainer)
            .await
    }

    async fn update_trainer(&self, id: UserId, trainer: &TrainerUpdate) -> Result<(), ApiError> {
        self.send_body(Method::PUT, &format!("/api/admin/trainers/{id}"), trainer)
            .await
    }

    async fn delete_trainer(&self, id: UserId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/api/admin/trainers/{id}"), NO_QUERY)
            .await
    }

    async fn trainer_salaries(&self) -> Result<Vec<TrainerSalary>, ApiError> {
        self.get_json("/api/admin/trainer-salaries").await
    }

    async fn set_trainer_salary(&self, trainer: UserId, salary: f64) -> Result<(), ApiError> {
        let query = [("trainerId", trainer.to_string()), ("salary", salary.to_string())];
        self.send_empty(Method::POST, "/api/admin/trainer-salaries", &query)
            .await
    }

    async fn member_plan_bookings(&self) -> Result<Vec<PlanBooking>, ApiError> {
        self.get_json("/api/admin/member-plans").await
    }

    async fn delete_member_plan_booking(&self, booking: BookingId) -> Result<(), ApiError> {
        let path = format!("/api/admin/member-plans/{booking}");
        self.send_empty(Method::DELETE, &path, NO_QUERY).await
    }
}
