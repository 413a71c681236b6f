use async_trait::async_trait;
use reqwest::Method;

use myfit_core::{BookingId, ClassBooking, ClassSession, ClassSessionId};

use crate::client::{ApiClient, NO_QUERY};
use crate::dto::ClassRequest;
use crate::error::ApiError;

/// Endpoints available to trainers for their own classes.
#[async_trait]
pub trait TrainerApi: Send + Sync {
    async fn classes(&self) -> Result<Vec<ClassSession>, ApiError>;
    async fn create_class(&self, class: &ClassRequest) -> Result<(), ApiError>;
    async fn update_class(&self, id: ClassSessionId, class: &ClassRequest) -> Result<(), ApiError>;
    async fn delete_class(&self, id: ClassSessionId) -> Result<(), ApiError>;
    async fn booked_members(&self, id: ClassSessionId) -> Result<Vec<ClassBooking>, ApiError>;
    async fn set_attendance(&self, booking: BookingId, present: bool) -> Result<(), ApiError>;
}

#[async_trait]
impl TrainerApi for ApiClient {
    async fn classes(&self) -> Result<Vec<ClassSession>, ApiError> {
        self.get_json("/api/trainer/classes").await
    }

    async fn create_class(&self, class: &ClassRequest) -> Result<(), ApiError> {
        self.send_body(Method::POST, "/api/trainer/classes", class)
            .await
    }

    async fn update_class(&self, id: ClassSessionId, class: &ClassRequest) -> Result<(), ApiError> {
        let path = format!("/api/trainer/classes/{id}");
        self.send_body(Method::PUT, &path, class).await
    }

    async fn delete_class(&self, id: ClassSessionId) -> Result<(), ApiError> {
        let path = format!("/api/trainer/classes/{id}");
        self.send_empty(Method::DELETE, &path, NO_QUERY).await
    }

    async fn booked_members(&self, id: ClassSessionId) -> Result<Vec<ClassBooking>, ApiError> {
        self.get_json(&format!("/api/trainer/classes/{id}/bookings"))
            .await
    }

    async fn set_attendance(&self, booking: BookingId, present: bool) -> Result<(), ApiError> {
        let path = format!("/api/trainer/classes/bookings/{booking}/attendance");
        self.send_empty(Method::PATCH, &path, &[("present", present)])
            .await
    }
}
