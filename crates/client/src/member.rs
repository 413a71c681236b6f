use async_trait::async_trait;
use reqwest::Method;

use myfit_core::{BookingId, ClassBooking, ClassSession, ClassSessionId, Plan, PlanBooking, PlanId};

use crate::client::{ApiClient, NO_QUERY};
use crate::dto::{BookClassRequest, BookPlanRequest};
use crate::error::ApiError;

/// Endpoints available to members (plus the public plan catalogue).
#[async_trait]
pub trait MemberApi: Send + Sync {
    async fn available_classes(&self) -> Result<Vec<ClassSession>, ApiError>;
    async fn class_bookings(&self) -> Result<Vec<ClassBooking>, ApiError>;
    async fn book_class(&self, class: ClassSessionId) -> Result<(), ApiError>;
    async fn cancel_class_booking(&self, booking: BookingId) -> Result<(), ApiError>;
    async fn plan_catalogue(&self) -> Result<Vec<Plan>, ApiError>;
    async fn plan_bookings(&self) -> Result<Vec<PlanBooking>, ApiError>;
    async fn book_plan(&self, plan: PlanId) -> Result<(), ApiError>;
    async fn cancel_plan_booking(&self, booking: BookingId) -> Result<(), ApiError>;
}

#[async_trait]
impl MemberApi for ApiClient {
    async fn available_classes(&self) -> Result<Vec<ClassSession>, ApiError> {
        self.get_json("/api/member/classes/available").await
    }

    async fn class_bookings(&self) -> Result<Vec<ClassBooking>, ApiError> {
        self.get_json("/api/member/classes/bookings").await
    }

    async fn book_class(&self, class: ClassSessionId) -> Result<(), ApiError> {
        let body = BookClassRequest {
            class_session_id: class,
        };
        self.send_body(Method::POST, "/api/member/classes/book", &body)
            .await
    }

    async fn cancel_class_booking(&self, booking: BookingId) -> Result<(), ApiError> {
        let path = format!("/api/member/classes/bookings/{booking}");
        self.send_empty(Method::DELETE, &path, NO_QUERY).await
    }

    async fn plan_catalogue(&self) -> Result<Vec<Plan>, ApiError> {
        self.get_json("/api/plans").await
    }

    async fn plan_bookings(&self) -> Result<Vec<PlanBooking>, ApiError> {
        self.get_json("/api/member/bookings").await
    }

    async fn book_plan(&self, plan: PlanId) -> Result<(), ApiError> {
        let body = BookPlanRequest { plan_id: plan };
        self.send_body(Method::POST, "/api/member/bookings/book", &body)
            .await
    }

    async fn cancel_plan_booking(&self, booking: BookingId) -> Result<(), ApiError> {
        let path = format!("/api/member/bookings/{booking}");
        self.send_empty(Method::DELETE, &path, NO_QUERY).await
    }
}
