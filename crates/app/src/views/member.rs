use chrono::NaiveDateTime;

use myfit_client::MemberApi;
use myfit_core::{
    BookingId, ClassBooking, ClassSession, ClassSessionId, Plan, PlanBooking, PlanId, PlanProgress,
    plan_progress,
};

use super::Notice;

/// Member home: bookable classes and plans plus the member's own bookings.
#[derive(Debug, Clone, Default)]
pub struct MemberDashboard {
    pub classes: Vec<ClassSession>,
    pub class_bookings: Vec<ClassBooking>,
    /// Active plans only.
    pub plans: Vec<Plan>,
    pub plan_bookings: Vec<PlanBooking>,
    pub notice: Notice,
}

impl MemberDashboard {
    /// Fetch all four lists; on any failure nothing is replaced.
    pub async fn load(&mut self, api: &dyn MemberApi) {
        let fetched = tokio::try_join!(
            api.available_classes(),
            api.class_bookings(),
            api.plan_catalogue(),
            api.plan_bookings(),
        );

        match fetched {
            Ok((classes, class_bookings, plans, plan_bookings)) => {
                self.classes = classes;
                self.class_bookings = class_bookings;
                self.plans = plans.into_iter().filter(|p| p.active).collect();
                self.plan_bookings = plan_bookings;
            }
            Err(err) => {
                tracing::warn!(error = %err, "member dashboard load failed");
                self.notice.fail("Failed to load dashboard data.");
            }
        }
    }

    pub fn active_class_bookings(&self) -> impl Iterator<Item = &ClassBooking> {
        self.class_bookings.iter().filter(|b| b.active)
    }

    pub fn cancelled_class_bookings(&self) -> impl Iterator<Item = &ClassBooking> {
        self.class_bookings.iter().filter(|b| !b.active)
    }

    pub fn active_plan_bookings(&self) -> impl Iterator<Item = &PlanBooking> {
        self.plan_bookings.iter().filter(|b| b.active)
    }

    pub fn cancelled_plan_bookings(&self) -> impl Iterator<Item = &PlanBooking> {
        self.plan_bookings.iter().filter(|b| !b.active)
    }

    /// Remaining-days bar of a subscription. The duration comes from the
    /// catalogue; a plan no longer listed there shows an empty bar.
    pub fn progress(&self, booking: &PlanBooking, now: NaiveDateTime) -> PlanProgress {
        let duration = self
            .plans
            .iter()
            .find(|p| p.id == booking.plan_id)
            .and_then(|p| p.duration_in_days);
        plan_progress(booking.booking_date, duration, now)
    }

    pub async fn book_class(&mut self, api: &dyn MemberApi, class: ClassSessionId) {
        self.notice.clear();
        match api.book_class(class).await {
            Ok(()) => {
                self.notice.succeed("Class booked successfully!");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Booking failed.")),
        }
    }

    pub async fn cancel_class_booking(&mut self, api: &dyn MemberApi, booking: BookingId) {
        self.notice.clear();
        match api.cancel_class_booking(booking).await {
            Ok(()) => {
                self.notice.succeed("Class booking cancelled successfully.");
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to cancel booking."),
        }
    }

    pub async fn book_plan(&mut self, api: &dyn MemberApi, plan: PlanId) {
        self.notice.clear();
        match api.book_plan(plan).await {
            Ok(()) => {
                self.notice.succeed("Plan booked successfully!");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Plan booking failed.")),
        }
    }

    pub async fn cancel_plan_booking(&mut self, api: &dyn MemberApi, booking: BookingId) {
        self.notice.clear();
        match api.cancel_plan_booking(booking).await {
            Ok(()) => {
                self.notice.succeed("Subscription cancelled successfully.");
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to cancel subscription."),
        }
    }
}
