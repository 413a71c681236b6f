//! In-memory API fake shared by the view tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use myfit_auth::Role;
use myfit_client::{
    AdminApi, ApiError, AuthApi, ClassRequest, LoginRequest, MemberApi, NewTrainer, NewUser,
    PlanRequest, TrainerApi, TrainerUpdate, UserUpdate,
};
use myfit_core::{
    BookingId, ClassBooking, ClassSession, ClassSessionId, Plan, PlanBooking, PlanId, SalaryId,
    TrainerSalary, User, UserId, parse_local_datetime,
};

#[derive(Debug, Default)]
pub struct FakeState {
    /// Returned by `login`.
    pub token: String,
    pub classes: Vec<ClassSession>,
    pub class_bookings: Vec<ClassBooking>,
    pub plans: Vec<Plan>,
    pub plan_bookings: Vec<PlanBooking>,
    pub trainer_classes: Vec<ClassSession>,
    pub booked_members: Vec<ClassBooking>,
    pub users: Vec<User>,
    pub trainers: Vec<User>,
    pub salaries: Vec<TrainerSalary>,
    pub member_plans: Vec<PlanBooking>,
    pub calls: Vec<String>,
    pub failures: HashMap<&'static str, ApiError>,
}

/// Serves canned lists, records every call as `"<op> <args>"`, and fails
/// the operations registered with [`FakeApi::failing`].
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with(self, f: impl FnOnce(&mut FakeState)) -> Self {
        f(&mut *self.state.lock().unwrap());
        self
    }

    pub fn failing(self, op: &'static str, err: ApiError) -> Self {
        self.with(|s| {
            s.failures.insert(op, err);
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn call(&self, op: &'static str, args: String) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let entry = if args.is_empty() {
            op.to_string()
        } else {
            format!("{op} {args}")
        };
        state.calls.push(entry);
        match state.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn list<T: Clone>(
        &self,
        op: &'static str,
        args: String,
        pick: impl FnOnce(&FakeState) -> Vec<T>,
    ) -> Result<Vec<T>, ApiError> {
        self.call(op, args)?;
        let state = self.state.lock().unwrap();
        Ok(pick(&*state))
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<String, ApiError> {
        self.call("login", credentials.username.clone())?;
        Ok(self.state.lock().unwrap().token.clone())
    }
}

#[async_trait]
impl MemberApi for FakeApi {
    async fn available_classes(&self) -> Result<Vec<ClassSession>, ApiError> {
        self.list("available_classes", String::new(), |s| s.classes.clone())
    }

    async fn class_bookings(&self) -> Result<Vec<ClassBooking>, ApiError> {
        self.list("class_bookings", String::new(), |s| s.class_bookings.clone())
    }

    async fn book_class(&self, class: ClassSessionId) -> Result<(), ApiError> {
        self.call("book_class", class.to_string())
    }

    async fn cancel_class_booking(&self, booking: BookingId) -> Result<(), ApiError> {
        self.call("cancel_class_booking", booking.to_string())
    }

    async fn plan_catalogue(&self) -> Result<Vec<Plan>, ApiError> {
        self.list("plan_catalogue", String::new(), |s| s.plans.clone())
    }

    async fn plan_bookings(&self) -> Result<Vec<PlanBooking>, ApiError> {
        self.list("plan_bookings", String::new(), |s| s.plan_bookings.clone())
    }

    async fn book_plan(&self, plan: PlanId) -> Result<(), ApiError> {
        self.call("book_plan", plan.to_string())
    }

    async fn cancel_plan_booking(&self, booking: BookingId) -> Result<(), ApiError> {
        self.call("cancel_plan_booking", booking.to_string())
    }
}

#[async_trait]
impl TrainerApi for FakeApi {
    async fn classes(&self) -> Result<Vec<ClassSession>, ApiError> {
        self.list("classes", String::new(), |s| s.trainer_classes.clone())
    }

    async fn create_class(&self, class: &ClassRequest) -> Result<(), ApiError> {
        self.call("create_class", format!("{class:?}"))
    }

    async fn update_class(&self, id: ClassSessionId, class: &ClassRequest) -> Result<(), ApiError> {
        self.call("update_class", format!("{id} {class:?}"))
    }

    async fn delete_class(&self, id: ClassSessionId) -> Result<(), ApiError> {
        self.call("delete_class", id.to_string())
    }

    async fn booked_members(&self, id: ClassSessionId) -> Result<Vec<ClassBooking>, ApiError> {
        self.list("booked_members", id.to_string(), |s| s.booked_members.clone())
    }

    async fn set_attendance(&self, booking: BookingId, present: bool) -> Result<(), ApiError> {
        self.call("set_attendance", format!("{booking} {present}"))
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn users(&self, role: Option<Role>) -> Result<Vec<User>, ApiError> {
        let args = role.map(|r| r.to_string()).unwrap_or_default();
        self.list("users", args, |s| {
            s.users
                .iter()
                .filter(|u| role.is_none() || u.role == role)
                .cloned()
                .collect()
        })
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.call("create_user", user.username.clone())
    }

    async fn update_user(&self, id: UserId, user: &UserUpdate) -> Result<(), ApiError> {
        self.call("update_user", format!("{id} {user:?}"))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.call("delete_user", id.to_string())
    }

    async fn set_user_active(&self, id: UserId, active: bool) -> Result<(), ApiError> {
        self.call("set_user_active", format!("{id} {active}"))
    }

    async fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.list("plans", String::new(), |s| s.plans.clone())
    }

    async fn create_plan(&self, plan: &PlanRequest) -> Result<(), ApiError> {
        self.call("create_plan", plan.name.clone())
    }

    async fn update_plan(&self, id: PlanId, plan: &PlanRequest) -> Result<(), ApiError> {
        self.call("update_plan", format!("{id} {}", plan.name))
    }

    async fn delete_plan(&self, id: PlanId) -> Result<(), ApiError> {
        self.call("delete_plan", id.to_string())
    }

    async fn trainers(&self) -> Result<Vec<User>, ApiError> {
        self.list("trainers", String::new(), |s| s.trainers.clone())
    }

    async fn create_trainer(&self, trainer: &NewTrainer) -> Result<(), ApiError> {
        self.call("create_trainer", trainer.username.clone())
    }

    async fn update_trainer(&self, id: UserId, trainer: &TrainerUpdate) -> Result<(), ApiError> {
        self.call("update_trainer", format!("{id} {trainer:?}"))
    }

    async fn delete_trainer(&self, id: UserId) -> Result<(), ApiError> {
        self.call("delete_trainer", id.to_string())
    }

    async fn trainer_salaries(&self) -> Result<Vec<TrainerSalary>, ApiError> {
        self.list("trainer_salaries", String::new(), |s| s.salaries.clone())
    }

    async fn set_trainer_salary(&self, trainer: UserId, salary: f64) -> Result<(), ApiError> {
        self.call("set_trainer_salary", format!("{trainer} {salary}"))
    }

    async fn member_plan_bookings(&self) -> Result<Vec<PlanBooking>, ApiError> {
        self.list("member_plan_bookings", String::new(), |s| s.member_plans.clone())
    }

    async fn delete_member_plan_booking(&self, booking: BookingId) -> Result<(), ApiError> {
        self.call("delete_member_plan_booking", booking.to_string())
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        message: message.to_string(),
    }
}

pub fn class(id: i64, name: &str) -> ClassSession {
    ClassSession {
        id: ClassSessionId::new(id),
        class_name: name.to_string(),
        description: Some(format!("{name} session")),
        scheduled_at: parse_local_datetime("2024-06-01T07:30").unwrap(),
        max_capacity: Some(12),
        trainer_id: UserId::new(2),
        trainer_name: Some("Tom".to_string()),
    }
}

pub fn class_booking(id: i64, class_id: i64, active: bool) -> ClassBooking {
    ClassBooking {
        booking_id: BookingId::new(id),
        class_session_id: ClassSessionId::new(class_id),
        class_name: "Spin".to_string(),
        scheduled_at: parse_local_datetime("2024-06-01T07:30").unwrap(),
        active,
        booked_at: None,
        present: None,
        member_name: Some("Ann".to_string()),
    }
}

pub fn plan(id: i64, name: &str, price: f64, days: u32) -> Plan {
    Plan {
        id: PlanId::new(id),
        name: name.to_string(),
        description: None,
        price,
        duration_in_days: Some(days),
        active: true,
    }
}

pub fn inactive(mut plan: Plan) -> Plan {
    plan.active = false;
    plan
}

pub fn plan_booking(id: i64, plan_id: i64, price: f64, active: bool) -> PlanBooking {
    PlanBooking {
        booking_id: BookingId::new(id),
        plan_id: PlanId::new(plan_id),
        plan_name: format!("plan-{plan_id}"),
        booking_date: parse_local_datetime("2024-01-01T00:00").unwrap(),
        payment_completed: true,
        payment_reference: None,
        active,
        member_name: Some("Ann".to_string()),
        member_email: None,
        plan_price: Some(price),
    }
}

pub fn user(id: i64, username: &str, role: Role, active: bool) -> User {
    User {
        id: UserId::new(id),
        username: username.to_string(),
        full_name: format!("{username} full"),
        email: format!("{username}@example.com"),
        role: Some(role),
        active,
    }
}

pub fn salary(id: i64, trainer: User, amount: f64) -> TrainerSalary {
    TrainerSalary {
        id: SalaryId::new(id),
        trainer,
        salary: amount,
        effective_from: None,
    }
}

/// Unsigned tokens whose payload is `{"role":"ROLE_<X>"}`.
pub const ADMIN_TOKEN: &str = "h.eyJyb2xlIjoiUk9MRV9BRE1JTiJ9.s";
pub const MEMBER_TOKEN: &str = "h.eyJyb2xlIjoiUk9MRV9NRU1CRVIifQ.s";
pub const TRAINER_TOKEN: &str = "h.eyJyb2xlIjoiUk9MRV9UUkFJTkVSIn0.s";
