use myfit_client::{AdminApi, PlanRequest};
use myfit_core::{DomainError, DomainResult, Plan, PlanId};

use crate::views::Notice;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_in_days: i64,
    pub active: bool,
}

impl Default for PlanForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            duration_in_days: 1,
            active: true,
        }
    }
}

impl PlanForm {
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            name: plan.name.clone(),
            description: plan.description.clone().unwrap_or_default(),
            price: plan.price,
            duration_in_days: plan.duration_in_days.map(i64::from).unwrap_or_default(),
            active: plan.active,
        }
    }

    pub fn to_request(&self) -> DomainResult<PlanRequest> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Plan name is required"));
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(DomainError::validation("Price must be greater than zero"));
        }
        let duration_in_days = u32::try_from(self.duration_in_days)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or_else(|| DomainError::validation("Duration must be at least 1 day"))?;

        Ok(PlanRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            duration_in_days,
            active: self.active,
        })
    }
}

/// Admin plan catalogue management.
#[derive(Debug, Clone, Default)]
pub struct PlansView {
    pub plans: Vec<Plan>,
    pub notice: Notice,
}

impl PlansView {
    pub async fn load(&mut self, api: &dyn AdminApi) {
        self.notice.error = None;
        match api.plans().await {
            Ok(plans) => self.plans = plans,
            Err(err) => {
                tracing::warn!(error = %err, "plan list load failed");
                self.notice.fail("Failed to load plans.");
            }
        }
    }

    pub fn find(&self, id: PlanId) -> DomainResult<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::invalid_id(format!("no plan with id {id}")))
    }

    pub async fn create(&mut self, api: &dyn AdminApi, form: &PlanForm) {
        self.notice.clear();
        let plan = match form.to_request() {
            Ok(plan) => plan,
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.create_plan(&plan).await {
            Ok(()) => {
                self.notice.succeed("Plan created successfully.");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Failed to create plan.")),
        }
    }

    pub async fn update(&mut self, api: &dyn AdminApi, id: PlanId, form: &PlanForm) {
        self.notice.clear();
        let plan = match form.to_request() {
            Ok(plan) => plan,
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.update_plan(id, &plan).await {
            Ok(()) => {
                self.notice.succeed("Plan updated successfully.");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Failed to update plan.")),
        }
    }

    pub async fn delete(&mut self, api: &dyn AdminApi, id: PlanId) {
        self.notice.clear();
        let name = match self.find(id) {
            Ok(plan) => plan.name.clone(),
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.delete_plan(id).await {
            Ok(()) => {
                self.notice.succeed(format!("Plan \"{name}\" has been deleted."));
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to delete plan."),
        }
    }
}
