use myfit_client::{AdminApi, NewTrainer, TrainerUpdate};
use myfit_core::{DomainError, DomainResult, User, UserId};

use crate::views::Notice;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainerForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl TrainerForm {
    pub fn from_trainer(trainer: &User) -> Self {
        Self {
            username: trainer.username.clone(),
            full_name: trainer.full_name.clone(),
            email: trainer.email.clone(),
            password: String::new(),
        }
    }

    pub fn to_new_trainer(&self) -> DomainResult<NewTrainer> {
        let fields = [&self.username, &self.full_name, &self.email, &self.password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(DomainError::validation("All fields are required."));
        }
        Ok(NewTrainer {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Username is fixed after creation; a blank password is left out.
    pub fn to_update(&self) -> TrainerUpdate {
        TrainerUpdate {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password: (!self.password.trim().is_empty()).then(|| self.password.clone()),
        }
    }
}

/// Admin trainer management.
#[derive(Debug, Clone, Default)]
pub struct TrainersView {
    pub trainers: Vec<User>,
    pub notice: Notice,
}

impl TrainersView {
    pub async fn load(&mut self, api: &dyn AdminApi) {
        self.notice.error = None;
        match api.trainers().await {
            Ok(trainers) => self.trainers = trainers,
            Err(err) => {
                tracing::warn!(error = %err, "trainer list load failed");
                self.notice.fail("Failed to fetch trainers.");
            }
        }
    }

    pub fn find(&self, id: UserId) -> DomainResult<&User> {
        self.trainers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::invalid_id(format!("no trainer with id {id}")))
    }

    pub async fn create(&mut self, api: &dyn AdminApi, form: &TrainerForm) {
        self.notice.clear();
        let trainer = match form.to_new_trainer() {
            Ok(trainer) => trainer,
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.create_trainer(&trainer).await {
            Ok(()) => {
                self.notice.succeed("Trainer created successfully.");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Failed to create trainer.")),
        }
    }

    pub async fn update(&mut self, api: &dyn AdminApi, id: UserId, form: &TrainerForm) {
        self.notice.clear();
        match api.update_trainer(id, &form.to_update()).await {
            Ok(()) => {
                self.notice.succeed("Trainer updated successfully.");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Failed to update trainer.")),
        }
    }

    /// Suspension goes through the generic user endpoint.
    pub async fn toggle_active(&mut self, api: &dyn AdminApi, id: UserId) {
        self.notice.clear();
        let (username, active) = match self.find(id) {
            Ok(trainer) => (trainer.username.clone(), !trainer.active),
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.set_user_active(id, active).await {
            Ok(()) => {
                let state = if active { "active" } else { "suspended" };
                self.notice
                    .succeed(format!("Trainer \"{username}\" is now {state}."));
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to update trainer status."),
        }
    }

    pub async fn delete(&mut self, api: &dyn AdminApi, id: UserId) {
        self.notice.clear();
        let username = match self.find(id) {
            Ok(trainer) => trainer.username.clone(),
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.delete_trainer(id).await {
            Ok(()) => {
                self.notice
                    .succeed(format!("Trainer \"{username}\" has been deleted."));
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to delete trainer."),
        }
    }
}

#[cfg(test)]
mod tests {
    use myfit_auth::Role;

    use super::*;
    use crate::views::testing::*;

    fn staffed() -> FakeApi {
        FakeApi::default().with(|s| {
            s.trainers = vec![user(4, "tom", Role::Trainer, true)];
        })
    }

    #[test]
    fn every_field_is_required_on_create() {
        let mut form = TrainerForm {
            username: "tom".to_string(),
            full_name: "Tom T".to_string(),
            email: "tom@example.com".to_string(),
            password: " ".to_string(),
        };
        assert_eq!(
            form.to_new_trainer().unwrap_err().message(),
            "All fields are required."
        );
        form.password = "pw".to_string();
        assert!(form.to_new_trainer().is_ok());
    }

    #[test]
    fn update_drops_blank_password() {
        let form = TrainerForm::from_trainer(&user(4, "tom", Role::Trainer, true));
        let update = form.to_update();
        assert_eq!(update.password, None);
        assert_eq!(update.full_name, "tom full");
    }

    #[tokio::test]
    async fn toggle_uses_the_user_endpoint() {
        let api = staffed();
        let mut view = TrainersView::default();
        view.load(&api).await;

        view.toggle_active(&api, UserId::new(4)).await;
        assert_eq!(api.count("set_user_active 4 false"), 1);
        assert_eq!(
            view.notice.success.as_deref(),
            Some("Trainer \"tom\" is now suspended.")
        );
    }

    #[tokio::test]
    async fn failures_use_fixed_or_server_messages() {
        let api = staffed()
            .failing("delete_trainer", server_error("has classes"))
            .failing("update_trainer", server_error("Email in use"))
            .failing("trainers", server_error(""));
        let mut view = TrainersView {
            trainers: vec![user(4, "tom", Role::Trainer, true)],
            ..Default::default()
        };

        view.delete(&api, UserId::new(4)).await;
        assert_eq!(view.notice.error.as_deref(), Some("Failed to delete trainer."));

        view.update(&api, UserId::new(4), &TrainerForm::default()).await;
        assert_eq!(view.notice.error.as_deref(), Some("Email in use"));

        view.load(&api).await;
        assert_eq!(view.notice.error.as_deref(), Some("Failed to fetch trainers."));
    }

    #[tokio::test]
    async fn delete_names_the_trainer() {
        let api = staffed();
        let mut view = TrainersView::default();
        view.load(&api).await;

        view.delete(&api, UserId::new(4)).await;
        assert_eq!(
            view.notice.success.as_deref(),
            Some("Trainer \"tom\" has been deleted.")
        );
    }
}
