use core::fmt;
use core::str::FromStr;

use myfit_auth::{Role, UnknownRole};
use myfit_client::{AdminApi, NewUser, UserUpdate};
use myfit_core::{DomainError, DomainResult, User, UserId};

use crate::views::Notice;

/// Role filter of the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn role(&self) -> Option<Role> {
        match self {
            RoleFilter::All => None,
            RoleFilter::Only(role) => Some(*role),
        }
    }
}

impl FromStr for RoleFilter {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "ALL" {
            return Ok(RoleFilter::All);
        }
        upper.parse().map(RoleFilter::Only)
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleFilter::All => f.write_str("ALL"),
            RoleFilter::Only(role) => write!(f, "{role}"),
        }
    }
}

/// Create/edit form for any account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Option<Role>,
    pub password: String,
}

impl UserForm {
    /// Pre-fill from an existing account; the password starts blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            password: String::new(),
        }
    }

    pub fn to_new_user(&self) -> DomainResult<NewUser> {
        let role = self
            .role
            .ok_or_else(|| DomainError::validation("Role is required"))?;
        if self.password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }
        Ok(NewUser {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role,
            password: self.password.clone(),
        })
    }

    /// Blank password and missing role are left out of the update.
    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: self.role,
            password: (!self.password.trim().is_empty()).then(|| self.password.clone()),
        }
    }
}

/// Admin user management.
#[derive(Debug, Clone, Default)]
pub struct UsersView {
    pub users: Vec<User>,
    pub filter: RoleFilter,
    pub notice: Notice,
}

impl UsersView {
    pub async fn load(&mut self, api: &dyn AdminApi) {
        self.notice.error = None;
        match api.users(self.filter.role()).await {
            Ok(users) => self.users = users,
            Err(err) => {
                tracing::warn!(error = %err, filter = %self.filter, "user list load failed");
                self.notice.fail("Failed to load users.");
            }
        }
    }

    pub async fn set_filter(&mut self, api: &dyn AdminApi, filter: RoleFilter) {
        self.filter = filter;
        self.load(api).await;
    }

    pub fn find(&self, id: UserId) -> DomainResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::invalid_id(format!("no user with id {id}")))
    }

    pub async fn create(&mut self, api: &dyn AdminApi, form: &UserForm) {
        self.notice.clear();
        let user = match form.to_new_user() {
            Ok(user) => user,
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.create_user(&user).await {
            Ok(()) => {
                self.notice.succeed("User created!");
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Failed to create user.")),
        }
    }

    pub async fn update(&mut self, api: &dyn AdminApi, id: UserId, form: &UserForm) {
        self.notice.clear();
        let update = form.to_update();
        match api.update_user(id, &update).await {
            Ok(()) => {
                self.notice
                    .succeed(format!("User \"{}\" updated successfully.", update.username));
                self.load(api).await;
            }
            Err(err) => self.notice.fail(err.user_message("Failed to update user.")),
        }
    }

    pub async fn delete(&mut self, api: &dyn AdminApi, id: UserId) {
        self.notice.clear();
        let username = match self.find(id) {
            Ok(user) => user.username.clone(),
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.delete_user(id).await {
            Ok(()) => {
                self.notice
                    .succeed(format!("User \"{username}\" has been deleted."));
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to delete user."),
        }
    }

    /// Suspend an active account or reactivate a suspended one.
    pub async fn toggle_active(&mut self, api: &dyn AdminApi, id: UserId) {
        self.notice.clear();
        let (username, active) = match self.find(id) {
            Ok(user) => (user.username.clone(), !user.active),
            Err(err) => return self.notice.fail(err.message()),
        };

        match api.set_user_active(id, active).await {
            Ok(()) => {
                let state = if active { "active" } else { "suspended" };
                self.notice
                    .succeed(format!("User \"{username}\" is now {state}."));
                self.load(api).await;
            }
            Err(_) => self.notice.fail("Failed to update user status."),
        }
    }
}
