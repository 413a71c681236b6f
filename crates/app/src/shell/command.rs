use clap::Parser;

use myfit_auth::{Role, UnknownRole};
use myfit_core::{BookingId, ClassSessionId, PlanId, UserId};

use crate::views::ClassForm;
use crate::views::admin::{PlanForm, RoleFilter, TrainerForm, UserForm};

/// One line of shell input.
#[derive(Debug, Parser)]
#[command(name = "myfit", about = "My Fit Journey terminal client", disable_version_flag = true)]
pub enum Command {
    #[command(about = "Sign in and open your dashboard")]
    Login {
        #[arg(required = true)]
        username: String,
        #[arg(required = true)]
        password: String,
    },
    #[command(about = "Sign out and return to the login page")]
    Logout,
    #[command(about = "Show the signed-in user and role")]
    Whoami,
    #[command(about = "Navigate to a path, e.g. /admin/plans", alias = "cd")]
    Go {
        #[arg(required = true)]
        path: String,
    },
    #[command(about = "Return to the previous page")]
    Back,
    #[command(about = "Reload and redraw the current page", alias = "ls")]
    Show,
    #[command(about = "Leave the shell", alias = "exit")]
    Quit,

    // member
    #[command(about = "Book a class session")]
    BookClass { class: ClassSessionId },
    #[command(about = "Cancel one of your class bookings")]
    CancelClass { booking: BookingId },
    #[command(about = "Subscribe to a plan")]
    BookPlan { plan: PlanId },
    #[command(about = "Cancel one of your plan subscriptions")]
    CancelPlan { booking: BookingId },

    // trainer
    #[command(about = "Create a class")]
    NewClass {
        #[command(flatten)]
        fields: ClassFields,
    },
    #[command(about = "Load a class into the form for editing")]
    EditClass { class: ClassSessionId },
    #[command(about = "Submit the class being edited, applying any given changes")]
    UpdateClass {
        #[command(flatten)]
        fields: ClassFields,
    },
    #[command(about = "Leave edit mode")]
    CancelEdit,
    #[command(about = "Delete a class")]
    DeleteClass { class: ClassSessionId },
    #[command(about = "List members booked into a class")]
    Members { class: ClassSessionId },
    #[command(about = "Close the member list")]
    CloseMembers,
    #[command(about = "Mark a booked member present or absent")]
    Attend {
        booking: BookingId,
        #[arg(action = clap::ArgAction::Set)]
        present: bool,
    },

    // admin: users
    #[command(about = "Filter users by role (ALL, MEMBER, TRAINER, ADMIN)")]
    Filter { role: RoleFilter },
    #[command(about = "Create a user")]
    AddUser {
        #[command(flatten)]
        fields: UserFields,
    },
    #[command(about = "Edit a user; omitted fields keep their value")]
    EditUser {
        user: UserId,
        #[command(flatten)]
        fields: UserFields,
    },
    #[command(about = "Delete a user")]
    DeleteUser { user: UserId },
    #[command(about = "Suspend or reactivate a user")]
    ToggleUser { user: UserId },

    // admin: plans
    #[command(about = "Create a plan")]
    AddPlan {
        #[command(flatten)]
        fields: PlanFields,
    },
    #[command(about = "Edit a plan; omitted fields keep their value")]
    EditPlan {
        plan: PlanId,
        #[command(flatten)]
        fields: PlanFields,
    },
    #[command(about = "Delete a plan")]
    DeletePlan { plan: PlanId },

    // admin: trainers
    #[command(about = "Create a trainer account")]
    AddTrainer {
        #[command(flatten)]
        fields: TrainerFields,
    },
    #[command(about = "Edit a trainer; omitted fields keep their value")]
    EditTrainer {
        trainer: UserId,
        #[command(flatten)]
        fields: TrainerFields,
    },
    #[command(about = "Suspend or reactivate a trainer")]
    ToggleTrainer { trainer: UserId },
    #[command(about = "Delete a trainer account")]
    DeleteTrainer { trainer: UserId },

    // admin: revenue
    #[command(about = "Set a trainer's salary")]
    Salary {
        trainer: UserId,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    #[command(about = "Remove a member's plan booking")]
    RemoveBooking { booking: BookingId },
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ClassFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Local time as YYYY-MM-DDTHH:MM.
    #[arg(long)]
    pub when: Option<String>,
    /// Zero or less for no limit.
    #[arg(long, allow_hyphen_values = true)]
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct UserFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, value_parser = parse_role)]
    pub role: Option<Role>,
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct PlanFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub days: Option<i64>,
    #[arg(long, action = clap::ArgAction::Set)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct TrainerFields {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

impl ClassFields {
    /// Overwrite the form fields that were given.
    pub fn apply(self, form: &mut ClassForm) {
        if let Some(name) = self.name {
            form.class_name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(when) = self.when {
            form.scheduled_at = when;
        }
        if let Some(capacity) = self.capacity {
            form.max_capacity = capacity;
        }
    }
}

impl UserFields {
    pub fn apply(self, form: &mut UserForm) {
        if let Some(username) = self.username {
            form.username = username;
        }
        if let Some(full_name) = self.full_name {
            form.full_name = full_name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if self.role.is_some() {
            form.role = self.role;
        }
        if let Some(password) = self.password {
            form.password = password;
        }
    }
}

impl PlanFields {
    pub fn apply(self, form: &mut PlanForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(days) = self.days {
            form.duration_in_days = days;
        }
        if let Some(active) = self.active {
            form.active = active;
        }
    }
}

impl TrainerFields {
    pub fn apply(self, form: &mut TrainerForm) {
        if let Some(username) = self.username {
            form.username = username;
        }
        if let Some(full_name) = self.full_name {
            form.full_name = full_name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(password) = self.password {
            form.password = password;
        }
    }
}

fn parse_role(s: &str) -> Result<Role, UnknownRole> {
    s.trim().to_ascii_uppercase().parse()
}

impl Command {
    /// Parse one input line. Quoted words may contain spaces.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once("myfit".to_string()).chain(split_words(line)))
    }
}

/// Split on whitespace, keeping `"..."` and `'...'` groups together.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_words() {
        assert_eq!(
            split_words(r#"add-user --full-name "Ann Lee" --email 'a b'"#),
            vec!["add-user", "--full-name", "Ann Lee", "--email", "a b"]
        );
        assert_eq!(split_words("  go   /admin  "), vec!["go", "/admin"]);
        assert_eq!(split_words(r#"x """#), vec!["x", ""]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn parses_navigation_and_ids() {
        assert!(matches!(
            Command::parse_line("go /admin").unwrap(),
            Command::Go { path } if path == "/admin"
        ));
        assert!(matches!(
            Command::parse_line("book-class 7").unwrap(),
            Command::BookClass { class } if class == ClassSessionId::new(7)
        ));
        assert!(Command::parse_line("book-class seven").is_err());
    }

    #[test]
    fn parses_flags_and_roles() {
        let cmd = Command::parse_line("add-user --username ann --role member --password pw").unwrap();
        let Command::AddUser { fields } = cmd else {
            panic!("wrong command");
        };
        assert_eq!(fields.role, Some(Role::Member));
        assert_eq!(fields.email, None);

        let cmd = Command::parse_line("new-class --name Yoga --when 2024-06-01T07:30 --capacity -1")
            .unwrap();
        let Command::NewClass { fields } = cmd else {
            panic!("wrong command");
        };
        assert_eq!(fields.capacity, Some(-1));

        assert!(matches!(
            Command::parse_line("attend 3 false").unwrap(),
            Command::Attend { present: false, .. }
        ));
        assert!(matches!(
            Command::parse_line("filter trainer").unwrap(),
            Command::Filter { role: RoleFilter::Only(Role::Trainer) }
        ));
    }

    #[test]
    fn given_fields_overwrite_the_form() {
        let mut form = PlanForm::default();
        PlanFields {
            name: Some("Gold".to_string()),
            days: Some(30),
            ..Default::default()
        }
        .apply(&mut form);
        assert_eq!(form.name, "Gold");
        assert_eq!(form.duration_in_days, 30);
        assert_eq!(form.price, 0.0);
        assert!(form.active);
    }

    #[test]
    fn aliases() {
        assert!(matches!(Command::parse_line("exit").unwrap(), Command::Quit));
        assert!(matches!(Command::parse_line("ls").unwrap(), Command::Show));
    }
}
