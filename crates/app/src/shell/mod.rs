//! Line-oriented terminal front end.
//!
//! Each line is parsed into a [`Command`], applied to the current screen's
//! view state, and answered with a redraw of that screen. Every navigation
//! goes through the [`Navigator`], so guards run exactly as they would for
//! a typed URL.

pub mod command;
mod render;

use myfit_auth::{LOGIN_PATH, Session};
use myfit_client::{AdminApi, AuthApi, MemberApi, TrainerApi};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::navigator::{Navigator, Outcome};
use crate::routes::{AdminSection, LANDING_PATH, Route};
use crate::views::admin::{PlanForm, PlansView, RevenueView, TrainerForm, TrainersView, UserForm, UsersView};
use crate::views::{LoginView, MemberDashboard, TrainerDashboard};

pub use command::Command;

const UNAVAILABLE: &str = "not available on this page\n";

/// Everything the shell calls on the backend.
pub trait GymApi: AuthApi + MemberApi + TrainerApi + AdminApi {}

impl<T: AuthApi + MemberApi + TrainerApi + AdminApi> GymApi for T {}

/// View state of the page on display.
#[derive(Debug, Clone)]
pub enum Screen {
    Landing,
    Login(LoginView),
    Member(MemberDashboard),
    Trainer(TrainerDashboard),
    Users(UsersView),
    Plans(PlansView),
    Trainers(TrainersView),
    Revenue(RevenueView),
}

impl Screen {
    fn blank(route: Route) -> Self {
        match route {
            Route::Landing => Self::Landing,
            Route::Login => Self::Login(LoginView::default()),
            Route::Member => Self::Member(MemberDashboard::default()),
            Route::Trainer => Self::Trainer(TrainerDashboard::default()),
            Route::Admin(AdminSection::Users) => Self::Users(UsersView::default()),
            Route::Admin(AdminSection::Plans) => Self::Plans(PlansView::default()),
            Route::Admin(AdminSection::Trainers) => Self::Trainers(TrainersView::default()),
            Route::Admin(AdminSection::Revenue) => Self::Revenue(RevenueView::default()),
        }
    }

    async fn load<A: GymApi>(&mut self, api: &A) {
        match self {
            Self::Landing | Self::Login(_) => {}
            Self::Member(view) => view.load(api).await,
            Self::Trainer(view) => view.load(api).await,
            Self::Users(view) => view.load(api).await,
            Self::Plans(view) => view.load(api).await,
            Self::Trainers(view) => view.load(api).await,
            Self::Revenue(view) => view.load(api).await,
        }
    }
}

/// What the caller should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Print(String),
    Quit,
}

pub struct Shell<A> {
    api: A,
    navigator: Navigator,
    screen: Screen,
}

impl<A: GymApi> Shell<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            navigator: Navigator::new(session),
            screen: Screen::Landing,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Open the landing page and return its drawing.
    pub async fn start(&mut self) -> String {
        let outcome = self.navigator.navigate(LANDING_PATH);
        self.open(outcome).await;
        render::screen(&self.screen)
    }

    /// Read lines from stdin until `quit` or end of input.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let banner = self.start().await;
        stdout.write_all(banner.as_bytes()).await?;

        loop {
            stdout.write_all(b"myfit> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.execute(&line).await {
                Flow::Print(text) => stdout.write_all(text.as_bytes()).await?,
                Flow::Quit => break,
            }
        }
        Ok(())
    }

    pub async fn execute(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Print(String::new());
        }
        let command = match Command::parse_line(line) {
            Ok(command) => command,
            Err(err) => return Flow::Print(err.to_string()),
        };

        match self.apply(command).await {
            Some(Applied::Redraw) => Flow::Print(render::screen(&self.screen)),
            Some(Applied::Say(text)) => Flow::Print(text),
            None => Flow::Quit,
        }
    }

    async fn go(&mut self, path: &str) {
        let outcome = self.navigator.navigate(path);
        self.open(outcome).await;
    }

    /// Replace the screen with a fresh view of the settled route.
    async fn open(&mut self, outcome: Outcome) {
        if let Some(reason) = &outcome.denied {
            tracing::info!(route = %outcome.route, reason = ?reason, "access denied");
        }
        self.screen = Screen::blank(outcome.route);
        self.screen.load(&self.api).await;
    }

    fn whoami(&self) -> String {
        let session = self.navigator.session();
        if session.get().is_none() {
            return "not signed in\n".to_string();
        }
        let subject = session.subject().unwrap_or_else(|| "unknown".to_string());
        match session.role_claim().role() {
            Some(role) => format!("{subject} ({role})\n"),
            None => format!("{subject} (no valid role)\n"),
        }
    }

    async fn apply(&mut self, command: Command) -> Option<Applied> {
        match command {
            Command::Quit => return None,
            Command::Whoami => return Some(Applied::Say(self.whoami())),
            Command::Go { path } => self.go(&path).await,
            Command::Back => {
                let outcome = self.navigator.back();
                self.open(outcome).await;
            }
            Command::Show => {
                let outcome = self.navigator.reload();
                self.open(outcome).await;
            }
            Command::Logout => {
                let outcome = self.navigator.logout();
                self.open(outcome).await;
            }
            Command::Login { username, password } => self.login(&username, &password).await,
            command => {
                if !act(&self.api, &mut self.screen, command).await {
                    return Some(Applied::Say(UNAVAILABLE.to_string()));
                }
            }
        }
        Some(Applied::Redraw)
    }

    /// Submit credentials from whatever page is open; the login page is
    /// opened first when needed.
    async fn login(&mut self, username: &str, password: &str) {
        if !matches!(self.screen, Screen::Login(_)) {
            self.go(LOGIN_PATH).await;
        }
        let session = self.navigator.session().clone();
        let Screen::Login(view) = &mut self.screen else {
            return;
        };
        if let Some(home) = view.submit(&self.api, &session, username, password).await {
            self.go(home).await;
        }
    }
}

enum Applied {
    Redraw,
    Say(String),
}

/// Run a page action against the open screen. Returns `false` when the
/// command does not belong to that page.
async fn act<A: GymApi>(api: &A, screen: &mut Screen, command: Command) -> bool {
    match (command, screen) {
        (Command::BookClass { class }, Screen::Member(view)) => view.book_class(api, class).await,
        (Command::CancelClass { booking }, Screen::Member(view)) => {
            view.cancel_class_booking(api, booking).await
        }
        (Command::BookPlan { plan }, Screen::Member(view)) => view.book_plan(api, plan).await,
        (Command::CancelPlan { booking }, Screen::Member(view)) => {
            view.cancel_plan_booking(api, booking).await
        }

        (Command::NewClass { fields }, Screen::Trainer(view)) => {
            fields.apply(&mut view.form);
            view.create(api).await;
        }
        (Command::EditClass { class }, Screen::Trainer(view)) => {
            if let Err(err) = view.edit(class) {
                view.notice.fail(err.message());
            }
        }
        (Command::UpdateClass { fields }, Screen::Trainer(view)) => {
            if view.editing.is_none() {
                view.notice.fail("No class is being edited.");
            } else {
                fields.apply(&mut view.form);
                view.update(api).await;
            }
        }
        (Command::CancelEdit, Screen::Trainer(view)) => view.cancel_edit(),
        (Command::DeleteClass { class }, Screen::Trainer(view)) => view.delete(api, class).await,
        (Command::Members { class }, Screen::Trainer(view)) => view.show_members(api, class).await,
        (Command::CloseMembers, Screen::Trainer(view)) => view.close_members(),
        (Command::Attend { booking, present }, Screen::Trainer(view)) => {
            view.set_attendance(api, booking, present).await
        }

        (Command::Filter { role }, Screen::Users(view)) => view.set_filter(api, role).await,
        (Command::AddUser { fields }, Screen::Users(view)) => {
            let mut form = UserForm::default();
            fields.apply(&mut form);
            view.create(api, &form).await;
        }
        (Command::EditUser { user, fields }, Screen::Users(view)) => {
            match view.find(user).map(UserForm::from_user) {
                Ok(mut form) => {
                    fields.apply(&mut form);
                    view.update(api, user, &form).await;
                }
                Err(err) => view.notice.fail(err.message()),
            }
        }
        (Command::DeleteUser { user }, Screen::Users(view)) => view.delete(api, user).await,
        (Command::ToggleUser { user }, Screen::Users(view)) => view.toggle_active(api, user).await,

        (Command::AddPlan { fields }, Screen::Plans(view)) => {
            let mut form = PlanForm::default();
            fields.apply(&mut form);
            view.create(api, &form).await;
        }
        (Command::EditPlan { plan, fields }, Screen::Plans(view)) => {
            match view.find(plan).map(PlanForm::from_plan) {
                Ok(mut form) => {
                    fields.apply(&mut form);
                    view.update(api, plan, &form).await;
                }
                Err(err) => view.notice.fail(err.message()),
            }
        }
        (Command::DeletePlan { plan }, Screen::Plans(view)) => view.delete(api, plan).await,

        (Command::AddTrainer { fields }, Screen::Trainers(view)) => {
            let mut form = TrainerForm::default();
            fields.apply(&mut form);
            view.create(api, &form).await;
        }
        (Command::EditTrainer { trainer, fields }, Screen::Trainers(view)) => {
            match view.find(trainer).map(TrainerForm::from_trainer) {
                Ok(mut form) => {
                    fields.apply(&mut form);
                    view.update(api, trainer, &form).await;
                }
                Err(err) => view.notice.fail(err.message()),
            }
        }
        (Command::ToggleTrainer { trainer }, Screen::Trainers(view)) => {
            view.toggle_active(api, trainer).await
        }
        (Command::DeleteTrainer { trainer }, Screen::Trainers(view)) => {
            view.delete(api, trainer).await
        }

        (Command::Salary { trainer, amount }, Screen::Revenue(view)) => {
            view.edit_salary(trainer, amount);
            view.save_salary(api, trainer).await;
        }
        (Command::RemoveBooking { booking }, Screen::Revenue(view)) => {
            view.remove_booking(api, booking).await
        }

        _ => return false,
    }
    true
}
