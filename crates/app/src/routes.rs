//! Route table.
//!
//! Resolution happens in two steps: [`Area::of`] finds the guarded subtree a
//! path belongs to (if any), then [`resolve`] maps the path to a concrete
//! view or a redirect. The navigator runs the area's guard between the two,
//! so nothing inside a guarded subtree is resolved for a denied session.

use core::fmt;
use core::str::FromStr;

use myfit_auth::{LOGIN_PATH, Role, RouteGuard};

pub const LANDING_PATH: &str = "/";
pub const MEMBER_PATH: &str = "/member";
pub const TRAINER_PATH: &str = "/trainer";
pub const ADMIN_PATH: &str = "/admin";

/// Pages of the admin subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    Users,
    Plans,
    Trainers,
    Revenue,
}

impl AdminSection {
    pub const ALL: [AdminSection; 4] = [
        AdminSection::Users,
        AdminSection::Plans,
        AdminSection::Trainers,
        AdminSection::Revenue,
    ];

    /// Where a bare `/admin` lands.
    pub const DEFAULT: AdminSection = AdminSection::Users;

    pub fn slug(&self) -> &'static str {
        match self {
            AdminSection::Users => "users",
            AdminSection::Plans => "plans",
            AdminSection::Trainers => "trainers",
            AdminSection::Revenue => "revenue",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            AdminSection::Users => "/admin/users",
            AdminSection::Plans => "/admin/plans",
            AdminSection::Trainers => "/admin/trainers",
            AdminSection::Revenue => "/admin/revenue",
        }
    }
}

impl FromStr for AdminSection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|section| section.slug() == s).ok_or(())
    }
}

/// A view the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Member,
    Trainer,
    Admin(AdminSection),
}

impl Route {
    /// Canonical path of the view.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => LANDING_PATH,
            Route::Login => LOGIN_PATH,
            Route::Member => MEMBER_PATH,
            Route::Trainer => TRAINER_PATH,
            Route::Admin(section) => section.path(),
        }
    }

    pub fn area(&self) -> Option<Area> {
        Area::of(self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A guarded subtree and the single role it admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Member,
    Trainer,
    Admin,
}

impl Area {
    /// The guarded subtree containing `path`, if any. Expects a normalized
    /// path (see [`normalize`]).
    pub fn of(path: &str) -> Option<Area> {
        [
            (MEMBER_PATH, Area::Member),
            (TRAINER_PATH, Area::Trainer),
            (ADMIN_PATH, Area::Admin),
        ]
        .into_iter()
        .find(|(root, _)| in_subtree(path, root))
        .map(|(_, area)| area)
    }

    pub fn role(&self) -> Role {
        match self {
            Area::Member => Role::Member,
            Area::Trainer => Role::Trainer,
            Area::Admin => Role::Admin,
        }
    }

    pub fn guard(&self) -> RouteGuard {
        RouteGuard::only(self.role())
    }
}

/// Outcome of matching one path against the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    /// Replace the current history entry with this path.
    Redirect(&'static str),
}

/// Drop the query string and fragment plus any trailing slash.
pub fn normalize(path: &str) -> String {
    let path = path.trim();
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');

    if trimmed.is_empty() {
        LANDING_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Match a normalized path. Performs no authorization.
pub fn resolve(path: &str) -> Resolution {
    match path {
        LANDING_PATH => return Resolution::Render(Route::Landing),
        LOGIN_PATH => return Resolution::Render(Route::Login),
        ADMIN_PATH => return Resolution::Redirect(AdminSection::DEFAULT.path()),
        _ => {}
    }

    match Area::of(path) {
        Some(Area::Member) => Resolution::Render(Route::Member),
        Some(Area::Trainer) => Resolution::Render(Route::Trainer),
        Some(Area::Admin) => path
            .strip_prefix("/admin/")
            .and_then(|rest| rest.parse::<AdminSection>().ok())
            .map(|section| Resolution::Render(Route::Admin(section)))
            .unwrap_or(Resolution::Redirect(LANDING_PATH)),
        None => Resolution::Redirect(LANDING_PATH),
    }
}

fn in_subtree(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
