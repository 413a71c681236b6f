//! History and per-navigation guard evaluation.

use myfit_auth::{DenyReason, GuardDecision, LOGIN_PATH, Role, Session};

use crate::routes::{Area, Resolution, Route, normalize, resolve};

/// Upper bound on redirects followed for one navigation.
const MAX_REDIRECTS: usize = 8;

/// Where one navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub route: Route,
    /// Role the guard admitted, for guarded routes.
    pub role: Option<Role>,
    /// Set when a guard turned the request away.
    pub denied: Option<DenyReason>,
}

/// Owns the history stack and consults the session on every move.
///
/// A navigation adds exactly one history entry: the route finally rendered.
/// Intermediate redirects replace each other and never become reachable
/// through [`Navigator::back`].
#[derive(Debug, Clone)]
pub struct Navigator {
    session: Session,
    history: Vec<Route>,
}

impl Navigator {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            history: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current(&self) -> Option<Route> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Push a navigation to `path`.
    pub fn navigate(&mut self, path: &str) -> Outcome {
        let outcome = self.settle(path);
        self.history.push(outcome.route);
        outcome
    }

    /// Pop the current entry and re-evaluate the one underneath. The guard
    /// runs again, so an entry rendered under an old session may now
    /// redirect. With a single entry this just re-evaluates it.
    pub fn back(&mut self) -> Outcome {
        if self.history.len() > 1 {
            self.history.pop();
        }
        let target = self.current().unwrap_or(Route::Landing);
        self.replace(target.path())
    }

    /// Re-run the guard for the current entry without moving.
    pub fn reload(&mut self) -> Outcome {
        let target = self.current().unwrap_or(Route::Landing);
        self.replace(target.path())
    }

    /// Clear the token and go to the login view.
    pub fn logout(&mut self) -> Outcome {
        self.session.clear();
        tracing::info!("logged out");
        self.navigate(LOGIN_PATH)
    }

    fn replace(&mut self, path: &str) -> Outcome {
        let outcome = self.settle(path);
        match self.history.last_mut() {
            Some(top) => *top = outcome.route,
            None => self.history.push(outcome.route),
        }
        outcome
    }

    /// Follow guards and redirects from `path` to a renderable route.
    fn settle(&self, path: &str) -> Outcome {
        let mut path = normalize(path);
        let mut denied = None;

        for _ in 0..MAX_REDIRECTS {
            let mut role = None;

            if let Some(area) = Area::of(&path) {
                match area.guard().check(&self.session) {
                    GuardDecision::Render(admitted) => role = Some(admitted),
                    GuardDecision::RedirectToLogin(reason) => {
                        tracing::debug!(path = %path, reason = ?reason, "guard redirect");
                        denied = Some(reason);
                        path = LOGIN_PATH.to_string();
                        continue;
                    }
                }
            }

            match resolve(&path) {
                Resolution::Render(route) => {
                    return Outcome {
                        route,
                        role,
                        denied,
                    };
                }
                Resolution::Redirect(to) => {
                    tracing::debug!(from = %path, to, "route redirect");
                    path = to.to_string();
                }
            }
        }

        tracing::warn!(path = %path, "too many redirects, falling back to landing");
        Outcome {
            route: Route::Landing,
            role: None,
            denied,
        }
    }
}
