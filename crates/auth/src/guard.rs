use std::collections::HashSet;

use crate::claims::RoleClaim;
use crate::roles::Role;
use crate::session::Session;

/// Where every denied navigation ends up.
pub const LOGIN_PATH: &str = "/login";

/// Why a guarded navigation was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No token, or a token whose payload carries no usable role claim.
    NoRole,
    /// The claim names something outside the known role set.
    UnknownRole(String),
    /// A known role that is not in this subtree's allowlist.
    Disallowed(Role),
}

/// Result of evaluating a guard for one navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Role),
    /// Redirect to [`LOGIN_PATH`], replacing the current history entry.
    RedirectToLogin(DenyReason),
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render(_))
    }
}

/// Role allowlist protecting a subtree of views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: HashSet<Role>,
}

impl RouteGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn only(role: Role) -> Self {
        Self::new([role])
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Decide for an already decoded claim.
    ///
    /// - No IO
    /// - No panics
    /// - Total over [`RoleClaim`]
    pub fn evaluate(&self, claim: &RoleClaim) -> GuardDecision {
        let raw = match claim {
            RoleClaim::Invalid => return GuardDecision::RedirectToLogin(DenyReason::NoRole),
            RoleClaim::Decoded { role } => role,
        };

        match raw.parse::<Role>() {
            Ok(role) if self.allows(role) => GuardDecision::Render(role),
            Ok(role) => GuardDecision::RedirectToLogin(DenyReason::Disallowed(role)),
            Err(_) => GuardDecision::RedirectToLogin(DenyReason::UnknownRole(raw.clone())),
        }
    }

    /// Decode the session's current token and decide. Called on every
    /// navigation; the decision is never remembered.
    pub fn check(&self, session: &Session) -> GuardDecision {
        self.evaluate(&session.role_claim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(role: &str) -> RoleClaim {
        RoleClaim::Decoded {
            role: role.to_string(),
        }
    }

    #[test]
    fn allowed_role_renders() {
        let guard = RouteGuard::only(Role::Admin);
        assert_eq!(guard.evaluate(&decoded("ADMIN")), GuardDecision::Render(Role::Admin));
    }

    #[test]
    fn disallowed_role_redirects() {
        let guard = RouteGuard::only(Role::Admin);
        assert_eq!(
            guard.evaluate(&decoded("MEMBER")),
            GuardDecision::RedirectToLogin(DenyReason::Disallowed(Role::Member))
        );
    }

    #[test]
    fn invalid_claim_redirects() {
        let guard = RouteGuard::new(Role::ALL);
        assert_eq!(
            guard.evaluate(&RoleClaim::Invalid),
            GuardDecision::RedirectToLogin(DenyReason::NoRole)
        );
    }

    #[test]
    fn unknown_role_is_never_an_implicit_allow() {
        let guard = RouteGuard::new(Role::ALL);
        assert_eq!(
            guard.evaluate(&decoded("SUPERUSER")),
            GuardDecision::RedirectToLogin(DenyReason::UnknownRole("SUPERUSER".to_string()))
        );
    }

    #[test]
    fn empty_allowlist_denies_everyone() {
        let guard = RouteGuard::new([]);
        for role in Role::ALL {
            assert!(!guard.evaluate(&decoded(role.as_str())).is_render());
        }
    }

    #[test]
    fn check_follows_the_live_session() {
        let session = Session::in_memory();
        let guard = RouteGuard::only(Role::Member);
        assert!(!guard.check(&session).is_render());

        session.set("h.eyJyb2xlIjoiUk9MRV9NRU1CRVIifQ.s");
        assert_eq!(guard.check(&session), GuardDecision::Render(Role::Member));

        session.clear();
        assert_eq!(
            guard.check(&session),
            GuardDecision::RedirectToLogin(DenyReason::NoRole)
        );
    }
}
