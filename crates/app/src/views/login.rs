use myfit_auth::{LOGIN_PATH, Role, Session};
use myfit_client::{AuthApi, LoginRequest};

pub const LOGIN_FAILED: &str = "Invalid username or password";

/// Credential form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginView {
    pub error: Option<String>,
}

impl LoginView {
    /// Exchange credentials for a token and store it.
    ///
    /// Returns the path to navigate to: the role's home, or the login page
    /// again when the token carries no known role. `None` means the attempt
    /// failed and the session was left as it was.
    pub async fn submit(
        &mut self,
        api: &dyn AuthApi,
        session: &Session,
        username: &str,
        password: &str,
    ) -> Option<&'static str> {
        self.error = None;

        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let token = match api.login(&credentials).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(username, error = %err, "login failed");
                self.error = Some(LOGIN_FAILED.to_string());
                return None;
            }
        };

        session.set(token);
        let role = session.role_claim().role();
        tracing::info!(username, role = ?role, "logged in");

        Some(role.map(|r: Role| r.home_path()).unwrap_or(LOGIN_PATH))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use myfit_client::ApiError;

    use super::*;

    struct FixedToken(Result<String, ApiError>);

    #[async_trait]
    impl AuthApi for FixedToken {
        async fn login(&self, _credentials: &LoginRequest) -> Result<String, ApiError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn success_stores_token_and_routes_by_role() {
        // {"role":"ROLE_TRAINER"}
        let api = FixedToken(Ok("h.eyJyb2xlIjoiUk9MRV9UUkFJTkVSIn0.s".to_string()));
        let session = Session::in_memory();
        let mut view = LoginView::default();

        let next = view.submit(&api, &session, "tom", "pw").await;
        assert_eq!(next, Some("/trainer"));
        assert!(session.get().is_some());
        assert_eq!(view.error, None);
    }

    #[tokio::test]
    async fn token_without_role_returns_to_login() {
        // {"sub":"x"}
        let api = FixedToken(Ok("h.eyJzdWIiOiJ4In0.s".to_string()));
        let session = Session::in_memory();
        let mut view = LoginView::default();

        assert_eq!(view.submit(&api, &session, "x", "pw").await, Some("/login"));
    }

    #[tokio::test]
    async fn failure_sets_inline_error_and_keeps_session() {
        let api = FixedToken(Err(ApiError::Status {
            status: 401,
            message: "Bad credentials".to_string(),
        }));
        let session = Session::in_memory();
        session.set("previous");
        let mut view = LoginView::default();

        assert_eq!(view.submit(&api, &session, "ann", "nope").await, None);
        assert_eq!(view.error.as_deref(), Some(LOGIN_FAILED));
        assert_eq!(session.get().as_deref(), Some("previous"));
    }
}
