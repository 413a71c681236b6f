use async_trait::async_trait;
use reqwest::Method;

use crate::client::{ApiClient, decode};
use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiError;

/// Credential exchange.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Trade credentials for a bearer token. Does not touch the session.
    async fn login(&self, credentials: &LoginRequest) -> Result<String, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<String, ApiError> {
        let req = self
            .anonymous(Method::POST, "/api/auth/login")?
            .json(credentials);
        let resp = self.send(req).await?;
        let body: LoginResponse = decode(resp).await?;
        Ok(body.token)
    }
}
