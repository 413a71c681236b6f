//! HTTP transport shared by every endpoint group.

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use myfit_auth::Session;

use crate::config::ClientConfig;
use crate::error::{ApiError, extract_message};

/// Client for the gym API.
///
/// The bearer token is read from the [`Session`] for every request, so a
/// login or logout is visible to the very next call without rebuilding the
/// client. Requests are independent: no retry, no dedup, no cancellation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Build a request, attaching `Authorization: Bearer` when a token is
    /// present and omitting the header otherwise.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let req = self.anonymous(method, path)?;
        Ok(match self.session.get() {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    /// Build a request that never carries the session token (login).
    pub(crate) fn anonymous(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(method = %method, path, "api request");
        Ok(self.http.request(method, url))
    }

    /// Send and turn non-2xx answers into [`ApiError::Status`].
    pub(crate) async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_string();
        let body = resp.text().await.unwrap_or_default();
        let message = extract_message(&body);
        tracing::warn!(status = status.as_u16(), path, "api request rejected");

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(self.request(Method::GET, path)?).await?;
        decode(resp).await
    }

    /// Send a JSON body and ignore whatever the server answers with.
    pub(crate) async fn send_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.request(method, path)?.json(body)).await?;
        Ok(())
    }

    /// Send a bodiless request (deletes, query-parameter updates).
    pub(crate) async fn send_empty<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &Q,
    ) -> Result<(), ApiError> {
        self.send(self.request(method, path)?.query(query)).await?;
        Ok(())
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// No query parameters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
