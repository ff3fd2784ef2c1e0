//! Client for the external auth API.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Tokens issued on login, registration or refresh. The user profile is kept as
/// the API sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Value,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> AuthResult<AuthTokens>;
    async fn register(&self, request: &RegisterRequest) -> AuthResult<AuthTokens>;
    /// Profile of the user owning `access_token`.
    async fn me(&self, access_token: &str) -> AuthResult<Value>;
    async fn refresh(&self, refresh_token: &str) -> AuthResult<AuthTokens>;
}

/// JSON-over-HTTP implementation of [`AuthApi`].
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    http: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>) -> AuthResult<Self> {
        let http = Client::builder().build().map_err(|e| AuthError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Reads the API location from `SPLITPAY_AUTH_BASE_URL`
    /// (default: `http://localhost:8000`).
    pub fn from_env() -> AuthResult<Self> {
        let base_url = std::env::var("SPLITPAY_AUTH_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> AuthResult<AuthTokens> {
        debug!(identifier = %request.identifier, "POST /auth/login");
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        read_json(response, "Invalid credentials").await
    }

    async fn register(&self, request: &RegisterRequest) -> AuthResult<AuthTokens> {
        debug!(email = %request.email, "POST /auth/register");
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        read_json(response, "Registration failed").await
    }

    async fn me(&self, access_token: &str) -> AuthResult<Value> {
        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(network)?;
        let body: Value = read_json(response, "Session expired").await?;
        // some deployments wrap the profile in `user`, others return it bare
        Ok(match body.get("user") {
            Some(user) if !user.is_null() => user.clone(),
            _ => body,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<AuthTokens> {
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(network)?;
        read_json(response, "Session expired").await
    }
}

fn network(err: reqwest::Error) -> AuthError {
    warn!(error = %err, "Auth API unreachable");
    AuthError::Network(err.to_string())
}

/// Decodes a success body, or turns an error status into an [`AuthError`] using
/// the body's `message` when present.
async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> AuthResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| AuthError::Decode(e.to_string()));
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| fallback.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::Unauthorized(message)),
        _ => Err(AuthError::Server { status: status.as_u16(), message }),
    }
}
