//! The session flow behind the sign-in and sign-up screens.
//!
//! Tokens returned by the auth API go into the [`CredentialStore`]. A session check
//! asks the API who owns the stored access token; if the token is refused it tries
//! the refresh token once, and if that is refused too the store is wiped.
//! Network failures are reported without touching the store.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::client::{AuthApi, AuthTokens, LoginRequest, RegisterRequest};
use crate::error::AuthResult;
use crate::store::{CredentialStore, keys};
use crate::validation::{SignInForm, SignUpForm};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    SignedIn(Value),
    SignedOut,
}

impl SessionStatus {
    pub fn user(&self) -> Option<&Value> {
        match self {
            SessionStatus::SignedIn(user) => Some(user),
            SessionStatus::SignedOut => None,
        }
    }
}

pub struct SessionManager<A, S> {
    api: A,
    store: S,
}

impl<A: AuthApi, S: CredentialStore> SessionManager<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip_all, fields(identifier = %form.identifier))]
    pub async fn sign_in(&self, form: &SignInForm) -> AuthResult<SessionStatus> {
        form.validate()?;
        let request =
            LoginRequest { identifier: form.identifier.trim().to_string(), password: form.password.clone() };
        let tokens = self.api.login(&request).await?;
        info!("Signed in");
        self.save(tokens);
        self.check_session().await
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn sign_up(&self, form: &SignUpForm) -> AuthResult<SessionStatus> {
        form.validate()?;
        let request = RegisterRequest {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        let tokens = self.api.register(&request).await?;
        info!("Registered");
        self.save(tokens);
        self.check_session().await
    }

    /// Verifies the stored access token, refreshing it when it is refused.
    #[instrument(skip_all)]
    pub async fn check_session(&self) -> AuthResult<SessionStatus> {
        let Some(access_token) = self.store.get(keys::ACCESS_TOKEN) else {
            debug!("No stored access token");
            return Ok(SessionStatus::SignedOut);
        };

        let rejection = match self.api.me(&access_token).await {
            Ok(user) => {
                self.store.set(keys::USER, user.to_string());
                return Ok(SessionStatus::SignedIn(user));
            }
            Err(err) if err.is_rejection() => err,
            Err(err) => return Err(err),
        };

        let Some(refresh_token) = self.store.get(keys::REFRESH_TOKEN) else {
            warn!(error = %rejection, "Access token refused and no refresh token stored");
            self.store.clear();
            return Ok(SessionStatus::SignedOut);
        };

        match self.api.refresh(&refresh_token).await {
            Ok(tokens) => {
                info!("Session refreshed");
                let user = tokens.user.clone();
                self.save(tokens);
                Ok(SessionStatus::SignedIn(user))
            }
            Err(err) if err.is_rejection() => {
                warn!(error = %err, "Refresh token refused");
                self.store.clear();
                Ok(SessionStatus::SignedOut)
            }
            Err(err) => Err(err),
        }
    }

    pub fn sign_out(&self) {
        info!("Signed out");
        self.store.clear();
    }

    /// The user profile stored by the last successful check.
    pub fn current_user(&self) -> Option<Value> {
        self.store.get(keys::USER).and_then(|raw| serde_json::from_str(&raw).ok())
    }

    fn save(&self, tokens: AuthTokens) {
        self.store.set(keys::ACCESS_TOKEN, tokens.access_token);
        self.store.set(keys::REFRESH_TOKEN, tokens.refresh_token);
        self.store.set(keys::USER, tokens.user.to_string());
    }
}
