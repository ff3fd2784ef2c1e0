#![deny(warnings)]
#![allow(missing_docs)]
//! SplitPay HTTP API
//!
//! Hosts split wizards as in-memory sessions so that a browser front-end can drive
//! contact selection, amount entry and the allocation table over JSON.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::routing::{get, patch, post, put};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use splitpay_core::{Participant, SplitWizard};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod handlers;
pub mod tracing_setup;
pub mod types;

use config::SplitPayConfig;
use error::{ApiError, ApiResult};

/// Shared state: one wizard per session id.
#[derive(Debug)]
pub struct AppState {
    pub start_time: DateTime<Utc>,
    pub config: SplitPayConfig,
    sessions: DashMap<Uuid, SplitWizard>,
    /// Sessions held or being created; never exceeds `limits.max_sessions`
    reserved: AtomicUsize,
}

impl AppState {
    pub fn new(config: SplitPayConfig) -> Self {
        Self {
            start_time: Utc::now(),
            config,
            sessions: DashMap::new(),
            reserved: AtomicUsize::new(0),
        }
    }

    pub fn elapsed(&self) -> Duration {
        (Utc::now() - self.start_time).to_std().unwrap_or_default()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Starts a wizard over `contacts` after checking ids and the configured limits.
    pub fn create_session(&self, contacts: Vec<Participant>) -> ApiResult<Uuid> {
        let limits = &self.config.limits;
        if contacts.len() > limits.max_contacts {
            return Err(ApiError::validation_field(
                "contacts",
                format!("at most {} contacts are allowed", limits.max_contacts),
            ));
        }

        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            if contact.id.trim().is_empty() {
                return Err(ApiError::validation_field("contacts", "contact ids must not be empty"));
            }
            if !seen.insert(contact.id.as_str()) {
                return Err(ApiError::validation_field(
                    "contacts",
                    format!("duplicate contact id {}", contact.id),
                ));
            }
        }

        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |held| {
                (held < limits.max_sessions).then_some(held + 1)
            })
            .map_err(|_| ApiError::ServiceUnavailable {
                message: format!("session limit of {} reached", limits.max_sessions),
            })?;

        let id = Uuid::new_v4();
        info!(session_id = %id, contacts = contacts.len(), "Creating wizard session");
        self.sessions.insert(id, SplitWizard::new(contacts));
        Ok(id)
    }

    /// Runs `f` on one session while holding that session's entry lock.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SplitWizard) -> ApiResult<R>,
    ) -> ApiResult<R> {
        let mut wizard = self.sessions.get_mut(&id).ok_or_else(|| ApiError::session_not_found(id))?;
        f(wizard.value_mut())
    }

    pub fn remove_session(&self, id: Uuid) -> ApiResult<()> {
        self.sessions.remove(&id).ok_or_else(|| ApiError::session_not_found(id))?;
        self.reserved.fetch_sub(1, Ordering::AcqRel);
        info!(session_id = %id, "Removed wizard session");
        Ok(())
    }
}

pub fn create_app(config: SplitPayConfig) -> anyhow::Result<Router> {
    config.validate()?;
    let body_limit = config.limits.max_body_size_kb * 1024;
    let state = Arc::new(AppState::new(config));

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{id}/selection", put(handlers::update_selection))
        .route("/sessions/{id}/amount", put(handlers::update_amount))
        .route("/sessions/{id}/next", post(handlers::next_step))
        .route("/sessions/{id}/back", post(handlers::previous_step))
        .route("/sessions/{id}/allocations/{participant_id}", patch(handlers::edit_field))
        .route(
            "/sessions/{id}/allocations/{participant_id}/commit",
            post(handlers::commit_field),
        )
        .route("/sessions/{id}/reset", post(handlers::reset_to_equal))
        .route("/sessions/{id}/confirm", post(handlers::confirm))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
        .with_state(state);

    Ok(router)
}
