//! Demo HTTP transport over the engine.
//!
//! This wiring is not part of the engine's contract (spec.md §1 treats
//! transport as an external collaborator) -- it exists so the six
//! external operations have a concrete, runnable caller. No authentication
//! middleware is installed here; that's the seam a real deployment fills
//! in, the way the teacher's `auth::auth_middleware` does for its own API.

pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::RetentionPolicy;
use crate::llm::{EnrichmentBackend, NullEnrichment};
use crate::session::{Dispatcher, RetentionSupervisor, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub dispatcher: Dispatcher,
    pub retention_policy: RetentionPolicy,
    pub enrichment: Arc<dyn EnrichmentBackend>,
}

impl AppState {
    pub fn new(store: SessionStore, retention_policy: RetentionPolicy) -> Self {
        let dispatcher = Dispatcher::new(store.clone());
        Self {
            store,
            dispatcher,
            retention_policy,
            enrichment: Arc::new(NullEnrichment),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/v1/session/start", post(routes::start_session))
        .route("/v1/session/:id/event", post(routes::append_event))
        .route("/v1/session/:id/end", post(routes::end_session))
        .route("/v1/session/:id", get(routes::get_session))
        .route("/v1/callguard/assess", post(routes::callguard_assess))
        .route("/v1/moneyguard/assess", post(routes::moneyguard_assess))
        .route("/v1/moneyguard/safe_steps", get(routes::moneyguard_safe_steps))
        .route("/v1/inboxguard/text", post(routes::inboxguard_text))
        .route("/v1/inboxguard/url", post(routes::inboxguard_url))
        .route("/v1/identitywatch/assess", post(routes::identitywatch_assess))
        .route("/v1/data-retention/policy", get(routes::retention_policy))
        .with_state(state)
}
