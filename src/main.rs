//! Guardian risk engine -- demo HTTP server.
//!
//! Wires the engine (scorers, session store, dispatcher, retention
//! supervisor) onto a minimal axum router. No authentication middleware
//! is installed; a real deployment fills that seam in, the way the
//! teacher's own `auth::auth_middleware` layer does for its API.

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guardian_risk_engine::api::{router, AppState};
use guardian_risk_engine::session::RetentionSupervisor;
use guardian_risk_engine::{CipherConfig, PayloadCipher, RetentionPolicy, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let retention_policy = RetentionPolicy::from_env();
    let cipher_config = CipherConfig::from_env();
    let cipher = PayloadCipher::from_config(&cipher_config);
    let store = SessionStore::new(cipher);

    let mut supervisor = RetentionSupervisor::spawn(store.clone(), retention_policy);
    if supervisor.is_none() {
        info!("session_ttl_hours is 0, retention supervisor disabled");
    }

    let state = AppState::new(store, retention_policy);
    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            guardian_risk_engine::middleware::request_logging_simple,
        ));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("guardian-server listening on {addr}");

    let result = axum::serve(listener, app).await.context("server error");
    if let Some(supervisor) = supervisor.as_mut() {
        supervisor.shutdown().await;
    }
    result
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guardian_risk_engine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
