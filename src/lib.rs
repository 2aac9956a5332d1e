//! Guardian risk engine.
//!
//! Four pure Scorers, a session-scoped event log, field-level encryption
//! at rest, and a background retention sweep. The HTTP layer in
//! `api`/`main.rs` is a thin demo consumer of this library's public API.

pub mod api;
pub mod cipher;
pub mod config;
pub mod error;
pub mod llm;
pub mod middleware;
pub mod scorers;
pub mod session;
pub mod types;

pub use cipher::PayloadCipher;
pub use config::{CipherConfig, RetentionPolicy};
pub use error::{EngineError, EngineResult};
pub use session::{Dispatcher, RetentionSupervisor, SessionStore};
