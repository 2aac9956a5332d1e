//! Error taxonomy for the risk engine.
//!
//! The engine never throws across its boundary for `NotFound` or
//! `NoEvidence` — callers treat those as ordinary return values. Cipher
//! failures never reach here at all; they're absorbed and logged at the
//! point of encryption/decryption (see `cipher.rs`).

use thiserror::Error;

/// Errors surfaced by session and dispatch operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("no evidence available for module {module}")]
    NoEvidence { module: &'static str },

    /// Reserved for future use — the shipped scorers are lenient and treat
    /// unrecognized input as a zero-weight contribution rather than raising.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
