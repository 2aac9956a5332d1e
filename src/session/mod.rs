//! In-memory session storage, dispatch, and retention.
//!
//! The store's concurrency design mirrors the teacher's
//! `middleware::rate_limit::RateLimitLayer`: a single `Arc<Mutex<HashMap>>`
//! taken once per call, never held across an await point.

pub mod dispatcher;
pub mod retention;
pub mod store;

pub use dispatcher::Dispatcher;
pub use retention::RetentionSupervisor;
pub use store::SessionStore;
