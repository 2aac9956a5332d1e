//! Middleware for observability.
//!
//! Rate limiting is left to the deployer (out of scope for the engine);
//! only request logging is carried into the demo transport.

pub mod logging;

pub use logging::{request_logging, request_logging_simple};
