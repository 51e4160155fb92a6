//! HTTP gateway for the Aries platform API.
//!
//! This crate is the sole egress point for remote calls: it attaches the
//! current bearer token, normalizes responses and errors, and detects
//! session expiry. The token lives in an explicit [`Session`] context whose
//! only writer is the gateway; everything else reads through it.

mod client;
mod config;
mod error;
mod session;

pub use client::ApiClient;
pub use config::{Config, ConfigError};
pub use error::{ApiError, ApiResult};
pub use session::{AccountSnapshot, Session, SessionEvent};
