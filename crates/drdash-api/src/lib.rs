//! drdash-api: HTTP client for the DR dashboard backend.
//!
//! Wraps `reqwest::Client` with dashboard-specific URL construction and
//! `{ code, data, message }` envelope unwrapping. All methods return the
//! unwrapped `data` payload -- the envelope is stripped before the caller
//! sees it. `drdash-core` maps the error type into user-facing diagnostics.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DashboardClient;
pub use error::Error;
pub use models::{DashboardTitles, DatabaseStatus};
pub use transport::TransportConfig;
