// ── Core error types ──
//
// User-facing errors from drdash-core. Consumers never see reqwest
// errors or JSON parse failures directly -- the `From<drdash_api::Error>`
// impl translates transport-layer errors into domain-appropriate
// variants. Clone-able so the error can live inside the broadcast
// dashboard state.

use thiserror::Error;

/// Unified error type for the core crate.
///
/// The three variants mirror the poll failure taxonomy: the request
/// never completed, the response was unreadable, or the backend itself
/// reported a failure. All three are handled identically at the
/// controller boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Cannot reach the dashboard backend: {reason}")]
    Unreachable { reason: String },

    #[error("Backend returned an unreadable response: {reason}")]
    BadResponse { reason: String },

    #[error("Backend reported a failure (code {code}): {message}")]
    Backend { code: i64, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<drdash_api::Error> for CoreError {
    fn from(err: drdash_api::Error) -> Self {
        match err {
            drdash_api::Error::Transport(e) => Self::Unreachable {
                reason: e.to_string(),
            },
            drdash_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            drdash_api::Error::Decode { message, .. } => Self::BadResponse { reason: message },
            drdash_api::Error::Application { code, message } => Self::Backend { code, message },
        }
    }
}
