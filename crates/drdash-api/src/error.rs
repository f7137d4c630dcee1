use thiserror::Error;

/// Top-level error type for the `drdash-api` crate.
///
/// Covers the three failure modes the backend boundary can produce:
/// transport (request never completed), decode (response is not the
/// expected shape), and application (well-formed envelope with a
/// non-success code). `drdash-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing or construction error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },

    // ── Application ─────────────────────────────────────────────────
    /// The backend returned a well-formed envelope with `code != 200`.
    #[error("Backend error (code {code}): {message}")]
    Application { code: i64, message: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying on
    /// the next poll cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The application error code, if available.
    pub fn application_code(&self) -> Option<i64> {
        match self {
            Self::Application { code, .. } => Some(*code),
            _ => None,
        }
    }
}
