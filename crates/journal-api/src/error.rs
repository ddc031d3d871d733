use thiserror::Error;

/// Top-level error type for the `journal-api` crate.
///
/// Covers every failure mode of the client: missing configuration, the
/// OAuth token exchange, transport, data endpoints, and decoding.
/// `journal-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Client credentials were never set, or one of them is empty.
    #[error("Client not configured: {message}")]
    Configuration { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The client-credentials exchange was rejected or could not be performed.
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data API ────────────────────────────────────────────────────
    /// Non-2xx response from a data endpoint.
    #[error("API error (HTTP {status}) for {endpoint}: {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the failure happened before any data request
    /// could be authorized (missing credentials or a rejected exchange).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Authentication {
                source: Some(e), ..
            } => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
