// ── Core error types ──
//
// User-facing errors from journal-core. The `From<journal_api::Error>` impl
// folds transport details into a handful of variants the CLI can map to
// exit codes and hints.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Setup ────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Connectivity ─────────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}) for {endpoint}: {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
    },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_owned(),
            identifier: identifier.to_string(),
        }
    }

    /// Re-label a generic 404 with the entity that was asked for.
    pub(crate) fn or_not_found(self, entity_type: &str, identifier: impl ToString) -> Self {
        match self {
            Self::NotFound { .. } => Self::not_found(entity_type, identifier),
            other => other,
        }
    }
}

// ── Conversion from api-layer errors ─────────────────────────────────

fn url_of(e: &reqwest::Error) -> String {
    e.url()
        .map_or_else(|| "<unknown>".into(), ToString::to_string)
}

impl From<journal_api::Error> for CoreError {
    fn from(err: journal_api::Error) -> Self {
        use journal_api::Error as Api;

        match err {
            Api::Configuration { message } => CoreError::Configuration { message },
            Api::Authentication { message, .. } => CoreError::AuthenticationFailed { message },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { url: url_of(e) }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: url_of(e),
                        reason: e.to_string(),
                    }
                } else if let Some(status) = e.status() {
                    CoreError::Api {
                        status: status.as_u16(),
                        endpoint: e.url().map(|u| u.path().to_owned()).unwrap_or_default(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: url_of(e),
                        reason: e.to_string(),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Configuration {
                message: format!("Invalid URL: {e}"),
            },
            Api::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {reason}"),
            },
            Api::Api {
                status: 404,
                endpoint,
                ..
            } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: endpoint,
            },
            Api::Api {
                status,
                endpoint,
                message,
            } => CoreError::Api {
                status,
                endpoint,
                message,
            },
            Api::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response: {message}"))
            }
        }
    }
}
