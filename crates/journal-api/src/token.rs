// OAuth client-credentials token lifecycle
//
// One cached bearer token per manager. The slot sits behind an async
// mutex that stays locked for the whole exchange, so callers racing on a
// cold cache wait for the first exchange instead of starting their own.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use crate::auth::{Clock, Credentials, SystemClock};
use crate::error::Error;

/// A token is refreshed once it is this close to expiring.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

/// A bearer token and the instant the server says it stops working.
#[derive(Clone)]
pub struct AccessToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: SecretString, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    pub fn secret(&self) -> &SecretString {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Usable only while `now` is strictly before `expires_at - margin`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - TimeDelta::seconds(EXPIRY_MARGIN_SECS)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct TokenState {
    token_url: Url,
    credentials: Option<Credentials>,
    cached: Option<AccessToken>,
}

/// Owns client credentials and the single cached access token.
pub struct TokenManager {
    http: reqwest::Client,
    state: Mutex<TokenState>,
    clock: Arc<dyn Clock>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, token_url: Url) -> Self {
        Self {
            http,
            state: Mutex::new(TokenState {
                token_url,
                credentials: None,
                cached: None,
            }),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source (tests drive expiry with a manual clock).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Store new credentials. Any cached token is dropped, even if the
    /// credentials are identical to the previous ones.
    pub async fn configure(&self, credentials: Credentials) {
        let mut state = self.state.lock().await;
        debug!(client_id = %credentials.client_id, "client credentials configured");
        state.credentials = Some(credentials);
        state.cached = None;
    }

    /// Point the exchange at another authorization endpoint.
    ///
    /// A token issued by a different endpoint is not reused.
    pub async fn set_token_url(&self, token_url: Url) {
        let mut state = self.state.lock().await;
        if state.token_url != token_url {
            state.token_url = token_url;
            state.cached = None;
        }
    }

    /// Forget credentials and token.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.credentials = None;
        state.cached = None;
    }

    /// Both credential values are non-empty. Not validated against the server.
    pub async fn is_configured(&self) -> bool {
        self.state
            .lock()
            .await
            .credentials
            .as_ref()
            .is_some_and(Credentials::is_complete)
    }

    /// Expiry of the cached token, if one is held.
    pub async fn cached_expiry(&self) -> Option<DateTime<Utc>> {
        self.state
            .lock()
            .await
            .cached
            .as_ref()
            .map(AccessToken::expires_at)
    }

    /// Return a usable bearer token, exchanging credentials when the cache
    /// is empty or within [`EXPIRY_MARGIN_SECS`] of expiry.
    pub async fn get_token(&self) -> Result<SecretString, Error> {
        self.get_access_token().await.map(|t| t.value)
    }

    /// Same as [`get_token`](Self::get_token) but keeps the expiry.
    pub async fn get_access_token(&self) -> Result<AccessToken, Error> {
        let mut state = self.state.lock().await;

        let credentials = match &state.credentials {
            Some(c) if c.is_complete() => c.clone(),
            Some(_) => {
                return Err(Error::Configuration {
                    message: "client id and client secret must both be non-empty".into(),
                });
            }
            None => {
                return Err(Error::Configuration {
                    message: "client credentials have not been set".into(),
                });
            }
        };

        let now = self.clock.now();
        if let Some(token) = state.cached.as_ref().filter(|t| t.is_fresh(now)) {
            debug!("reusing cached access token");
            return Ok(token.clone());
        }

        let token = self.exchange(&state.token_url, &credentials).await?;
        state.cached = Some(token.clone());
        Ok(token)
    }

    async fn exchange(&self, token_url: &Url, credentials: &Credentials) -> Result<AccessToken, Error> {
        debug!("requesting access token at {}", token_url);

        let resp = self
            .http
            .post(token_url.clone())
            .basic_auth(
                &credentials.client_id,
                Some(credentials.client_secret.expose_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Authentication {
                message: format!("token exchange failed: {e}"),
                source: Some(e),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token exchange rejected (HTTP {status}): {body}"),
                source: None,
            });
        }

        let body = resp.text().await.map_err(|e| Error::Authentication {
            message: format!("failed to read token response: {e}"),
            source: Some(e),
        })?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Authentication {
                message: format!("malformed token response: {e}"),
                source: None,
            })?;

        let lifetime = TimeDelta::try_seconds(parsed.expires_in).unwrap_or_else(TimeDelta::zero);
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| Error::Authentication {
                message: format!("token lifetime out of range: {}s", parsed.expires_in),
                source: None,
            })?;
        info!(%expires_at, "obtained access token");

        Ok(AccessToken::new(
            SecretString::from(parsed.access_token),
            expires_at,
        ))
    }
}
