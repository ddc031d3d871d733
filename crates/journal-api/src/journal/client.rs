// Journal API HTTP client
//
// Wraps `reqwest::Client` with token injection, region-aware URL
// construction and the `namespace`/`locale`/`access_token` query contract.
// Endpoint groups (expansions, instances, encounters) are implemented as
// inherent methods in sibling files to keep this module about transport.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{Clock, Credentials};
use crate::error::Error;
use crate::locale::Locale;
use crate::region::{ApiHosts, Region};
use crate::token::TokenManager;
use crate::transport::TransportConfig;

// ── Error response shape from the data API ──────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the game-journal data API.
///
/// Owns the [`TokenManager`]; every data request obtains a token first, so
/// callers only ever deal with credentials, region and locale.
pub struct JournalClient {
    http: reqwest::Client,
    hosts: ApiHosts,
    region: Region,
    tokens: TokenManager,
}

impl JournalClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with regional hosts from a `TransportConfig`.
    pub fn new(region: Region, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, region, ApiHosts::Regional)
    }

    /// Wrap a pre-built `reqwest::Client` with explicit hosts.
    ///
    /// Tests point `ApiHosts::Custom` at a mock server.
    pub fn with_client(http: reqwest::Client, region: Region, hosts: ApiHosts) -> Result<Self, Error> {
        let token_url = hosts.token_url(region)?;
        let tokens = TokenManager::new(http.clone(), token_url);
        Ok(Self {
            http,
            hosts,
            region,
            tokens,
        })
    }

    /// Replace the token manager's time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tokens = self.tokens.with_clock(clock);
        self
    }

    // ── Configuration surface ────────────────────────────────────────

    /// Set client credentials, invalidating any cached token.
    pub async fn configure(&self, client_id: impl Into<String>, client_secret: SecretString) {
        self.tokens
            .configure(Credentials::new(client_id, client_secret))
            .await;
    }

    /// Switch region. The namespace and (for regional hosts) both hosts follow.
    pub async fn set_region(&mut self, region: Region) -> Result<(), Error> {
        let token_url = self.hosts.token_url(region)?;
        self.tokens.set_token_url(token_url).await;
        self.region = region;
        Ok(())
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// `static-{region}`
    pub fn namespace(&self) -> String {
        self.region.namespace()
    }

    pub fn hosts(&self) -> &ApiHosts {
        &self.hosts
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// True iff both credential values are non-empty.
    ///
    /// Nothing is sent to the server; a wrong secret still reports `true`
    /// until the first request. Use [`verify`](Self::verify) for a real check.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.is_configured().await
    }

    /// Obtain a token now and return its expiry.
    pub async fn verify(&self) -> Result<DateTime<Utc>, Error> {
        let token = self.tokens.get_access_token().await?;
        Ok(token.expires_at())
    }

    /// Drop credentials and the cached token.
    pub async fn sign_out(&self) {
        self.tokens.clear().await;
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Authenticated GET against a data endpoint path.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, locale: Locale) -> Result<T, Error> {
        let token = self.tokens.get_token().await?;
        let url = self.hosts.endpoint_url(self.region, endpoint)?;
        debug!(locale = %locale, "GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(&query_params(self.region, locale, &token))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::handle_response(endpoint, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(endpoint, status, resp).await);
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(
        endpoint: &str,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
    ) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                detail: Some(detail),
                kind,
            }) => match kind {
                Some(kind) => format!("{detail} ({kind})"),
                None => detail,
            },
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            status: status.as_u16(),
            endpoint: endpoint.to_owned(),
            message,
        }
    }
}

fn query_params(region: Region, locale: Locale, token: &SecretString) -> [(&'static str, String); 3] {
    [
        ("namespace", region.namespace()),
        ("locale", locale.as_str().to_owned()),
        ("access_token", token.expose_secret().to_owned()),
    ]
}
