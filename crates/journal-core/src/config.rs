// ── Runtime journal configuration ──
//
// Describes how to reach the data API: credentials, region, locale and
// transport tuning. Never touches disk; the CLI builds one from a profile.

use std::time::Duration;

use journal_api::{ApiHosts, Credentials, Locale, Region, TlsMode, TransportConfig};

/// Everything `Journal::new` needs.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Client credentials. `None` defers sign-in to the caller.
    pub credentials: Option<Credentials>,
    pub region: Region,
    pub locale: Locale,
    pub tls: TlsMode,
    /// Per-request timeout for both the token exchange and data requests.
    pub timeout: Duration,
    /// Regional Battle.net hosts unless overridden.
    pub hosts: ApiHosts,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            region: Region::default(),
            locale: Locale::default(),
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            hosts: ApiHosts::default(),
        }
    }
}

impl JournalConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
