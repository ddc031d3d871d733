//! CLI configuration: a thin layer over `journal_config`.
//!
//! Adds resolution that respects `GlobalOpts` overrides. Precedence for
//! every setting is flag/env, then profile, then `[defaults]`.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use journal_config::ConfigError;
use journal_core::{ApiHosts, Credentials, JournalConfig, Locale, Region, TlsMode};

use crate::cli::{GlobalOpts, RegionArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use journal_config::{
    Config, Defaults, Profile, config_path, load_config, save_config, store_client_secret,
};

/// Where the client secret came from, for `auth status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Flag,
    Profile,
    Missing,
}

/// A fully resolved invocation context.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub journal: JournalConfig,
    pub client_id: Option<String>,
    pub secret_source: SecretSource,
}

impl Resolved {
    /// The `JournalConfig`, failing if no complete credentials were found.
    pub fn require_credentials(self) -> Result<JournalConfig, CliError> {
        if self.journal.credentials.is_some() {
            Ok(self.journal)
        } else {
            Err(CliError::NoCredentials {
                profile: self.profile_name,
            })
        }
    }
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Us => Region::Us,
            RegionArg::Eu => Region::Eu,
            RegionArg::Kr => Region::Kr,
            RegionArg::Tw => Region::Tw,
        }
    }
}

pub fn parse_locale(value: &str) -> Result<Locale, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: "locale".into(),
        reason: format!("unsupported locale '{value}' (run `journal locales`)"),
    })
}

fn parse_url(field: &str, value: &str) -> Result<Url, CliError> {
    Url::parse(value).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{value}': {e}"),
    })
}

/// `--api-url` / `--oauth-url` replace the regional hosts. Either one
/// alone keeps the regional default for the other.
fn resolve_hosts(global: &GlobalOpts, region: Region) -> Result<ApiHosts, CliError> {
    if global.api_url.is_none() && global.oauth_url.is_none() {
        return Ok(ApiHosts::Regional);
    }
    let api_base = match &global.api_url {
        Some(url) => parse_url("api-url", url)?,
        None => parse_url("api-url", &region.api_base())?,
    };
    let token_url = match &global.oauth_url {
        Some(url) => parse_url("oauth-url", url)?,
        None => parse_url("oauth-url", &region.token_url())?,
    };
    Ok(ApiHosts::Custom {
        token_url,
        api_base,
    })
}

/// Build the runtime configuration from file, profile and flags.
///
/// Missing credentials are not an error here; callers that need them use
/// [`Resolved::require_credentials`].
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name);

    if profile.is_none() && global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    // 1. Region and hosts
    let region = global
        .region
        .map(Region::from)
        .or_else(|| profile.map(|p| p.region))
        .unwrap_or_default();
    let hosts = resolve_hosts(global, region)?;

    // 2. Locale
    let locale = match &global.locale {
        Some(value) => parse_locale(value)?,
        None => profile
            .and_then(|p| p.locale)
            .unwrap_or(cfg.defaults.locale),
    };

    // 3. Transport
    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);
    let tls = profile
        .and_then(|p| p.ca_cert.clone())
        .map_or(TlsMode::System, TlsMode::CustomCa);

    // 4. Credentials (flag > env > profile chain)
    let client_id = global
        .client_id
        .clone()
        .or_else(|| profile.map(|p| p.client_id.clone()))
        .filter(|id| !id.trim().is_empty());

    let (secret, secret_source) = if let Some(ref secret) = global.client_secret {
        (Some(SecretString::from(secret.clone())), SecretSource::Flag)
    } else if let Some(p) = profile {
        match journal_config::resolve_client_secret(p, &profile_name) {
            Ok(secret) => (Some(secret), SecretSource::Profile),
            Err(ConfigError::NoCredentials { .. }) => (None, SecretSource::Missing),
            Err(e) => return Err(e.into()),
        }
    } else {
        (None, SecretSource::Missing)
    };

    let credentials = match (&client_id, secret) {
        (Some(id), Some(secret)) => Some(Credentials::new(id.trim(), secret)),
        _ => None,
    };

    Ok(Resolved {
        profile_name,
        journal: JournalConfig {
            credentials,
            region,
            locale,
            tls,
            timeout: Duration::from_secs(timeout),
            hosts,
        },
        client_id,
        secret_source,
    })
}
