//! Config subcommand handlers.

use std::collections::BTreeMap;

use dialoguer::{Input, Select};
use secrecy::SecretString;
use strum::IntoEnumIterator;

use journal_core::{Locale, Region};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const VALID_KEYS: &str = "client_id, client_secret_env, region, locale, ca_cert, timeout";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext secrets masked, for `config show`.
fn redacted(cfg: &Config) -> Config {
    let profiles: BTreeMap<String, Profile> = cfg
        .profiles
        .iter()
        .map(|(name, p)| {
            let mut p = p.clone();
            if p.client_secret.is_some() {
                p.client_secret = Some("****".into());
            }
            (name.clone(), p)
        })
        .collect();
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            timeout: cfg.defaults.timeout,
            locale: cfg.defaults.locale,
        },
        profiles,
    }
}

/// Human-readable TOML-ish rendering of a (redacted) config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "locale = \"{}\"", cfg.defaults.locale);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "client_id = \"{}\"", p.client_id);
        if let Some(ref secret) = p.client_secret {
            let _ = writeln!(out, "client_secret = \"{secret}\"");
        }
        if let Some(ref env) = p.client_secret_env {
            let _ = writeln!(out, "client_secret_env = \"{env}\"");
        }
        let _ = writeln!(out, "region = \"{}\"", p.region);
        if let Some(locale) = p.locale {
            let _ = writeln!(out, "locale = \"{locale}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    CliError::ProfileNotFound {
        name,
        available: config::available_profiles(cfg),
    }
}

/// Apply one `config set` key to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "client_id" | "client-id" => profile.client_id = value,
        "client_secret_env" | "client-secret-env" => profile.client_secret_env = Some(value),
        "region" => {
            profile.region = value.parse().map_err(|_| CliError::Validation {
                field: "region".into(),
                reason: "must be one of us, eu, kr, tw".into(),
            })?;
        }
        "locale" => profile.locale = Some(config::parse_locale(&value)?),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {VALID_KEYS}"),
            });
        }
    }
    Ok(())
}

/// Prompt for a non-empty client secret.
fn prompt_secret() -> Result<SecretString, CliError> {
    let secret = rpassword::prompt_password("Client secret: ").map_err(prompt_err)?;
    if secret.trim().is_empty() {
        return Err(CliError::Validation {
            field: "client_secret".into(),
            reason: "client secret cannot be empty".into(),
        });
    }
    Ok(SecretString::from(secret.trim().to_owned()))
}

/// Offer the keyring, falling back to plaintext on request.
///
/// Returns `Some(secret)` when the user chose plaintext, `None` when the
/// secret went to the keyring.
fn prompt_secret_storage(
    profile_name: &str,
    secret: &SecretString,
) -> Result<Option<String>, CliError> {
    use secrecy::ExposeSecret;

    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the client secret?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_client_secret(profile_name, secret)?;
        eprintln!("   ✓ Client secret stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret.expose_secret().to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("Journal CLI configuration wizard");
            eprintln!("   Config path: {}", config_path.display());
            eprintln!("   Create an API client at https://develop.battle.net/access/clients\n");

            let mut cfg = config::load_config()?;

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Credentials
            let client_id: String = Input::new()
                .with_prompt("Client ID")
                .interact_text()
                .map_err(prompt_err)?;
            if client_id.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "client_id".into(),
                    reason: "client id cannot be empty".into(),
                });
            }
            let client_secret = prompt_secret_storage(&profile_name, &prompt_secret()?)?;

            // 3. Region
            let regions: Vec<Region> = Region::iter().collect();
            let region_labels: Vec<String> = regions.iter().map(ToString::to_string).collect();
            let region_index = Select::new()
                .with_prompt("Region")
                .items(&region_labels)
                .default(regions.iter().position(|r| *r == Region::default()).unwrap_or(0))
                .interact()
                .map_err(prompt_err)?;

            // 4. Locale
            let locales: Vec<Locale> = Locale::all().collect();
            let locale_labels: Vec<String> = locales
                .iter()
                .map(|l| format!("{l} ({})", l.native_name()))
                .collect();
            let locale_index = Select::new()
                .with_prompt("Display locale")
                .items(&locale_labels)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let profile = Profile {
                client_id: client_id.trim().to_owned(),
                client_secret,
                region: regions.get(region_index).copied().unwrap_or_default(),
                locale: locales.get(locale_index).copied(),
                ..Profile::default()
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: journal auth check");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(global.output, &cfg, format_config, |c| {
                c.active_profile_name().to_owned()
            })?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_key(profile, &key, value)?;
            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.active_profile_name();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: journal config init");
            } else {
                let listing = cfg
                    .profiles
                    .keys()
                    .map(|name| {
                        let marker = if name == default { " *" } else { "" };
                        format!("{name}{marker}")
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                output::print_output(&listing, global.quiet)?;
            }
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetSecret ───────────────────────────────────────────────
        ConfigCommand::SetSecret { profile } => {
            let cfg = config::load_config()?;
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(profile_name, &cfg));
            }
            config::store_client_secret(&profile_name, &prompt_secret()?)?;
            eprintln!("✓ Client secret stored in system keyring for profile '{profile_name}'");
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet)?;
            Ok(())
        }
    }
}
