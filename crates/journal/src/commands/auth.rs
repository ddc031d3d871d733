//! Auth command handlers.

use serde::Serialize;

use journal_core::Journal;

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config::{Resolved, SecretSource};
use crate::error::CliError;
use crate::output::{self, Painter};

// ── Status ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct AuthStatus {
    profile: String,
    client_id: Option<String>,
    client_secret: &'static str,
    configured: bool,
    region: String,
    namespace: String,
    locale: String,
    token_url: String,
}

impl AuthStatus {
    fn new(resolved: &Resolved) -> Self {
        let journal = &resolved.journal;
        Self {
            profile: resolved.profile_name.clone(),
            client_id: resolved.client_id.clone(),
            client_secret: match resolved.secret_source {
                SecretSource::Flag => "set (flag or JOURNAL_CLIENT_SECRET)",
                SecretSource::Profile => "set (profile)",
                SecretSource::Missing => "missing",
            },
            configured: journal
                .credentials
                .as_ref()
                .is_some_and(journal_core::Credentials::is_complete),
            region: journal.region.to_string(),
            namespace: journal.region.namespace(),
            locale: journal.locale.to_string(),
            token_url: journal
                .hosts
                .token_url(journal.region)
                .map(|u| u.to_string())
                .unwrap_or_default(),
        }
    }

    fn detail(&self, painter: Painter) -> String {
        let field = |label: &str, value: &str| {
            format!("{} {value}", painter.label(&format!("{label:<14}")))
        };
        let status = if self.configured {
            "credentials present (not verified, run `journal auth check`)"
        } else {
            "not configured"
        };
        [
            field("Profile", &self.profile),
            field("Client ID", self.client_id.as_deref().unwrap_or("-")),
            field("Client secret", self.client_secret),
            field("Region", &self.region),
            field("Namespace", &self.namespace),
            field("Locale", &self.locale),
            field("Token URL", &self.token_url),
            field("Status", status),
        ]
        .join("\n")
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: AuthArgs, resolved: Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Status => {
            let status = AuthStatus::new(&resolved);
            let painter = Painter::new(global.color);
            let out = output::render_single(
                global.output,
                &status,
                |s| s.detail(painter),
                |s| s.configured.to_string(),
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }

        AuthCommand::Check => {
            let profile = resolved.profile_name.clone();
            let journal = Journal::new(resolved.require_credentials()?).await?;
            let expires_at = journal
                .verify()
                .await
                .map_err(|e| CliError::from(e).for_profile(&profile))?;
            if !global.quiet {
                eprintln!("✓ Credentials accepted for profile '{profile}'");
            }
            output::print_output(&expires_at.to_rfc3339(), global.quiet)?;
            Ok(())
        }
    }
}
