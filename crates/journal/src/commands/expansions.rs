//! Expansion command handlers.

use tabled::Tabled;

use journal_core::{Expansion, Journal, Locale};

use crate::cli::{ExpansionsArgs, ExpansionsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ExpansionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

impl ExpansionRow {
    fn new(e: &Expansion, locale: Locale) -> Self {
        Self {
            id: e.id,
            name: util::text(&e.name, locale),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    journal: &Journal,
    args: ExpansionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ExpansionsCommand::List => {
            let expansions = journal.expansions().await?;
            let locale = journal.locale();
            let out = output::render_list(
                global.output,
                &expansions,
                |e| ExpansionRow::new(e, locale),
                |e| e.id.to_string(),
            )?;
            output::print_output(&out, global.quiet)?;
            Ok(())
        }
    }
}
