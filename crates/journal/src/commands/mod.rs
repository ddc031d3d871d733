//! Command dispatch: bridges CLI args -> journal-core -> output formatting.

pub mod auth;
pub mod browse;
pub mod config_cmd;
pub mod encounters;
pub mod expansions;
pub mod instances;
pub mod locales;
pub mod util;

use journal_core::Journal;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a data command to the appropriate handler.
pub async fn dispatch(cmd: Command, journal: &Journal, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Expansions(args) => expansions::handle(journal, args, global).await,
        Command::Instances(args) => instances::handle(journal, args, global).await,
        Command::Encounters(args) => encounters::handle(journal, args, global).await,
        // Handled in main before a Journal is built
        Command::Browse
        | Command::Auth(_)
        | Command::Locales
        | Command::Config(_)
        | Command::Completions(_) => Err(CliError::Internal(
            "command does not take a prepared journal".into(),
        )),
    }
}
