mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use journal_core::Journal;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Local commands: no credentials, no network
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "journal", &mut std::io::stdout());
            Ok(())
        }

        Command::Locales => commands::locales::handle(&global),

        cmd => {
            let cfg = config::load_config()?;
            let resolved = config::resolve(&global, &cfg)?;

            match cmd {
                Command::Auth(args) => commands::auth::handle(args, resolved, &global).await,
                Command::Browse => commands::browse::handle(resolved, &global).await,
                cmd => {
                    let profile = resolved.profile_name.clone();
                    let journal = Journal::new(resolved.require_credentials()?).await?;

                    tracing::debug!(command = ?cmd, profile = %profile, "dispatching command");
                    commands::dispatch(cmd, &journal, &global)
                        .await
                        .map_err(|e| e.for_profile(&profile))
                }
            }
        }
    }
}
