//! Clap derive structures for the `journal` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This
//! file is also compiled by `build.rs` for man page generation, so it must
//! only depend on `clap` and `clap_complete`.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// journal -- browse the game journal from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "journal",
    version,
    about = "Browse game journal expansions, instances and encounters",
    long_about = "Read-only client for the Battle.net game journal.\n\n\
        Authenticates with OAuth client credentials, then drills down from\n\
        expansions to instances, encounters and their ability sections,\n\
        in any of the supported locales.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Credential profile to use
    #[arg(long, short = 'p', env = "JOURNAL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// OAuth client id (overrides profile)
    #[arg(long, env = "JOURNAL_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret (overrides profile and keyring)
    #[arg(long, env = "JOURNAL_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// API region
    #[arg(long, short = 'r', env = "JOURNAL_REGION", global = true)]
    pub region: Option<RegionArg>,

    /// Display locale, e.g. ko_KR or en_US (see `journal locales`)
    #[arg(long, short = 'L', env = "JOURNAL_LOCALE", global = true)]
    pub locale: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JOURNAL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "JOURNAL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Data API base URL (replaces the regional host)
    #[arg(long, env = "JOURNAL_API_URL", global = true, hide = true)]
    pub api_url: Option<String>,

    /// OAuth token URL (replaces the regional host)
    #[arg(long, env = "JOURNAL_OAUTH_URL", global = true, hide = true)]
    pub oauth_url: Option<String>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegionArg {
    Us,
    Eu,
    Kr,
    Tw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// 5-player dungeons
    Dungeon,
    /// Raids
    Raid,
    /// World bosses, events and anything else
    Other,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List expansions
    #[command(alias = "exp", alias = "x")]
    Expansions(ExpansionsArgs),

    /// List and inspect instances (dungeons, raids)
    #[command(alias = "inst", alias = "i")]
    Instances(InstancesArgs),

    /// Inspect encounters and their abilities
    #[command(alias = "enc", alias = "e")]
    Encounters(EncountersArgs),

    /// Interactively drill down expansions → instances → encounters
    Browse,

    /// Inspect or verify API credentials
    Auth(AuthArgs),

    /// List supported locales
    Locales,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EXPANSIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ExpansionsArgs {
    #[command(subcommand)]
    pub command: ExpansionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExpansionsCommand {
    /// List every expansion
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INSTANCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InstancesArgs {
    #[command(subcommand)]
    pub command: InstancesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InstancesCommand {
    /// List the instances of one expansion
    #[command(alias = "ls")]
    List {
        /// Expansion id (see `journal expansions list`)
        #[arg(long, short = 'e')]
        expansion: u64,

        /// Only show one group
        #[arg(long, short = 'k')]
        kind: Option<KindArg>,
    },

    /// Show one instance with its encounters
    Show {
        /// Instance id
        id: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENCOUNTERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EncountersArgs {
    #[command(subcommand)]
    pub command: EncountersCommand,
}

#[derive(Debug, Subcommand)]
pub enum EncountersCommand {
    /// Show an encounter and its section tree
    Show {
        /// Encounter id
        id: u64,

        /// Only list sections that describe a spell
        #[arg(long, short = 'a')]
        abilities_only: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Show which credentials would be used (no network)
    Status,

    /// Exchange the credentials for a token to prove they work
    Check,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: client_id, client_secret_env, region, locale, ca_cert, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a client secret in the system keyring
    SetSecret {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
