//! CLI module — Clap argument parser, output helpers, prompts, and command implementations.

pub mod commands;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::config::Settings;
use crate::errors::Result;

/// azq CLI: fuzzy-find secrets across Azure Key Vaults.
#[derive(Parser)]
#[command(
    name = "azq",
    about = "Fuzzy-find secrets across every Azure Key Vault you can access",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/azq/config.toml)
    #[arg(long, global = true, env = "AZQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Search key vaults for a secret by approximate name and fetch its value
    #[command(visible_alias = "kv")]
    Keyvault {
        /// Part of the secret name (omit for interactive prompt)
        term: Option<String>,

        /// Only search key vaults with this exact name
        #[arg(long)]
        vault: Option<String>,

        /// Choose one key vault before searching instead of searching all
        #[arg(long, conflicts_with = "vault")]
        pick_vault: bool,

        /// Copy the value to the clipboard without asking
        #[arg(long, conflicts_with = "no_copy")]
        copy: bool,

        /// Never offer to copy the value to the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Manage Azure subscriptions
    #[command(visible_alias = "sub")]
    Subscription {
        #[command(subcommand)]
        action: SubscriptionAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Subscription subcommands.
#[derive(clap::Subcommand)]
pub enum SubscriptionAction {
    /// List subscriptions
    List,

    /// Set the Azure CLI's current subscription
    Set {
        /// Part of the subscription name to narrow the choice
        term: Option<String>,
    },
}

/// How the clipboard offer at the end of a search is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Ask,
    Always,
    Never,
}

impl CopyMode {
    pub fn from_flags(copy: bool, no_copy: bool) -> Self {
        match (copy, no_copy) {
            (true, _) => Self::Always,
            (false, true) => Self::Never,
            (false, false) => Self::Ask,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config` / `AZQ_CONFIG`, or the default location.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load_from(cli.config.as_deref())
}
