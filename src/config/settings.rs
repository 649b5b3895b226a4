use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{AzqError, Result};
use crate::search::pipeline::DEFAULT_LISTING_THREADS;
use crate::search::{ListingFailurePolicy, SearchOptions};

/// User-level configuration, loaded from `~/.config/azq/config.toml`.
///
/// Every field has a sensible default so azq works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// How many entries a selection list shows at once.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// `skip` to warn and continue when one vault can't be listed, `abort` to fail.
    #[serde(default)]
    pub listing_failure: ListingFailurePolicy,

    /// List vaults in parallel.
    #[serde(default = "default_concurrent_listing")]
    pub concurrent_listing: bool,

    /// At most this many vaults are listed at the same time.
    #[serde(default = "default_listing_threads")]
    pub listing_threads: usize,

    /// Timeout for each Azure REST call, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Azure Resource Manager endpoint (override for sovereign clouds).
    #[serde(default = "default_management_endpoint")]
    pub management_endpoint: String,

    /// Name or path of the Azure CLI executable.
    #[serde(default = "default_az_command")]
    pub az_command: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_page_size() -> usize {
    20
}

fn default_concurrent_listing() -> bool {
    true
}

fn default_listing_threads() -> usize {
    DEFAULT_LISTING_THREADS
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_management_endpoint() -> String {
    "https://management.azure.com".to_string()
}

fn default_az_command() -> String {
    if cfg!(windows) {
        "az.cmd".to_string()
    } else {
        "az".to_string()
    }
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            listing_failure: ListingFailurePolicy::default(),
            concurrent_listing: default_concurrent_listing(),
            listing_threads: default_listing_threads(),
            http_timeout_secs: default_http_timeout_secs(),
            management_endpoint: default_management_endpoint(),
            az_command: default_az_command(),
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            AzqError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        if settings.page_size == 0 {
            return Err(AzqError::ConfigError(format!(
                "{}: page_size must be at least 1",
                path.display()
            )));
        }
        if settings.listing_threads == 0 {
            return Err(AzqError::ConfigError(format!(
                "{}: listing_threads must be at least 1",
                path.display()
            )));
        }

        Ok(settings)
    }

    /// Load from `--config` if given, otherwise from the default location.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// `$HOME/.config/azq/config.toml`, or `None` if no home directory is set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("azq")
                .join("config.toml"),
        )
    }

    /// Pipeline options derived from these settings.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            listing_failure: self.listing_failure,
            concurrent_listing: self.concurrent_listing,
            listing_threads: self.listing_threads,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
