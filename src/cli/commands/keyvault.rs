//! `azq keyvault` — fuzzy-search secrets across key vaults and fetch one.

use tracing::debug;

use crate::azure::AzureClients;
use crate::cli::output;
use crate::cli::prompt::{self, TerminalChooser};
use crate::cli::{load_settings, Cli, CopyMode};
use crate::errors::{AzqError, Result};
use crate::search::{resolve, Chooser, Resolution, SecretSearch};
use crate::vault::{AccountDirectory, VaultDescriptor};

/// Which vaults a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultScope {
    All,
    Named(String),
    Pick,
}

impl VaultScope {
    pub fn from_flags(vault: Option<&str>, pick_vault: bool) -> Self {
        match (vault, pick_vault) {
            (Some(name), _) => Self::Named(name.to_string()),
            (None, true) => Self::Pick,
            (None, false) => Self::All,
        }
    }
}

/// Execute the `keyvault` command.
pub fn execute(
    cli: &Cli,
    term: Option<&str>,
    scope: VaultScope,
    copy_mode: CopyMode,
) -> Result<()> {
    let settings = load_settings(cli)?;
    let azure = AzureClients::from_settings(&settings);
    let mut chooser = TerminalChooser::new(settings.page_size);

    output::info("Fetching key vaults from Azure...");
    let vaults = enumerate_vaults(&azure.directory)?;

    let vaults = match narrow_vaults(vaults, &scope, &mut chooser)? {
        Resolution::Selected(vaults) => vaults,
        Resolution::NotFound => {
            output::info("No matching key vaults found");
            return Ok(());
        }
        Resolution::Declined => {
            output::info("No key vault selected");
            return Ok(());
        }
    };

    if let [only] = vaults.as_slice() {
        output::labeled("Key vault", &only.name);
    } else {
        output::info(&format!("Searching {} key vaults", vaults.len()));
    }

    let term = match term {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => prompt::ask_search_term()?,
    };

    let mut search = SecretSearch::new(&azure.store, settings.search_options());
    let resolution = search.run(&term, &vaults, &mut chooser)?;

    for skipped in search.skipped_vaults() {
        output::warning(&format!(
            "Skipped key vault '{}': {}",
            skipped.vault, skipped.error
        ));
    }

    let secret = match resolution {
        Resolution::Selected(secret) => secret,
        Resolution::NotFound => {
            output::info("No matching secrets found");
            return Ok(());
        }
        Resolution::Declined => {
            output::info("No secret selected");
            return Ok(());
        }
    };

    output::labeled("Selected secret", &secret.label());

    let value = search.fetch_value()?;
    println!("{}", value.expose());

    let copy = match copy_mode {
        CopyMode::Always => true,
        CopyMode::Never => false,
        CopyMode::Ask => prompt::confirm("Copy secret value to clipboard?")?,
    };
    if copy {
        copy_to_clipboard(value.expose())?;
        output::success("Secret value copied to clipboard");
    }

    Ok(())
}

/// Every vault in every subscription; no subscriptions or no vaults is an error.
pub fn enumerate_vaults<D: AccountDirectory + ?Sized>(directory: &D) -> Result<Vec<VaultDescriptor>> {
    let subscriptions = directory.list_subscriptions()?;
    if subscriptions.is_empty() {
        return Err(AzqError::NoSubscriptions);
    }

    let vaults = directory.list_vaults(&subscriptions)?;
    debug!(
        subscriptions = subscriptions.len(),
        vaults = vaults.len(),
        "enumerated key vaults"
    );
    if vaults.is_empty() {
        return Err(AzqError::NoVaults);
    }
    Ok(vaults)
}

/// Apply `--vault` / `--pick-vault` to the enumerated vaults.
pub fn narrow_vaults<C: Chooser + ?Sized>(
    vaults: Vec<VaultDescriptor>,
    scope: &VaultScope,
    chooser: &mut C,
) -> Result<Resolution<Vec<VaultDescriptor>>> {
    match scope {
        VaultScope::All => Ok(Resolution::Selected(vaults)),
        VaultScope::Named(name) => {
            let matching: Vec<_> = vaults
                .into_iter()
                .filter(|v| v.name.eq_ignore_ascii_case(name))
                .collect();
            if matching.is_empty() {
                Ok(Resolution::NotFound)
            } else {
                Ok(Resolution::Selected(matching))
            }
        }
        VaultScope::Pick => Ok(resolve(
            "Select a key vault",
            vaults,
            VaultDescriptor::label,
            chooser,
        )?
        .map(|vault| vec![vault])),
    }
}

fn copy_to_clipboard(value: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| AzqError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(value.to_string())
        .map_err(|e| AzqError::Clipboard(e.to_string()))
}
