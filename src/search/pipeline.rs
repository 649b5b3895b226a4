//! The search pipeline: list, score, merge, resolve, fetch.
//!
//! A `SecretSearch` is used once per invocation.  `run` lists every
//! vault's secrets, keeps the names that score above the threshold,
//! merges them into one ranked list and resolves it to a single secret.
//! Only after that can `fetch_value` ask the originating vault for the
//! secret's value.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{AzqError, Result};
use crate::vault::{SecretDescriptor, SecretStore, SecretValue, VaultDescriptor};

use super::ranked::RankedCandidates;
use super::resolver::{resolve, Chooser, Resolution};

/// Title shown when several secrets match.
pub const SECRET_CHOOSER_TITLE: &str = "Select a secret";

/// What to do when listing one vault fails during a multi-vault search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingFailurePolicy {
    /// Warn, leave the vault out, and keep searching the others.
    #[default]
    Skip,
    /// Fail the whole search.
    Abort,
}

/// Tunables for one search run.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub listing_failure: ListingFailurePolicy,
    /// List vaults in parallel instead of one after another.
    pub concurrent_listing: bool,
    /// Upper bound on parallel listings.
    pub listing_threads: usize,
}

/// Default upper bound on parallel vault listings.
pub const DEFAULT_LISTING_THREADS: usize = 8;

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            listing_failure: ListingFailurePolicy::Skip,
            concurrent_listing: true,
            listing_threads: DEFAULT_LISTING_THREADS,
        }
    }
}

/// A vault left out of the search because its listing failed.
#[derive(Debug)]
pub struct SkippedVault {
    pub vault: String,
    pub error: AzqError,
}

/// One search over a set of vaults.
pub struct SecretSearch<S> {
    store: S,
    options: SearchOptions,
    selected: Option<SecretDescriptor>,
    skipped: Vec<SkippedVault>,
}

impl<S: SecretStore> SecretSearch<S> {
    pub fn new(store: S, options: SearchOptions) -> Self {
        Self {
            store,
            options,
            selected: None,
            skipped: Vec::new(),
        }
    }

    /// Search `vaults` for secrets whose names match `term` and resolve the
    /// matches to one secret, asking `chooser` only when several match.
    pub fn run<C>(
        &mut self,
        term: &str,
        vaults: &[VaultDescriptor],
        chooser: &mut C,
    ) -> Result<Resolution<SecretDescriptor>>
    where
        C: Chooser + ?Sized,
    {
        self.selected = None;

        let ranked = self.candidates(term, vaults)?;
        info!(
            term,
            vaults = vaults.len(),
            matches = ranked.len(),
            "scored secrets"
        );

        let resolution = resolve(
            SECRET_CHOOSER_TITLE,
            ranked.into_items(),
            SecretDescriptor::label,
            chooser,
        )?;

        if let Resolution::Selected(secret) = &resolution {
            debug!(secret = %secret.name, vault = %secret.vault.name, "secret selected");
            self.selected = Some(secret.clone());
        }

        Ok(resolution)
    }

    /// List, score and rank every secret in `vaults` without resolving.
    pub fn candidates(
        &mut self,
        term: &str,
        vaults: &[VaultDescriptor],
    ) -> Result<RankedCandidates<SecretDescriptor>> {
        self.skipped.clear();

        if vaults.is_empty() {
            debug!("no vaults to search");
            return Ok(RankedCandidates::from_scored(Vec::new()));
        }

        let concurrent = self.options.concurrent_listing && vaults.len() > 1;
        let listings: Vec<Result<Vec<SecretDescriptor>>> = if concurrent {
            self.list_concurrently(vaults)?
        } else {
            vaults
                .iter()
                .map(|vault| self.store.list_secret_names(vault))
                .collect()
        };

        let mut discovered = Vec::new();
        for (vault, listing) in vaults.iter().zip(listings) {
            match listing {
                Ok(secrets) => {
                    debug!(vault = %vault.name, secrets = secrets.len(), "listed vault");
                    discovered.extend(secrets);
                }
                Err(error) => match self.options.listing_failure {
                    ListingFailurePolicy::Abort => {
                        return Err(AzqError::VaultListingFailed {
                            vault: vault.name.clone(),
                            reason: error.to_string(),
                        });
                    }
                    ListingFailurePolicy::Skip => {
                        warn!(vault = %vault.name, %error, "skipping vault");
                        self.skipped.push(SkippedVault {
                            vault: vault.name.clone(),
                            error,
                        });
                    }
                },
            }
        }

        Ok(RankedCandidates::rank(term, discovered, |s| s.name.as_str()))
    }

    /// List on a bounded pool; results come back in vault order.
    fn list_concurrently(
        &self,
        vaults: &[VaultDescriptor],
    ) -> Result<Vec<Result<Vec<SecretDescriptor>>>> {
        let threads = self.options.listing_threads.clamp(1, vaults.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("azq-list-{i}"))
            .build()
            .map_err(|e| AzqError::ThreadPool(e.to_string()))?;

        debug!(threads, vaults = vaults.len(), "listing vaults in parallel");
        let store = &self.store;
        Ok(pool.install(|| {
            vaults
                .par_iter()
                .map(|vault| store.list_secret_names(vault))
                .collect()
        }))
    }

    /// The secret chosen by the last `run`, if any.
    pub fn selected(&self) -> Option<&SecretDescriptor> {
        self.selected.as_ref()
    }

    /// Vaults left out of the last search because their listing failed.
    pub fn skipped_vaults(&self) -> &[SkippedVault] {
        &self.skipped
    }

    /// Fetch the value of the selected secret from its own vault.
    ///
    /// Calling this before `run` has selected a secret is a usage error.
    pub fn fetch_value(&self) -> Result<SecretValue> {
        let secret = self.selected.as_ref().ok_or(AzqError::NoSelection)?;
        debug!(secret = %secret.name, vault = %secret.vault.name, "fetching secret value");
        self.store.fetch_secret_value(secret)
    }
}

/// Attach `vault` to every name in a listing.
pub fn describe_secrets<I>(vault: &VaultDescriptor, names: I) -> Vec<SecretDescriptor>
where
    I: IntoIterator<Item = String>,
{
    let vault = Arc::new(vault.clone());
    names
        .into_iter()
        .map(|name| SecretDescriptor::new(name, Arc::clone(&vault)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_skip_and_run_concurrently() {
        let options = SearchOptions::default();
        assert_eq!(options.listing_failure, ListingFailurePolicy::Skip);
        assert!(options.concurrent_listing);
        assert_eq!(options.listing_threads, DEFAULT_LISTING_THREADS);
    }

    #[test]
    fn describe_secrets_shares_one_vault() {
        let vault = VaultDescriptor::new("kv", "rg", "https://kv.vault.azure.net/");
        let secrets = describe_secrets(&vault, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(secrets.len(), 2);
        assert!(Arc::ptr_eq(&secrets[0].vault, &secrets[1].vault));
        assert_eq!(*secrets[0].vault, vault);
    }

    #[test]
    fn listing_failure_policy_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: ListingFailurePolicy,
        }
        let parsed: Wrapper = toml::from_str("policy = \"abort\"").unwrap();
        assert_eq!(parsed.policy, ListingFailurePolicy::Abort);
    }
}
