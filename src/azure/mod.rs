//! Azure collaborators — credentials, Resource Manager, and Key Vault.
//!
//! This module provides:
//! - `TokenCredential` and the Azure CLI-backed `AzCliCredential` (`az_cli`)
//! - A small authenticated REST client (`rest`)
//! - `ArmDirectory`, the subscription/vault enumerator (`arm`)
//! - `KeyVaultStore`, the secret lister/reader (`keyvault`)

pub mod arm;
pub mod az_cli;
pub mod keyvault;
pub mod rest;

use std::sync::Arc;

use crate::config::Settings;
use crate::errors::Result;

// Re-export the most commonly used items.
pub use arm::ArmDirectory;
pub use az_cli::{set_active_subscription, AzCliCredential};
pub use keyvault::KeyVaultStore;
pub use rest::RestClient;

/// Supplies bearer tokens for an Azure resource audience.
pub trait TokenCredential: Send + Sync {
    fn token(&self, resource: &str) -> Result<String>;
}

/// Everything a command needs to talk to Azure, wired from settings.
pub struct AzureClients {
    pub directory: ArmDirectory,
    pub store: KeyVaultStore,
}

impl AzureClients {
    pub fn from_settings(settings: &Settings) -> Self {
        let credential: Arc<dyn TokenCredential> =
            Arc::new(AzCliCredential::new(settings.az_command.clone()));
        let rest = Arc::new(RestClient::new(credential, settings.http_timeout()));
        Self {
            directory: ArmDirectory::new(Arc::clone(&rest), settings.management_endpoint.clone()),
            store: KeyVaultStore::new(rest),
        }
    }
}
