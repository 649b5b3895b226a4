//! Secret store backed by the Key Vault data plane.

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::{AzqError, Result};
use crate::search::pipeline::describe_secrets;
use crate::vault::{SecretDescriptor, SecretStore, SecretValue, VaultDescriptor};

use super::rest::RestClient;

const SECRETS_API_VERSION: &str = "7.4";

/// Token audience for every Key Vault in the public cloud.
const VAULT_RESOURCE: &str = "https://vault.azure.net";

#[derive(Deserialize)]
struct SecretItem {
    id: String,
}

#[derive(Deserialize)]
struct SecretBundle {
    #[serde(default)]
    value: Option<String>,
}

/// Lists and reads secrets over HTTPS.
pub struct KeyVaultStore {
    rest: Arc<RestClient>,
}

impl KeyVaultStore {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }
}

impl SecretStore for KeyVaultStore {
    fn list_secret_names(&self, vault: &VaultDescriptor) -> Result<Vec<SecretDescriptor>> {
        let url = format!(
            "{}/secrets?api-version={SECRETS_API_VERSION}",
            vault.base_uri()
        );
        let items: Vec<SecretItem> = self.rest.get_paged(&url, VAULT_RESOURCE)?;
        let names = items
            .iter()
            .filter_map(|item| secret_name_from_id(&item.id))
            .map(str::to_string);
        Ok(describe_secrets(vault, names))
    }

    fn fetch_secret_value(&self, secret: &SecretDescriptor) -> Result<SecretValue> {
        let url = format!(
            "{}/secrets/{}?api-version={SECRETS_API_VERSION}",
            secret.vault.base_uri(),
            secret.name
        );
        let bundle: SecretBundle = self
            .rest
            .get_json(&url, VAULT_RESOURCE)
            .map_err(|e| match e {
                AzqError::Api { status: 404, .. } => AzqError::SecretNotFound(secret.name.clone()),
                other => other,
            })?;

        bundle.value.map(SecretValue::new).ok_or_else(|| {
            AzqError::SerializationError(format!("secret '{}' came back without a value", secret.name))
        })
    }
}

/// `https://kv.vault.azure.net/secrets/<name>[/<version>]` → `<name>`.
fn secret_name_from_id(id: &str) -> Option<&str> {
    let (_, rest) = id.split_once("/secrets/")?;
    rest.split('/').next().filter(|name| !name.is_empty())
}
