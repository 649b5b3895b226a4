//! Account directory backed by Azure Resource Manager.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::vault::{AccountDirectory, Subscription, VaultDescriptor};

use super::rest::RestClient;

const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";
const VAULTS_API_VERSION: &str = "2023-07-01";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionEntry {
    subscription_id: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    tenant_id: String,
    #[serde(default)]
    state: String,
}

#[derive(Deserialize)]
struct VaultEntry {
    id: String,
    name: String,
    #[serde(default)]
    properties: Option<VaultProperties>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaultProperties {
    #[serde(default)]
    vault_uri: Option<String>,
}

/// Lists subscriptions and key vaults through the management plane.
pub struct ArmDirectory {
    rest: Arc<RestClient>,
    endpoint: String,
}

impl ArmDirectory {
    pub fn new(rest: Arc<RestClient>, endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            rest,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Token audience for the management plane.
    fn resource(&self) -> String {
        format!("{}/", self.endpoint)
    }
}

impl AccountDirectory for ArmDirectory {
    fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let url = format!(
            "{}/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}",
            self.endpoint
        );
        let entries: Vec<SubscriptionEntry> = self.rest.get_paged(&url, &self.resource())?;
        let subscriptions = dedupe_subscriptions(entries);
        debug!(count = subscriptions.len(), "listed subscriptions");
        Ok(subscriptions)
    }

    fn list_vaults(&self, subscriptions: &[Subscription]) -> Result<Vec<VaultDescriptor>> {
        let mut vaults = Vec::new();
        for subscription in active_subscriptions(subscriptions) {
            let url = format!(
                "{}/subscriptions/{}/providers/Microsoft.KeyVault/vaults?api-version={VAULTS_API_VERSION}",
                self.endpoint, subscription.id
            );
            let entries: Vec<VaultEntry> = self.rest.get_paged(&url, &self.resource())?;
            debug!(
                subscription = %subscription.display_name,
                count = entries.len(),
                "listed key vaults"
            );
            vaults.extend(
                entries
                    .into_iter()
                    .filter_map(|entry| vault_descriptor(entry, &subscription.id)),
            );
        }
        Ok(vaults)
    }
}

/// Subscriptions worth asking for vaults, in their original order.
fn active_subscriptions(
    subscriptions: &[Subscription],
) -> impl Iterator<Item = &Subscription> {
    subscriptions.iter().filter(|s| {
        let active = s.is_active();
        if !active {
            debug!(subscription = %s.display_name, state = %s.state, "skipping inactive subscription");
        }
        active
    })
}

/// Keep the first occurrence of each subscription id, preserving order.
fn dedupe_subscriptions(entries: Vec<SubscriptionEntry>) -> Vec<Subscription> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.subscription_id.clone()))
        .map(|entry| Subscription {
            id: entry.subscription_id,
            display_name: entry.display_name,
            tenant_id: entry.tenant_id,
            state: entry.state,
        })
        .collect()
}

fn vault_descriptor(entry: VaultEntry, subscription_id: &str) -> Option<VaultDescriptor> {
    let Some(uri) = entry.properties.and_then(|p| p.vault_uri) else {
        warn!(vault = %entry.name, "key vault has no vaultUri, ignoring");
        return None;
    };
    let resource_group = resource_group_from_id(&entry.id).unwrap_or_default();
    Some(VaultDescriptor::new(entry.name, resource_group, uri).with_subscription(subscription_id))
}

/// Pull the resource group name out of an ARM resource id.
pub fn resource_group_from_id(id: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| Regex::new(r"(?i)/resourceGroups/([^/]+)").expect("valid regex literal"));
    re.captures(id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
