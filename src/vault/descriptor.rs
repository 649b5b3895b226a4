//! Subscription and key vault descriptors returned by the account directory.

/// An Azure subscription visible to the signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub display_name: String,
    pub tenant_id: String,
    /// ARM state: `Enabled`, `Warned`, `PastDue`, `Disabled` or `Deleted`.
    pub state: String,
}

impl Subscription {
    /// Disabled and deleted subscriptions can't be searched for vaults.
    /// An unknown state counts as active.
    pub fn is_active(&self) -> bool {
        !["disabled", "deleted"]
            .iter()
            .any(|inactive| self.state.eq_ignore_ascii_case(inactive))
    }
}

/// Identifies one key vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultDescriptor {
    /// The vault name (e.g. "kv-prod").
    pub name: String,

    /// Resource group the vault lives in.
    pub resource_group: String,

    /// Data-plane URI (e.g. "https://kv-prod.vault.azure.net/").
    pub uri: String,

    /// Subscription the vault was enumerated from (empty when unknown).
    pub subscription_id: String,
}

impl VaultDescriptor {
    pub fn new(
        name: impl Into<String>,
        resource_group: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_group: resource_group.into(),
            uri: uri.into(),
            subscription_id: String::new(),
        }
    }

    pub fn with_subscription(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = subscription_id.into();
        self
    }

    /// Label shown in the chooser: `name (resource group)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.resource_group)
    }

    /// The vault URI without a trailing slash, ready for path joins.
    pub fn base_uri(&self) -> &str {
        self.uri.trim_end_matches('/')
    }
}
