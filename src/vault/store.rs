//! Collaborator traits the search pipeline talks to.
//!
//! `AccountDirectory` enumerates subscriptions and the key vaults inside
//! them; `SecretStore` lists secret names in a vault and fetches a single
//! value.  The Azure implementations live in `crate::azure`; tests plug in
//! in-memory fakes.

use crate::errors::Result;

use super::descriptor::{Subscription, VaultDescriptor};
use super::secret::{SecretDescriptor, SecretValue};

/// Enumerates what the signed-in identity can see.
pub trait AccountDirectory {
    /// All subscriptions, deduplicated, in the order Azure returns them.
    fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    /// Every key vault in the given subscriptions, in subscription order.
    fn list_vaults(&self, subscriptions: &[Subscription]) -> Result<Vec<VaultDescriptor>>;
}

/// Data-plane access to key vaults.
///
/// `Sync` because listings for different vaults may run in parallel.
pub trait SecretStore: Sync {
    /// Names of every secret in `vault`.  Each descriptor points back at `vault`.
    fn list_secret_names(&self, vault: &VaultDescriptor) -> Result<Vec<SecretDescriptor>>;

    /// The current value of `secret`, read from the vault it was listed from.
    fn fetch_secret_value(&self, secret: &SecretDescriptor) -> Result<SecretValue>;
}

impl<T: SecretStore + ?Sized> SecretStore for &T {
    fn list_secret_names(&self, vault: &VaultDescriptor) -> Result<Vec<SecretDescriptor>> {
        (**self).list_secret_names(vault)
    }

    fn fetch_secret_value(&self, secret: &SecretDescriptor) -> Result<SecretValue> {
        (**self).fetch_secret_value(secret)
    }
}
