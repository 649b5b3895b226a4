//! Vault module — what the search pipeline knows about vaults and secrets.
//!
//! This module provides:
//! - `Subscription` and `VaultDescriptor` (`descriptor`)
//! - `SecretDescriptor` and `SecretValue` (`secret`)
//! - The `AccountDirectory` and `SecretStore` collaborator traits (`store`)

pub mod descriptor;
pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use descriptor::{Subscription, VaultDescriptor};
pub use secret::{SecretDescriptor, SecretValue};
pub use store::{AccountDirectory, SecretStore};
