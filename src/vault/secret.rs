//! Secret descriptor and value types.
//!
//! A `SecretDescriptor` names one secret and remembers which vault it came
//! from, so that after results from many vaults are merged the value can
//! still be requested from the right place.  `SecretValue` only exists after
//! a secret has been explicitly selected.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::descriptor::VaultDescriptor;

/// One secret inside a vault, without its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDescriptor {
    /// The secret name (e.g. "db-password").
    pub name: String,

    /// The vault this secret was listed from.
    pub vault: Arc<VaultDescriptor>,
}

impl SecretDescriptor {
    pub fn new(name: impl Into<String>, vault: Arc<VaultDescriptor>) -> Self {
        Self {
            name: name.into(),
            vault,
        }
    }

    /// Label shown in the chooser: `name (vault)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.vault.name)
    }
}

/// The plaintext value of a selected secret.
///
/// Wiped from memory on drop.  `Debug` never prints the value.
pub struct SecretValue(Zeroizing<String>);

impl SecretValue {
    pub fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}
