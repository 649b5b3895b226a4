use thiserror::Error;

/// All errors that can occur in azq.
#[derive(Debug, Error)]
pub enum AzqError {
    // --- Azure errors ---
    #[error("Azure credential error: {0}")]
    Credential(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Azure API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("Listing secrets in key vault '{vault}' failed: {reason}")]
    VaultListingFailed { vault: String, reason: String },

    #[error("No subscriptions found — run `az login` first")]
    NoSubscriptions,

    #[error("No key vaults found")]
    NoVaults,

    // --- Selection errors ---
    #[error("Chooser returned option {index} but only {count} were offered")]
    InvalidChoice { index: usize, count: usize },

    #[error("No secret has been selected yet — run the search before fetching a value")]
    NoSelection,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Could not start listing threads: {0}")]
    ThreadPool(String),
}

impl AzqError {
    /// True for failures that came back from Azure (HTTP, API status, auth),
    /// as opposed to local misuse or configuration problems.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Credential(_)
                | Self::Http(_)
                | Self::Api { .. }
                | Self::AccessDenied(_)
                | Self::SecretNotFound(_)
                | Self::VaultListingFailed { .. }
        )
    }
}

/// Convenience type alias for azq results.
pub type Result<T> = std::result::Result<T, AzqError>;
