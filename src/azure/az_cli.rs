//! Azure CLI integration: access tokens and the active subscription.
//!
//! azq never handles credentials itself.  Tokens come from
//! `az account get-access-token` using whatever identity `az login` set up,
//! and `subscription set` goes through `az account set`.

use std::collections::HashMap;
use std::io;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::errors::{AzqError, Result};

use super::TokenCredential;

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN_MINUTES: i64 = 5;

/// Lifetime assumed when `az` doesn't report one.
const FALLBACK_LIFETIME_MINUTES: i64 = 10;

/// A bearer token and the moment it stops being valid.
struct AccessToken {
    token: Zeroizing<String>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::minutes(EXPIRY_MARGIN_MINUTES)
    }
}

/// The subset of `az account get-access-token --output json` we read.
#[derive(Deserialize)]
struct AzTokenOutput {
    #[serde(rename = "accessToken")]
    access_token: String,
    /// Epoch seconds; only present on newer CLI versions.
    #[serde(default)]
    expires_on: Option<i64>,
}

/// One cached token per resource.  Its lock is held while `az` refreshes
/// it, so concurrent callers for the same resource wait for one refresh.
type TokenSlot = Arc<Mutex<Option<AccessToken>>>;

/// Credential backed by the signed-in Azure CLI.
pub struct AzCliCredential {
    az_command: String,
    cache: Mutex<HashMap<String, TokenSlot>>,
}

impl AzCliCredential {
    pub fn new(az_command: impl Into<String>) -> Self {
        Self {
            az_command: az_command.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn request_token(&self, resource: &str) -> Result<AccessToken> {
        debug!(resource, "requesting access token from az");
        let output = run_az(
            &self.az_command,
            &[
                "account",
                "get-access-token",
                "--resource",
                resource,
                "--output",
                "json",
            ],
        )
        .map_err(|e| AzqError::Credential(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AzqError::Credential(format!(
                "`{} account get-access-token` failed: {} (run `az login`?)",
                self.az_command,
                stderr.trim()
            )));
        }

        let stdout = Zeroizing::new(String::from_utf8_lossy(&output.stdout).into_owned());
        parse_token_output(&stdout, Utc::now())
    }
}

impl TokenCredential for AzCliCredential {
    fn token(&self, resource: &str) -> Result<String> {
        let slot = Arc::clone(
            self.cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(resource.to_string())
                .or_default(),
        );

        let mut cached = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.token.as_str().to_owned());
        }

        let fresh = self.request_token(resource)?;
        let token = fresh.token.as_str().to_owned();
        *cached = Some(fresh);
        Ok(token)
    }
}

fn parse_token_output(stdout: &str, now: DateTime<Utc>) -> Result<AccessToken> {
    let parsed: AzTokenOutput = serde_json::from_str(stdout)
        .map_err(|e| AzqError::Credential(format!("unexpected az token output: {e}")))?;

    if parsed.access_token.is_empty() {
        return Err(AzqError::Credential("az returned an empty access token".into()));
    }

    let expires_at = parsed
        .expires_on
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(|| now + Duration::minutes(FALLBACK_LIFETIME_MINUTES));

    Ok(AccessToken {
        token: Zeroizing::new(parsed.access_token),
        expires_at,
    })
}

/// Make `subscription_id` the active subscription of the Azure CLI.
pub fn set_active_subscription(az_command: &str, subscription_id: &str) -> Result<()> {
    if subscription_id.trim().is_empty() {
        return Err(AzqError::CommandFailed(
            "subscription has no id — nothing to switch to".into(),
        ));
    }

    let output = run_az(az_command, &["account", "set", "--subscription", subscription_id])
        .map_err(|e| AzqError::CommandFailed(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AzqError::CommandFailed(format!(
            "error setting the subscription: {}",
            stderr.trim()
        )));
    }

    debug!(subscription_id, "active subscription changed");
    Ok(())
}

fn run_az(az_command: &str, args: &[&str]) -> io::Result<Output> {
    Command::new(az_command).args(args).output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            io::Error::new(
                e.kind(),
                format!("Azure CLI '{az_command}' not found — install it and run `az login`"),
            )
        } else {
            io::Error::new(e.kind(), format!("failed to run '{az_command}': {e}"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_with_epoch_expiry() {
        let now = Utc::now();
        let json = r#"{
            "accessToken": "eyJ0eXAi",
            "expiresOn": "2030-01-01 00:00:00.000000",
            "expires_on": 1893456000,
            "subscription": "0000",
            "tenant": "1111",
            "tokenType": "Bearer"
        }"#;
        let token = parse_token_output(json, now).unwrap();
        assert_eq!(token.token.as_str(), "eyJ0eXAi");
        assert_eq!(token.expires_at.timestamp(), 1_893_456_000);
    }

    #[test]
    fn missing_expiry_falls_back_to_short_lifetime() {
        let now = Utc::now();
        let token = parse_token_output(r#"{"accessToken": "abc"}"#, now).unwrap();
        assert_eq!(
            token.expires_at,
            now + Duration::minutes(FALLBACK_LIFETIME_MINUTES)
        );
        assert!(token.is_fresh(now));
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = parse_token_output(r#"{"accessToken": ""}"#, Utc::now());
        assert!(matches!(err, Err(AzqError::Credential(_))));
    }

    #[test]
    fn garbage_output_is_a_credential_error() {
        let err = parse_token_output("ERROR: please run az login", Utc::now());
        assert!(matches!(err, Err(AzqError::Credential(_))));
    }

    #[test]
    fn token_near_expiry_is_stale() {
        let now = Utc::now();
        let token = AccessToken {
            token: Zeroizing::new("t".into()),
            expires_at: now + Duration::minutes(2),
        };
        assert!(!token.is_fresh(now));
    }

    #[test]
    fn missing_az_binary_is_a_credential_error() {
        let credential = AzCliCredential::new("azq-test-no-such-az-binary");
        let err = credential.token("https://vault.azure.net").unwrap_err();
        assert!(matches!(err, AzqError::Credential(_)));
        assert!(err.to_string().contains("not found"));
    }

    /// A stand-in `az` that logs each invocation and answers slowly.
    #[cfg(unix)]
    fn slow_fake_az(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let log = dir.join("calls.log");
        let script = dir.join("az");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\nsleep 0.3\n\
                 echo '{{\"accessToken\":\"fake-token\",\"expires_on\":4102444800}}'\n",
                log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        (script, log)
    }

    #[cfg(unix)]
    #[test]
    fn concurrent_callers_share_one_az_invocation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (script, log) = slow_fake_az(tmp.path());
        let credential = AzCliCredential::new(script.to_string_lossy());

        let tokens: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| credential.token("https://vault.azure.net").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(tokens.iter().all(|t| t == "fake-token"));
        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls.lines().count(), 1);

        // A fresh cached token is reused, a new audience is fetched once.
        credential.token("https://vault.azure.net").unwrap();
        credential.token("https://management.azure.com/").unwrap();
        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls.lines().count(), 2);
    }

    #[test]
    fn blank_subscription_id_is_rejected() {
        assert!(set_active_subscription("az", "  ").is_err());
    }
}
