//! Minimal authenticated JSON-over-HTTPS client for Azure REST APIs.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::errors::{AzqError, Result};

use super::TokenCredential;

const USER_AGENT: &str = concat!("azq/", env!("CARGO_PKG_VERSION"));

/// One page of an Azure list response.
#[derive(Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "nextLink", default)]
    next_link: Option<String>,
}

/// Azure's error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Shared HTTP agent plus the credential used to authorize every call.
pub struct RestClient {
    agent: ureq::Agent,
    credential: Arc<dyn TokenCredential>,
}

impl RestClient {
    pub fn new(credential: Arc<dyn TokenCredential>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            credential,
        }
    }

    /// GET `url` with a token for `resource` and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<T> {
        let token = self.credential.token(resource)?;
        trace!(url, "GET");

        let mut response = self
            .agent
            .get(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| AzqError::Http(format!("GET {}: {e}", strip_query(url))))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response.body_mut().read_json::<T>().map_err(|e| {
            AzqError::SerializationError(format!(
                "failed to decode response from {}: {e}",
                strip_query(url)
            ))
        })
    }

    /// GET every page of a list endpoint, following `nextLink` until exhausted.
    pub fn get_paged<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            let page: Page<T> = self.get_json(&url, resource)?;
            pages += 1;
            items.extend(page.value);
            next = page.next_link.filter(|link| !link.is_empty());
        }

        debug!(url = strip_query(url), pages, items = items.len(), "listed");
        Ok(items)
    }
}

/// Map a non-success status and its body to an error.
fn status_error(status: u16, body: &str) -> AzqError {
    let message = error_message(body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.trim().to_string()
        }
    });

    match status {
        401 | 403 => AzqError::AccessDenied(message),
        _ => AzqError::Api { status, message },
    }
}

fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    match (envelope.error.code, envelope.error.message) {
        (Some(code), Some(message)) => Some(format!("{code}: {message}")),
        (None, Some(message)) => Some(message),
        (Some(code), None) => Some(code),
        (None, None) => None,
    }
}

/// Drop the query string so logs and errors don't carry api-versions or skip tokens.
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
