//! HTTP utilities for Okta REST API calls

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK};
use reqwest::Client;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Start of the error raised for non-2xx responses, followed by the status
const FAILED_PREFIX: &str = "API request failed:";

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// One page of a listing
#[derive(Debug)]
pub struct Page {
    pub body: Value,
    /// Absolute URL of the next page, from the `Link` header
    pub next: Option<String>,
}

/// HTTP client wrapper for Okta API calls
#[derive(Clone)]
pub struct OktaHttpClient {
    client: Client,
    authorization: String,
}

impl std::fmt::Debug for OktaHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OktaHttpClient").finish_non_exhaustive()
    }
}

impl OktaHttpClient {
    /// Create a new HTTP client authenticating with an API token
    pub fn new(api_token: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("okta-discover/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            authorization: format!("SSWS {}", api_token),
        })
    }

    /// Make a GET request and return the parsed body plus the next page link
    pub async fn get(&self, url: &str) -> Result<Page> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.authorization)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let next = next_link(response.headers());
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("{} {}", FAILED_PREFIX, status));
        }

        if body.is_empty() {
            return Ok(Page {
                body: Value::Null,
                next,
            });
        }

        let body = serde_json::from_str(&body).context("Failed to parse response JSON")?;
        Ok(Page { body, next })
    }
}

/// Find the `rel="next"` target among all `Link` headers
fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(parse_next_link)
}

/// Parse a `Link` header value like `<https://x/api?after=1>; rel="next"`
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| {
            let p = p.trim();
            p == "rel=\"next\"" || p == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Format an Okta API error for display, with a hint for common statuses
pub fn format_okta_error(error: &anyhow::Error) -> String {
    let error_str = format!("{:#}", error);

    let failed_with = |status: &str| error_str.contains(&format!("{} {}", FAILED_PREFIX, status));

    let hint = if failed_with("401") {
        Some("Authentication failed. Check OKTA_API_TOKEN.")
    } else if failed_with("403") {
        Some("Permission denied. The API token lacks the required admin scope.")
    } else if failed_with("404") {
        Some("Resource not found. The feature may not be enabled for this org.")
    } else if failed_with("429") {
        Some("Rate limit exceeded. Please try again later.")
    } else {
        None
    };

    match hint {
        Some(hint) => format!("{}\n{}", error_str, hint),
        None => error_str,
    }
}
