// src/resource/probe.rs
// =============================================================================
// This module talks to the network.
//
// Two kinds of request are made:
// - a GET for the page being estimated (we need its full body to scan it)
// - a HEAD per embedded resource (we only need its headers)
//
// A probe never fails. Connection errors, timeouts, non-2xx answers, too many
// redirects and missing Content-Length headers all produce a result with an
// unknown size, and the estimate simply leaves that resource out.
//
// Rust concepts:
// - Traits: `ResourceClient` is what the estimator depends on, so tests can
//   hand it a scripted client instead of a real one
// - impl Future in traits: async methods without boxing
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

// Desktop browser user agent. Some sites refuse requests that do not look
// like they come from a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

pub const DEFAULT_MAX_REDIRECTS: usize = 3;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Settings for the HTTP client shared by every request of a run.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-request timeout (connect + headers + body)
    pub timeout: Duration,
    /// Redirects followed before a request is abandoned
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// What a HEAD request told us about one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Declared body size, or None when it could not be determined
    pub size_bytes: Option<u64>,
    /// Raw `Content-Type` value; empty when not requested or not sent
    pub content_type: String,
}

impl ProbeResult {
    pub fn sized(size_bytes: u64, content_type: impl Into<String>) -> Self {
        Self {
            size_bytes: Some(size_bytes),
            content_type: content_type.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

// Everything the estimator needs from the network.
pub trait ResourceClient {
    // Downloads a page in full. Errors mean the page is unreachable.
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>>;

    // Sizes a resource without downloading its body.
    //
    // `want_content_type` is false when no category filter is active; the
    // content type is then left empty.
    fn probe(&self, url: &str, want_content_type: bool) -> impl Future<Output = ProbeResult>;
}

// The real client, backed by reqwest.
//
// reqwest::Client pools connections internally, so one instance is shared
// by the whole run.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect_policy(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

// Follows at most `max_redirects` hops.
//
// `Policy::limited(n)` counts the original URL in `previous()`, so it would
// stop one hop early.
fn redirect_policy(max_redirects: usize) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

impl ResourceClient for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    async fn probe(&self, url: &str, want_content_type: bool) -> ProbeResult {
        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url, error = %e, "probe failed");
                return ProbeResult::unknown();
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "probe returned non-success status");
            return ProbeResult::unknown();
        }

        let headers = response.headers();

        // Read the header rather than `Response::content_length()`: for HEAD
        // responses the latter reports the (empty) body, not the declared size.
        let size_bytes = declared_length(headers);
        if size_bytes.is_none() {
            debug!(url, "probe response has no usable Content-Length");
        }

        let content_type = if want_content_type {
            header_text(headers, CONTENT_TYPE)
        } else {
            String::new()
        };

        ProbeResult {
            size_bytes,
            content_type,
        }
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn header_text(headers: &HeaderMap, name: reqwest::header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}
