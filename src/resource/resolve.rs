// src/resource/resolve.rs
// =============================================================================
// This module turns raw references into absolute URLs we can probe.
//
// Resolution is intentionally simple:
// - anything starting with "http://" or "https://" is already absolute
// - everything else is taken relative to the page ROOT: leading slashes are
//   dropped and the rest is appended to "scheme://host/"
//
// There is no "../" handling, no protocol-relative ("//cdn/x.js") handling
// and no query/fragment-relative handling. Those come out as odd paths on
// the page host and usually fail to probe.
//
// Validation encodes the path segment by segment (so "my photo.png" is fine)
// and then requires the result to parse as a URL with a non-empty host.
// =============================================================================

use anyhow::{anyhow, Result};
use url::form_urlencoded::byte_serialize;
use url::Url;

// Scheme and authority of the page being estimated.
//
// `host` keeps an explicit port when the page URL had one
// (e.g. "localhost:8080"), so relative resources hit the same server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub scheme: String,
    pub host: String,
}

impl PageContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    // Builds the context from the target URL of the run.
    //
    // Fails when the URL does not parse or has no host
    // (e.g. "example.com" without a scheme, or "mailto:x@y").
    pub fn from_url(target_url: &str) -> Result<Self> {
        let url = Url::parse(target_url)
            .map_err(|e| anyhow!("Invalid URL '{}': {}", target_url, e))?;

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| anyhow!("URL has no host: {}", target_url))?;

        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self::new(url.scheme(), host))
    }
}

// A reference that resolved to a syntactically valid absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub absolute_url: String,
}

// Resolves a raw reference against the page context.
//
// Returns: Some(resource) when the result is a valid URL, None otherwise.
// A None is not an error: the caller simply skips the reference.
//
// Examples (context https://example.com):
//   "https://cdn.net/a.js" -> "https://cdn.net/a.js" (unchanged)
//   "/img/logo.png"        -> "https://example.com/img/logo.png"
//   "img/logo.png"         -> "https://example.com/img/logo.png"
pub fn resolve(reference: &str, context: &PageContext) -> Option<ResolvedResource> {
    let candidate = if is_absolute(reference) {
        reference.to_string()
    } else {
        format!(
            "{}://{}/{}",
            context.scheme,
            context.host,
            reference.trim_start_matches('/')
        )
    };

    if is_valid_url(&candidate) {
        Some(ResolvedResource {
            absolute_url: candidate,
        })
    } else {
        None
    }
}

// Literal, case-sensitive prefix check.
fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

// Checks that a URL is well formed once its path is encoded.
fn is_valid_url(candidate: &str) -> bool {
    let encoded = encode_path_segments(candidate);

    match Url::parse(&encoded) {
        Ok(url) => url.host_str().map_or(false, |host| !host.is_empty()),
        Err(_) => false,
    }
}

// Form-encodes every "/"-separated segment of the path component.
//
// The scheme, authority, query and fragment are left untouched.
fn encode_path_segments(url: &str) -> String {
    let authority_start = match url.find("://") {
        Some(index) => index + 3,
        None => return url.to_string(),
    };

    let path_start = url[authority_start..]
        .find(&['/', '?', '#'][..])
        .map_or(url.len(), |offset| authority_start + offset);

    let path_end = url[path_start..]
        .find(&['?', '#'][..])
        .map_or(url.len(), |offset| path_start + offset);

    let encoded_path = url[path_start..path_end]
        .split('/')
        .map(|segment| byte_serialize(segment.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");

    format!("{}{}{}", &url[..path_start], encoded_path, &url[path_end..])
}
