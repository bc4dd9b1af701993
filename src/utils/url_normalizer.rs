//! URL normalization for incoming original URLs.
//!
//! The parsed [`Url`] is the canonical form the code generator digests, so two
//! spellings of the same address map to the same alias.

use url::{ParseError, Url};

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Normalizes user input to a canonical absolute URL.
///
/// # Normalization Rules
///
/// 1. **Scheme**: input without a scheme (including bare `host:port`) is treated as `https://`
/// 2. **Protocol**: only HTTP and HTTPS are allowed
/// 3. **Hostname**: lowercased, default ports dropped (done by the URL parser)
/// 4. **Fragments**: removed
/// 5. **Path and query**: preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs,
/// [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlNormalizationError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("EXAMPLE.com/a").unwrap().as_str(), "https://example.com/a");
/// assert_eq!(
///     normalize_url("https://example.com:443/page#top").unwrap().as_str(),
///     "https://example.com/page"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<Url, UrlNormalizationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlNormalizationError::InvalidFormat(
            "empty input".to_string(),
        ));
    }

    let mut url = match Url::parse(input) {
        Ok(url) if !input.contains("://") && is_host_with_port(&url) => with_https(input)?,
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => with_https(input)?,
        Err(e) => return Err(UrlNormalizationError::InvalidFormat(e.to_string())),
    };

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}

/// `example.com:8080/x` parses with `example.com` as its scheme and `8080/x` as an opaque path.
fn is_host_with_port(url: &Url) -> bool {
    url.cannot_be_a_base() && url.path().starts_with(|c: char| c.is_ascii_digit())
}

fn with_https(input: &str) -> Result<Url, UrlNormalizationError> {
    Url::parse(&format!("https://{}", input))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))
}
