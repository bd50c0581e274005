//! URL validation and domain extraction.
//!
//! The deduplication key is the URL string itself, so nothing here rewrites
//! a URL. This module only decides whether a hit's URL is usable and which
//! registrable domain it belongs to.

use url::Url;

/// Validate a raw hit URL, returning the trimmed URL and its domain.
///
/// A URL is usable when it is non-empty after trimming and parses as an
/// `http` or `https` URL with a host. Anything else yields `None` and the
/// hit is dropped by the deduplicator.
///
/// # Examples
///
/// ```
/// use finscope_evidence::pipeline::url_normalize::validate_url;
///
/// let (url, domain) = validate_url(" https://www.Reuters.com/x ").unwrap();
/// assert_eq!(url, "https://www.Reuters.com/x");
/// assert_eq!(domain, "reuters.com");
/// ```
pub fn validate_url(raw: &str) -> Option<(&str, String)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = Url::parse(trimmed).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    let domain = normalize_domain(host);
    if domain.is_empty() {
        return None;
    }
    Some((trimmed, domain))
}

/// Extract the normalised domain from a URL, if it has one.
pub fn extract_domain(raw: &str) -> Option<String> {
    validate_url(raw).map(|(_, domain)| domain)
}

/// Normalise a host name for registry lookup.
///
/// Lowercases, trims surrounding whitespace and a trailing root dot, and
/// strips a single leading `www.`. Total over all inputs.
pub fn normalize_domain(host: &str) -> String {
    let lowered = host.trim().trim_end_matches('.').to_lowercase();
    match lowered.strip_prefix("www.") {
        Some(rest) => rest.to_owned(),
        None => lowered,
    }
}
