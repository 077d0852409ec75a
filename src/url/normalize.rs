use crate::{ScraperError, UrlError};
use url::Url;

/// Returns true for the schemes the crawler is allowed to fetch
pub fn is_crawlable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Resolves a reference found on a page against the page's base URL
///
/// Relative references inherit scheme and authority from `base` following
/// standard URL resolution. The result is not canonicalized any further:
/// trailing slashes, query order and fragments are kept exactly as resolved,
/// so two spellings of the same resource are two distinct URLs.
///
/// # Arguments
///
/// * `reference` - The raw `href` value
/// * `base` - The URL of the page the reference was found on
///
/// # Returns
///
/// * `Ok(Url)` - Absolute http/https URL
/// * `Err(UrlError)` - The reference could not be resolved or is not http(s)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use web_scraper::url::resolve_url;
///
/// let base = Url::parse("http://seed-host/index.html").unwrap();
/// assert_eq!(resolve_url("/a", &base).unwrap().as_str(), "http://seed-host/a");
/// assert!(resolve_url("mailto:someone@example.com", &base).is_err());
/// ```
pub fn resolve_url(reference: &str, base: &Url) -> Result<Url, UrlError> {
    let resolved = base
        .join(reference.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))?;

    if !is_crawlable_scheme(&resolved) {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }

    Ok(resolved)
}

/// Turns a user-supplied seed into an absolute http(s) URL
///
/// The seed is trimmed; a seed without an explicit `http://` or `https://`
/// prefix is assumed to be HTTPS.
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed URL
/// * `Err(ScraperError::Validation)` - Empty, unparsable or non-http(s) seed
pub fn normalize_seed(raw: &str) -> Result<Url, ScraperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScraperError::Validation(
            "seed URL cannot be empty".to_string(),
        ));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate).map_err(|e| {
        ScraperError::Validation(format!("invalid seed URL '{}': {}", trimmed, e))
    })?;

    if !is_crawlable_scheme(&url) || url.host_str().is_none() {
        return Err(ScraperError::Validation(format!(
            "seed URL '{}' must be an http or https address",
            trimmed
        )));
    }

    Ok(url)
}
