use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL provided: {0}")]
    Invalid(String),
}

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)^(?:https?://)?",
            r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|",
            r"localhost|",
            r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
            r"(?::\d+)?",
            r"(?:/?|[/?]\S+)$",
        ))
        .expect("URL validation regex is valid")
    })
}

/// Accepts domains, `localhost` and IPv4 addresses, with an optional
/// http(s) scheme, port and path.
pub fn is_website_url_valid(url: &str) -> bool {
    url_regex().is_match(url)
}

/// Reduces a URL to its lowercase host (and port), without scheme, path or a
/// leading `www.`.
pub fn get_formatted_url(url: &str) -> Result<String, UrlError> {
    if !is_website_url_valid(url) {
        return Err(UrlError::Invalid(url.to_string()));
    }
    Ok(format_url(url))
}

/// Same as [`get_formatted_url`] without the validity check.
pub fn format_url(url: &str) -> String {
    let host = match url.split_once("://") {
        Some((_, rest)) => rest.split(['/', '?', '#']).next().unwrap_or_default(),
        None => url.split('/').next().unwrap_or_default(),
    };
    let lowered = host.to_lowercase();
    match lowered.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}
