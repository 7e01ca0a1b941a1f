//! URL normalization and comparison helpers shared by the crawler and the
//! extractor.
//!
//! URLs are kept as the strings that were written in the page. `url::Url` is
//! only used to check validity and to resolve relative paths, never to
//! rewrite a URL that gets stored or compared.

use url::{Position, Url};

/// Splits off a leading `scheme:` (RFC 3986 syntax)
fn split_scheme(url: &str) -> Option<(&str, &str)> {
    let colon = url.find(':')?;
    let scheme = &url[..colon];
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| (scheme, &url[colon + 1..]))
}

/// Normalizes a URL before any validity check, visited-set lookup or storage.
///
/// Trims surrounding whitespace, prepends `http://` when no scheme is present
/// and drops the fragment. Nothing else is touched: host case, ports, paths
/// and trailing slashes stay as written.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut url = if split_scheme(trimmed).is_some() {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    if let Some(pos) = url.find('#') {
        url.truncate(pos);
    }
    url
}

/// Parses `url` if it is a well-formed absolute URL with a scheme and a host
pub fn parse_valid_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(parsed),
        _ => None,
    }
}

/// Network location exactly as written: userinfo, host case and port are
/// kept, so `example.com`, `EXAMPLE.com` and `example.com:80` all differ.
/// Empty for URLs without an authority such as `mailto:`.
pub fn netloc(url: &str) -> &str {
    let rest = split_scheme(url).map_or(url, |(_, rest)| rest);
    match rest.strip_prefix("//") {
        Some(authority) => authority.split(['/', '?', '#']).next().unwrap_or(""),
        None => "",
    }
}

pub fn is_same_domain(a: &str, b: &str) -> bool {
    netloc(a) == netloc(b)
}

/// Resolves `href` against the page URL `base`.
///
/// Absolute hrefs are returned verbatim and scheme-relative ones only gain
/// the page's scheme. Relative hrefs take the page's authority as written
/// and the path that `Url::join` resolves. `None` when `base` is not an
/// absolute URL or the href cannot be resolved.
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    let base_url = Url::parse(base).ok()?;

    if split_scheme(href).is_some() {
        return Some(href.to_string());
    }
    if href.starts_with("//") {
        return Some(format!("{}:{}", base_url.scheme(), href));
    }

    let resolved = base_url.join(href).ok()?;
    let authority = netloc(base);
    if authority.is_empty() {
        return Some(resolved.to_string());
    }
    Some(format!(
        "{}://{}{}",
        resolved.scheme(),
        authority,
        &resolved[Position::BeforePath..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("  example.com/about  "), "http://example.com/about");
        assert_eq!(normalize_url("127.0.0.1:8080/"), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_normalize_strips_fragment_only() {
        assert_eq!(
            normalize_url("https://example.com/page#section"),
            "https://example.com/page"
        );
        assert_eq!(normalize_url("https://example.com/#"), "https://example.com/");
        assert_eq!(
            normalize_url("HTTP://Example.COM:80/a%20b"),
            "HTTP://Example.COM:80/a%20b"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn test_parse_valid_url() {
        assert!(parse_valid_url("https://example.com/a").is_some());
        assert!(parse_valid_url("mailto:someone@example.com").is_none());
        assert!(parse_valid_url("javascript:void(0)").is_none());
        assert!(parse_valid_url("http://").is_none());
        assert!(parse_valid_url("").is_none());
    }

    #[test]
    fn test_netloc_is_compared_verbatim() {
        assert_eq!(netloc("http://example.com:8080/a?b"), "example.com:8080");
        assert_eq!(netloc("http://user@example.com"), "user@example.com");
        assert_eq!(netloc("mailto:someone@example.com"), "");
        assert_eq!(netloc("/relative/path"), "");

        let base = "http://example.com/";
        assert!(is_same_domain(base, "http://example.com/other"));
        assert!(!is_same_domain(base, "http://example.com:80/"));
        assert!(!is_same_domain(base, "http://EXAMPLE.com/"));
        assert!(!is_same_domain(base, "http://www.example.com/"));
    }

    #[test]
    fn test_resolve_link() {
        let base = "http://Example.com:8080/blog/post";

        assert_eq!(
            resolve_link(base, "next").as_deref(),
            Some("http://Example.com:8080/blog/next")
        );
        assert_eq!(
            resolve_link(base, "/about?x=1").as_deref(),
            Some("http://Example.com:8080/about?x=1")
        );
        assert_eq!(
            resolve_link(base, "#top").as_deref(),
            Some("http://Example.com:8080/blog/post#top")
        );
        assert_eq!(
            resolve_link(base, "//cdn.example.com/x").as_deref(),
            Some("http://cdn.example.com/x")
        );
        assert_eq!(
            resolve_link(base, "HTTPS://Other.org").as_deref(),
            Some("HTTPS://Other.org")
        );
        assert_eq!(resolve_link("not a url", "/x"), None);
    }
}
