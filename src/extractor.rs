use crate::error::{AuditError, Result};
use crate::models::{DEFAULT_ROBOTS_DIRECTIVE, PageSignals};
use crate::url_utils::{is_same_domain, normalize_url, resolve_link};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

// Selectors are parsed once and shared by every extraction
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static META_ROBOTS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='robots']").expect("meta robots selector should be valid")
});
static META_VIEWPORT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='viewport']").expect("meta viewport selector should be valid")
});
static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel~='canonical']").expect("canonical selector should be valid")
});
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static H2_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("h2 selector should be valid"));
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("a[href] selector should be valid"));
static SCHEMA_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/ld+json']")
        .expect("ld+json selector should be valid")
});

/// Turns fetched HTML into a [`PageSignals`] record.
///
/// Never fails on malformed markup: missing elements yield `None` or zero
/// counts.
pub struct PageExtractor;

impl PageExtractor {
    /// Decodes the body as UTF-8, substituting invalid bytes, and parses it
    pub fn parse_document(body: &[u8]) -> Html {
        Html::parse_document(&String::from_utf8_lossy(body))
    }

    pub fn extract(url: &str, body: &[u8]) -> PageSignals {
        let document = Self::parse_document(body);
        Self::extract_from_document(url, &document, body.len())
    }

    pub fn extract_from_document(url: &str, document: &Html, content_length: usize) -> PageSignals {
        let title = Self::extract_title(document);
        let title_length = title.as_deref().map_or(0, |t| t.chars().count());

        let meta_description = Self::extract_meta_description(document);
        let meta_description_length = meta_description
            .as_deref()
            .map_or(0, |d| d.chars().count());

        let h1_texts = Self::extract_h1_texts(document);
        let (image_count, images_without_alt) = Self::count_images(document);
        let (internal_links, external_links) = Self::count_links(document, url);

        PageSignals {
            url: url.to_string(),
            title,
            title_length,
            meta_description,
            meta_description_length,
            has_canonical: document.select(&CANONICAL_SELECTOR).next().is_some(),
            h1_count: h1_texts.len(),
            h1_texts,
            h2_count: document.select(&H2_SELECTOR).count(),
            image_count,
            images_without_alt,
            internal_links,
            external_links,
            broken_links: vec![],
            has_schema_markup: document.select(&SCHEMA_SELECTOR).next().is_some(),
            robots_directive: Self::extract_robots_directive(document),
            page_size_kb: content_length as f64 / 1000.0,
            word_count: Self::count_words(document),
            mobile_viewport: document.select(&META_VIEWPORT_SELECTOR).next().is_some(),
            crawl_timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Hyperlink targets of the document in document order, resolved against
    /// `page_url` and normalized. Targets that cannot be resolved are skipped.
    pub fn discover_links(document: &Html, page_url: &str) -> Result<Vec<String>> {
        if let Err(e) = Url::parse(page_url) {
            return Err(AuditError::InvalidUrl(format!("{}: {}", page_url, e)));
        }

        Ok(document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|el| el.value().attr("href"))
            .filter_map(|href| resolve_link(page_url, href))
            .map(|absolute| normalize_url(&absolute))
            .collect())
    }

    fn extract_title(document: &Html) -> Option<String> {
        document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn extract_meta_description(document: &Html) -> Option<String> {
        document
            .select(&META_DESC_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.to_string())
    }

    fn extract_robots_directive(document: &Html) -> String {
        document
            .select(&META_ROBOTS_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("content"))
            .unwrap_or(DEFAULT_ROBOTS_DIRECTIVE)
            .to_string()
    }

    fn extract_h1_texts(document: &Html) -> Vec<String> {
        document
            .select(&H1_SELECTOR)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    /// Returns `(total, without_alt)`; an empty `alt` counts as missing
    fn count_images(document: &Html) -> (usize, usize) {
        let mut total = 0;
        let mut without_alt = 0;
        for element in document.select(&IMG_SELECTOR) {
            total += 1;
            if element.value().attr("alt").is_none_or(str::is_empty) {
                without_alt += 1;
            }
        }
        (total, without_alt)
    }

    /// Returns `(internal, external)`. Empty hrefs and in-page fragments
    /// count as neither; a link that cannot be resolved is external.
    fn count_links(document: &Html, page_url: &str) -> (usize, usize) {
        let mut internal = 0;
        let mut external = 0;
        for href in document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|el| el.value().attr("href"))
        {
            if href.is_empty() || href.starts_with('#') {
                continue;
            }
            match resolve_link(page_url, href) {
                Some(absolute) if is_same_domain(page_url, &absolute) => internal += 1,
                _ => external += 1,
            }
        }
        (internal, external)
    }

    fn count_words(document: &Html) -> usize {
        document
            .root_element()
            .text()
            .collect::<String>()
            .split_whitespace()
            .count()
    }
}
