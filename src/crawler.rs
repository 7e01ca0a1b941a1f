use crate::error::Result;
use crate::extractor::PageExtractor;
use crate::fetcher::PageFetcher;
use crate::models::{BrokenLink, CrawlResult, PageSignals, SinglePageOutcome};
use crate::url_utils::{is_same_domain, normalize_url, parse_valid_url};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Applied to every request.
    pub timeout: Duration,
    /// Hard cap on pages fetched successfully, shared by the whole crawl.
    pub max_pages: usize,
    pub follow_external: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_pages: 10,
            follow_external: true,
        }
    }
}

/// A URL waiting on the traversal stack together with its discovery depth
#[derive(Debug)]
struct Frontier {
    url: String,
    depth: usize,
}

/// State owned by a single `crawl()` call
#[derive(Default)]
struct CrawlState {
    visited: HashSet<String>,
    pages: Vec<PageSignals>,
    broken_links: Vec<BrokenLink>,
}

pub struct Crawler {
    fetcher: PageFetcher,
    max_pages: usize,
    follow_external: bool,
    progress_bar: Option<ProgressBar>,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(config.timeout)?,
            max_pages: config.max_pages,
            follow_external: config.follow_external,
            progress_bar: None,
        })
    }

    /// Enable progress bar for crawling
    pub fn enable_progress_bar(&mut self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} Crawling: {pos} pages")
                .expect("Progress bar template should be valid"),
        );
        self.progress_bar = Some(pb);
    }

    /// Crawls depth-first from `start_url`.
    ///
    /// Depth is inclusive: the start page is depth 0 and a page discovered at
    /// `max_depth` is fetched but not expanded. Fetch failures are recorded as
    /// broken links and end only their own branch, so this always returns a
    /// result.
    pub async fn crawl(&self, start_url: &str, max_depth: usize) -> CrawlResult {
        let started = Instant::now();
        let start_url = normalize_url(start_url);
        tracing::info!(url = %start_url, max_depth, max_pages = self.max_pages, "Starting crawl");

        if let Some(ref pb) = self.progress_bar {
            pb.set_position(0);
        }

        let mut state = CrawlState::default();
        let mut stack = vec![Frontier {
            url: start_url.clone(),
            depth: 0,
        }];

        while let Some(Frontier { url, depth }) = stack.pop() {
            // The page budget is global, nothing left on the stack can be fetched
            if state.pages.len() >= self.max_pages {
                break;
            }

            let url = normalize_url(&url);
            if depth > max_depth || state.visited.contains(&url) {
                continue;
            }

            if parse_valid_url(&url).is_none() {
                tracing::debug!(url = %url, "Skipping invalid URL");
                continue;
            }

            state.visited.insert(url.clone());

            let fetched = match self.fetcher.fetch(&url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Failed to crawl page");
                    state.broken_links.push(BrokenLink {
                        url,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let expand = depth < max_depth && state.pages.len() + 1 < self.max_pages;
            let (signals, children) = Self::process_page(&url, &fetched.body, expand);
            state.pages.push(signals);
            tracing::info!(
                url = %url,
                status = fetched.status,
                depth,
                count = state.pages.len(),
                "Crawled page"
            );

            if let Some(ref pb) = self.progress_bar {
                pb.set_position(state.pages.len() as u64);
            }

            // Reversed so that children are popped in document order
            for child in children.into_iter().rev() {
                if self.in_scope(&url, &child) {
                    stack.push(Frontier {
                        url: child,
                        depth: depth + 1,
                    });
                }
            }
        }

        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("Crawled {} pages", state.pages.len()));
        }

        let crawl_time = started.elapsed().as_secs_f64();
        tracing::info!(
            url = %start_url,
            pages = state.pages.len(),
            broken_links = state.broken_links.len(),
            crawl_time,
            "Crawl finished"
        );

        CrawlResult {
            start_url,
            total_pages: state.pages.len(),
            pages: state.pages,
            broken_links: state.broken_links,
            crawl_time,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Fetches and extracts one page without crawling
    pub async fn fetch_single_page(&self, url: &str) -> SinglePageOutcome {
        match self.fetcher.fetch(url).await {
            Ok(fetched) => SinglePageOutcome::Page(Box::new(PageExtractor::extract(
                url,
                &fetched.body,
            ))),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to fetch page");
                SinglePageOutcome::Failed {
                    url: url.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Extracts signals and, when `expand` is set, the normalized child links.
    /// Kept synchronous so the parsed document never lives across an await.
    ///
    /// Link discovery fails only for a page URL that does not parse; the
    /// page's signals are still returned, with no children.
    fn process_page(url: &str, body: &[u8], expand: bool) -> (PageSignals, Vec<String>) {
        let document = PageExtractor::parse_document(body);
        let signals = PageExtractor::extract_from_document(url, &document, body.len());

        if !expand {
            return (signals, vec![]);
        }

        let children = match PageExtractor::discover_links(&document, url) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Error parsing links");
                vec![]
            }
        };

        (signals, children)
    }

    /// A child link is followed only when it is a valid URL and, unless
    /// external crawling is enabled, shares the parent's network location.
    fn in_scope(&self, parent: &str, child: &str) -> bool {
        parse_valid_url(child).is_some() && (self.follow_external || is_same_domain(parent, child))
    }
}
