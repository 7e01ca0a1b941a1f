use crate::crawler::Crawler;
use crate::error::{AuditError, Result};
use crate::models::{AuditReport, CrawlSummary, PageSignals, QuickCheck, SinglePageOutcome};
use crate::recommendations::RecommendationEngine;
use crate::seo_analyzer::SeoAnalyzer;
use crate::store::AuditStore;
use crate::url_utils::{normalize_url, parse_valid_url};

/// Number of crawled pages embedded in an audit report
const REPORT_PAGE_LIMIT: usize = 5;

/// Runs audits end to end and keeps their reports in an injected store
pub struct Auditor {
    crawler: Crawler,
    store: AuditStore,
}

impl Auditor {
    pub fn new(crawler: Crawler, store: AuditStore) -> Self {
        Self { crawler, store }
    }

    /// Crawls `url` to `depth`, scores every page, generates recommendations
    /// and stores the resulting report.
    ///
    /// Fails only for an invalid URL, before any request is made.
    pub async fn run_audit(&mut self, url: &str, depth: usize, auto_fix: bool) -> Result<AuditReport> {
        let url = validate_url(url)?;

        tracing::info!(url = %url, depth, "Running audit");
        let crawl = self.crawler.crawl(&url, depth).await;

        tracing::info!(pages = crawl.pages.len(), "Analyzing pages");
        let analysis = SeoAnalyzer::analyze_pages(&crawl);

        tracing::info!(issues = analysis.issues.len(), "Generating recommendations");
        let recommendations = RecommendationEngine::generate(&analysis, auto_fix);

        let report = AuditReport {
            audit_id: self.next_audit_id(),
            url,
            timestamp: chrono::Utc::now().to_rfc3339(),
            crawl_summary: CrawlSummary {
                total_pages: crawl.pages.len(),
                broken_links: crawl.broken_links.len(),
                crawl_time: crawl.crawl_time,
            },
            seo_score: analysis.overall_score,
            issues: analysis.issues,
            recommendations: recommendations.recommendations,
            simulated_impact: recommendations.simulated_impact,
            pages: crawl.pages.into_iter().take(REPORT_PAGE_LIMIT).collect(),
        };

        self.store.insert(report.clone());
        tracing::info!(audit_id = %report.audit_id, score = report.seo_score, "Audit stored");

        Ok(report)
    }

    /// Scores a single page without crawling. A page that cannot be fetched
    /// is scored as if every signal were missing.
    pub async fn quick_check(&self, url: &str) -> QuickCheck {
        let page = match self.crawler.fetch_single_page(url).await {
            SinglePageOutcome::Page(page) => *page,
            SinglePageOutcome::Failed { url, .. } => PageSignals::empty(&url),
        };
        let analysis = SeoAnalyzer::analyze_single_page(&page);

        QuickCheck {
            url: url.to_string(),
            score: analysis.score,
            issues: analysis.issues,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn store(&self) -> &AuditStore {
        &self.store
    }

    fn next_audit_id(&self) -> String {
        let mut stamp = chrono::Utc::now().timestamp_micros();
        loop {
            let id = format!("audit_{}", stamp);
            if self.store.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }
}

/// Normalizes a user-supplied URL and rejects it unless it has a scheme and host
pub fn validate_url(url: &str) -> Result<String> {
    if url.trim().is_empty() {
        return Err(AuditError::InvalidUrl("URL is required".to_string()));
    }

    let normalized = normalize_url(url);
    match parse_valid_url(&normalized) {
        Some(_) => Ok(normalized),
        None => Err(AuditError::InvalidUrl(url.to_string())),
    }
}
