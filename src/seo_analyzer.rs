use crate::aggregator::Aggregator;
use crate::models::{
    AnalysisResult, CrawlResult, IssueSeverity, IssueType, PageAnalysis, PageSignals, SeoIssue,
};

const BASELINE_SCORE: i32 = 100;
const TITLE_MIN_LENGTH: usize = 30;
const TITLE_MAX_LENGTH: usize = 60;
const META_DESC_MIN_LENGTH: usize = 120;
const META_DESC_MAX_LENGTH: usize = 160;
const MAX_PAGE_SIZE_KB: f64 = 2000.0;
const MIN_WORD_COUNT: usize = 300;
const BROKEN_LINKS_SHOWN: usize = 5;

/// Scores one page against the fixed rubric.
///
/// Every category is checked independently and emits at most one issue; the
/// issues come out in rubric order.
pub struct SeoAnalyzer;

impl SeoAnalyzer {
    /// Analyzes every crawled page in order and aggregates the results
    pub fn analyze_pages(crawl: &CrawlResult) -> AnalysisResult {
        let analyses: Vec<PageAnalysis> =
            crawl.pages.iter().map(Self::analyze_single_page).collect();
        Aggregator::aggregate(&analyses)
    }

    pub fn analyze_single_page(page: &PageSignals) -> PageAnalysis {
        let mut findings = Findings::new(&page.url);

        // Title
        if page.title.as_deref().is_none_or(str::is_empty) {
            findings.flag(
                IssueType::MissingTitle,
                IssueSeverity::Critical,
                "Missing Page Title",
                "Page title tag is missing".to_string(),
                10,
            );
        } else if page.title_length < TITLE_MIN_LENGTH {
            findings.flag(
                IssueType::ShortTitle,
                IssueSeverity::Medium,
                "Title Too Short",
                format!(
                    "Title is {} characters. Recommended: 50-60 characters",
                    page.title_length
                ),
                3,
            );
        } else if page.title_length > TITLE_MAX_LENGTH {
            findings.flag(
                IssueType::LongTitle,
                IssueSeverity::Low,
                "Title Too Long",
                format!(
                    "Title is {} characters. Recommended: 50-60 characters",
                    page.title_length
                ),
                2,
            );
        }

        // Meta description
        if page.meta_description.as_deref().is_none_or(str::is_empty) {
            findings.flag(
                IssueType::MissingMetaDescription,
                IssueSeverity::High,
                "Missing Meta Description",
                "Page meta description is missing".to_string(),
                10,
            );
        } else if page.meta_description_length < META_DESC_MIN_LENGTH {
            findings.flag(
                IssueType::ShortMetaDescription,
                IssueSeverity::Medium,
                "Meta Description Too Short",
                format!(
                    "Meta description is {} characters. Recommended: 150-160 characters",
                    page.meta_description_length
                ),
                4,
            );
        } else if page.meta_description_length > META_DESC_MAX_LENGTH {
            findings.flag(
                IssueType::LongMetaDescription,
                IssueSeverity::Low,
                "Meta Description Too Long",
                format!(
                    "Meta description is {} characters. Recommended: 150-160 characters",
                    page.meta_description_length
                ),
                2,
            );
        }

        // H1
        if page.h1_count == 0 {
            findings.flag(
                IssueType::MissingH1,
                IssueSeverity::High,
                "Missing H1 Tag",
                "Page should have exactly one H1 tag".to_string(),
                8,
            );
        } else if page.h1_count > 1 {
            findings.flag(
                IssueType::MultipleH1,
                IssueSeverity::Medium,
                "Multiple H1 Tags",
                format!("Page has {} H1 tags. Should have only one", page.h1_count),
                4,
            );
        }

        // Image alt text
        if page.image_count > 0 && page.images_without_alt > 0 {
            let missing_percentage =
                page.images_without_alt as f64 / page.image_count as f64 * 100.0;
            let (severity, deduction) = if missing_percentage > 50.0 {
                (IssueSeverity::Medium, 4)
            } else {
                (IssueSeverity::Low, 2)
            };
            findings.flag(
                IssueType::MissingAltText,
                severity,
                "Missing Image Alt Text",
                format!(
                    "{} of {} images ({:.0}%) are missing alt text",
                    page.images_without_alt, page.image_count, missing_percentage
                ),
                deduction,
            );
        }

        if !page.has_canonical {
            findings.flag(
                IssueType::MissingCanonical,
                IssueSeverity::Medium,
                "Missing Canonical Tag",
                "Page should have a canonical tag to prevent duplicate content".to_string(),
                3,
            );
        }

        if !page.mobile_viewport {
            findings.flag(
                IssueType::MissingViewport,
                IssueSeverity::Critical,
                "Missing Mobile Viewport Meta Tag",
                "Page is not optimized for mobile devices".to_string(),
                8,
            );
        }

        if !page.has_schema_markup {
            findings.flag(
                IssueType::MissingSchema,
                IssueSeverity::Low,
                "Missing Schema Markup",
                "Page would benefit from structured data (Schema.org)".to_string(),
                2,
            );
        }

        // Only populated if an extractor ever verifies link targets
        if !page.broken_links.is_empty() {
            let count = page.broken_links.len();
            let issue = findings.flag(
                IssueType::BrokenLinks,
                IssueSeverity::High,
                "Broken Links Found",
                format!("Page contains {} broken links", count),
                count.saturating_mul(2).min(8) as i32,
            );
            issue.links = Some(
                page.broken_links
                    .iter()
                    .take(BROKEN_LINKS_SHOWN)
                    .cloned()
                    .collect(),
            );
        }

        if page.page_size_kb > MAX_PAGE_SIZE_KB {
            findings.flag(
                IssueType::LargePageSize,
                IssueSeverity::Low,
                "Large Page Size",
                format!(
                    "Page is {:.0}KB. Should be < 2MB for optimal performance",
                    page.page_size_kb
                ),
                3,
            );
        }

        if page.word_count < MIN_WORD_COUNT {
            findings.flag(
                IssueType::ThinContent,
                IssueSeverity::Medium,
                "Thin Content",
                format!(
                    "Page has {} words. Minimum 300 words recommended",
                    page.word_count
                ),
                4,
            );
        }

        findings.finish()
    }
}

/// Issues found so far on one page and the running score
struct Findings<'a> {
    url: &'a str,
    issues: Vec<SeoIssue>,
    score: i32,
}

impl<'a> Findings<'a> {
    fn new(url: &'a str) -> Self {
        Self {
            url,
            issues: Vec::new(),
            score: BASELINE_SCORE,
        }
    }

    fn flag(
        &mut self,
        issue_type: IssueType,
        severity: IssueSeverity,
        title: &str,
        description: String,
        deduction: i32,
    ) -> &mut SeoIssue {
        self.score -= deduction;
        self.issues.push(SeoIssue {
            issue_type,
            title: title.to_string(),
            description,
            severity,
            page: self.url.to_string(),
            links: None,
        });
        let last = self.issues.len() - 1;
        &mut self.issues[last]
    }

    fn finish(self) -> PageAnalysis {
        PageAnalysis {
            url: self.url.to_string(),
            score: self.score.max(0) as u32,
            issues: self.issues,
        }
    }
}
