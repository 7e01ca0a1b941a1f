use serde::{Deserialize, Serialize};

/// Robots directive assumed when a page carries no `<meta name="robots">`.
pub const DEFAULT_ROBOTS_DIRECTIVE: &str = "index, follow";

/// Signals extracted from one successfully fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    pub url: String,
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub has_canonical: bool,
    pub h1_count: usize,
    pub h1_texts: Vec<String>,
    pub h2_count: usize,
    pub image_count: usize,
    pub images_without_alt: usize,
    pub internal_links: usize,
    pub external_links: usize,
    /// Always empty today: link targets are never verified.
    pub broken_links: Vec<String>,
    pub has_schema_markup: bool,
    pub robots_directive: String,
    pub page_size_kb: f64,
    pub word_count: usize,
    pub mobile_viewport: bool,
    pub crawl_timestamp: String,
}

impl PageSignals {
    /// A record with every signal absent, used when a page could not be fetched
    /// but still has to be scored.
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: None,
            title_length: 0,
            meta_description: None,
            meta_description_length: 0,
            has_canonical: false,
            h1_count: 0,
            h1_texts: vec![],
            h2_count: 0,
            image_count: 0,
            images_without_alt: 0,
            internal_links: 0,
            external_links: 0,
            broken_links: vec![],
            has_schema_markup: false,
            robots_directive: DEFAULT_ROBOTS_DIRECTIVE.to_string(),
            page_size_kb: 0.0,
            word_count: 0,
            mobile_viewport: false,
            crawl_timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A URL that failed at the top level, with the fetch error text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub start_url: String,
    /// In fetch order.
    pub pages: Vec<PageSignals>,
    pub broken_links: Vec<BrokenLink>,
    /// Seconds.
    pub crawl_time: f64,
    pub total_pages: usize,
    pub timestamp: String,
}

/// Result of fetching one page outside of a crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SinglePageOutcome {
    Page(Box<PageSignals>),
    Failed { url: String, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueSeverity::Critical => "critical",
            IssueSeverity::High => "high",
            IssueSeverity::Medium => "medium",
            IssueSeverity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    MissingTitle,
    ShortTitle,
    LongTitle,
    MissingMetaDescription,
    ShortMetaDescription,
    LongMetaDescription,
    MissingH1,
    MultipleH1,
    MissingAltText,
    MissingCanonical,
    MissingViewport,
    MissingSchema,
    BrokenLinks,
    LargePageSize,
    ThinContent,
}

impl IssueType {
    /// Stable identifier, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::MissingTitle => "missing_title",
            IssueType::ShortTitle => "short_title",
            IssueType::LongTitle => "long_title",
            IssueType::MissingMetaDescription => "missing_meta_description",
            IssueType::ShortMetaDescription => "short_meta_description",
            IssueType::LongMetaDescription => "long_meta_description",
            IssueType::MissingH1 => "missing_h1",
            IssueType::MultipleH1 => "multiple_h1",
            IssueType::MissingAltText => "missing_alt_text",
            IssueType::MissingCanonical => "missing_canonical",
            IssueType::MissingViewport => "missing_viewport",
            IssueType::MissingSchema => "missing_schema",
            IssueType::BrokenLinks => "broken_links",
            IssueType::LargePageSize => "large_page_size",
            IssueType::ThinContent => "thin_content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub severity: IssueSeverity,
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub links: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub url: String,
    pub score: u32,
    pub issues: Vec<SeoIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: f64,
    pub page_count: usize,
    pub issues: Vec<SeoIssue>,
    pub issue_summary: IssueSummary,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixStatus {
    Pending,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub issue_type: IssueType,
    pub severity: IssueSeverity,
    pub affected_pages: usize,
    pub title: String,
    pub description: String,
    pub fix_priority: u8,
    pub estimated_ranking_impact: String,
    pub estimated_traffic_impact: String,
    pub implementation_difficulty: Difficulty,
    pub time_to_fix_minutes: u32,
    pub code_snippet: String,
    pub auto_fixable: bool,
    pub status: FixStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedImpact {
    pub current_score: f64,
    pub estimated_score_after_fixes: f64,
    pub score_improvement: f64,
    pub estimated_traffic_improvement_percent: f64,
    pub estimated_keyword_ranking_improvement: String,
    pub confidence_level: Confidence,
    pub timeframe_to_see_results_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    pub total_recommendations: usize,
    pub current_score: f64,
    pub potential_score_increase: u32,
    pub simulated_impact: SimulatedImpact,
    pub auto_fixed_count: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub total_pages: usize,
    pub broken_links: usize,
    pub crawl_time: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_id: String,
    pub url: String,
    pub timestamp: String,
    pub crawl_summary: CrawlSummary,
    pub seo_score: f64,
    pub issues: Vec<SeoIssue>,
    pub recommendations: Vec<Recommendation>,
    pub simulated_impact: SimulatedImpact,
    /// First few crawled pages only.
    pub pages: Vec<PageSignals>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSummary {
    pub audit_id: String,
    pub url: String,
    pub timestamp: String,
    pub seo_score: f64,
    pub pages_audited: usize,
    pub issues_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickCheck {
    pub url: String,
    pub score: u32,
    pub issues: Vec<SeoIssue>,
    pub timestamp: String,
}
