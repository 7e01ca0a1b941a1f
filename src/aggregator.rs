use crate::models::{AnalysisResult, IssueSeverity, IssueSummary, PageAnalysis};

pub struct Aggregator;

impl Aggregator {
    /// Averages page scores and tallies issues by severity.
    ///
    /// The overall score is rounded to two decimals and is 0 for an empty
    /// page list. Issues keep page order, then detection order.
    pub fn aggregate(analyses: &[PageAnalysis]) -> AnalysisResult {
        let issues: Vec<_> = analyses
            .iter()
            .flat_map(|analysis| analysis.issues.iter().cloned())
            .collect();

        let overall_score = if analyses.is_empty() {
            0.0
        } else {
            let total: u32 = analyses.iter().map(|analysis| analysis.score).sum();
            round2(f64::from(total) / analyses.len() as f64)
        };

        let mut issue_summary = IssueSummary::default();
        for issue in &issues {
            match issue.severity {
                IssueSeverity::Critical => issue_summary.critical += 1,
                IssueSeverity::High => issue_summary.high += 1,
                IssueSeverity::Medium => issue_summary.medium += 1,
                IssueSeverity::Low => issue_summary.low += 1,
            }
        }

        AnalysisResult {
            overall_score,
            page_count: analyses.len(),
            issues,
            issue_summary,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Rounds to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
