use crate::aggregator::round2;
use crate::models::{
    AnalysisResult, Confidence, Difficulty, FixStatus, IssueSeverity, IssueType, Recommendation,
    RecommendationReport, SeoIssue, SimulatedImpact,
};
use std::collections::HashSet;

/// Share of the potential impact expected once every fix is applied.
const REALIZED_IMPACT_RATIO: f64 = 0.7;
/// Traffic lift, in percent, per point of score.
const TRAFFIC_PER_SCORE_POINT: f64 = 2.5;

const NO_SNIPPET: &str = "<!-- Code snippet not available -->";

const SCHEMA_SNIPPET: &str = r#"<script type="application/ld+json">
{
  "@context": "https://schema.org",
  "@type": "Organization",
  "name": "Your Organization",
  "url": "https://example.com"
}
</script>"#;

/// Ranking impact (percent) and fix priority for a severity
fn impact_factor(severity: IssueSeverity) -> (u32, u8) {
    match severity {
        IssueSeverity::Critical => (15, 1),
        IssueSeverity::High => (10, 2),
        IssueSeverity::Medium => (5, 3),
        IssueSeverity::Low => (2, 4),
    }
}

fn difficulty(issue_type: IssueType) -> Difficulty {
    match issue_type {
        IssueType::MissingTitle
        | IssueType::MissingMetaDescription
        | IssueType::MissingH1
        | IssueType::MissingAltText
        | IssueType::MissingCanonical
        | IssueType::MissingViewport
        | IssueType::MissingSchema
        | IssueType::ShortTitle
        | IssueType::LongTitle
        | IssueType::ThinContent => Difficulty::Easy,
        IssueType::BrokenLinks | IssueType::MultipleH1 => Difficulty::Medium,
        IssueType::ShortMetaDescription
        | IssueType::LongMetaDescription
        | IssueType::LargePageSize => Difficulty::Hard,
    }
}

fn time_to_fix_minutes(issue_type: IssueType) -> u32 {
    match issue_type {
        IssueType::MissingTitle | IssueType::MissingMetaDescription => 5,
        IssueType::ShortTitle | IssueType::LongTitle => 10,
        IssueType::MissingH1 => 15,
        IssueType::MultipleH1 => 20,
        IssueType::MissingAltText => 30,
        IssueType::MissingCanonical => 10,
        IssueType::MissingViewport => 5,
        IssueType::MissingSchema => 45,
        IssueType::BrokenLinks => 60,
        IssueType::LargePageSize => 120,
        IssueType::ThinContent => 60,
        IssueType::ShortMetaDescription | IssueType::LongMetaDescription => 30,
    }
}

fn is_auto_fixable(issue_type: IssueType) -> bool {
    matches!(
        issue_type,
        IssueType::MissingTitle
            | IssueType::MissingMetaDescription
            | IssueType::MissingCanonical
            | IssueType::MissingViewport
            | IssueType::MissingH1
    )
}

fn code_snippet(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::MissingTitle => "<title>Your Page Title - Your Brand</title>",
        IssueType::MissingMetaDescription => {
            r#"<meta name="description" content="Your 150-160 character description here">"#
        }
        IssueType::MissingCanonical => r#"<link rel="canonical" href="https://example.com/page">"#,
        IssueType::MissingViewport => {
            r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#
        }
        IssueType::MissingH1 => "<h1>Your Main Heading</h1>",
        IssueType::MissingSchema => SCHEMA_SNIPPET,
        IssueType::MissingAltText => r#"<img src="image.jpg" alt="Descriptive alt text">"#,
        _ => NO_SNIPPET,
    }
}

/// Groups issues by type, keeping the order in which each type first appears
fn group_issues(issues: &[SeoIssue]) -> Vec<(IssueType, Vec<&SeoIssue>)> {
    let mut groups: Vec<(IssueType, Vec<&SeoIssue>)> = Vec::new();
    for issue in issues {
        match groups.iter_mut().find(|(t, _)| *t == issue.issue_type) {
            Some((_, group)) => group.push(issue),
            None => groups.push((issue.issue_type, vec![issue])),
        }
    }
    groups
}

/// Turns an analysis into prioritized fix recommendations and a simulated
/// ranking impact.
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn generate(analysis: &AnalysisResult, auto_fix: bool) -> RecommendationReport {
        let mut recommendations = Vec::new();
        let mut potential_score_increase = 0;

        for (issue_type, group) in group_issues(&analysis.issues) {
            let first = group[0];
            let (ranking_impact, priority) = impact_factor(first.severity);
            let auto_fixable = is_auto_fixable(issue_type);
            let affected_pages = group
                .iter()
                .map(|issue| issue.page.as_str())
                .collect::<HashSet<_>>()
                .len();

            recommendations.push(Recommendation {
                id: format!("rec_{}", recommendations.len() + 1),
                issue_type,
                severity: first.severity,
                affected_pages,
                title: first.title.clone(),
                description: first.description.clone(),
                fix_priority: priority,
                estimated_ranking_impact: format!("+{}%", ranking_impact),
                estimated_traffic_impact: format!("+{}%", ranking_impact * 2),
                implementation_difficulty: difficulty(issue_type),
                time_to_fix_minutes: time_to_fix_minutes(issue_type),
                code_snippet: code_snippet(issue_type).to_string(),
                auto_fixable,
                status: if auto_fix && auto_fixable {
                    FixStatus::Fixed
                } else {
                    FixStatus::Pending
                },
            });
            potential_score_increase += ranking_impact;
        }

        // Stable: equal priorities keep first-appearance order
        recommendations.sort_by_key(|rec| rec.fix_priority);

        let simulated_impact = Self::simulate_impact(
            analysis.overall_score,
            potential_score_increase,
            &recommendations,
        );

        RecommendationReport {
            total_recommendations: recommendations.len(),
            current_score: analysis.overall_score,
            potential_score_increase,
            simulated_impact,
            auto_fixed_count: recommendations
                .iter()
                .filter(|rec| rec.status == FixStatus::Fixed)
                .count(),
            recommendations,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn simulate_impact(
        current_score: f64,
        potential_impact: u32,
        recommendations: &[Recommendation],
    ) -> SimulatedImpact {
        let estimated = (current_score + f64::from(potential_impact) * REALIZED_IMPACT_RATIO)
            .min(100.0);
        let traffic_lift = (estimated - current_score) * TRAFFIC_PER_SCORE_POINT;

        let count = |severity| {
            recommendations
                .iter()
                .filter(|rec| rec.severity == severity)
                .count()
        };
        let critical = count(IssueSeverity::Critical);
        let high = count(IssueSeverity::High);

        SimulatedImpact {
            current_score: round2(current_score),
            estimated_score_after_fixes: round2(estimated),
            score_improvement: round2(estimated - current_score),
            estimated_traffic_improvement_percent: round2(traffic_lift),
            estimated_keyword_ranking_improvement: format!("+{} positions", critical * 3 + high),
            confidence_level: if critical > 0 {
                Confidence::High
            } else {
                Confidence::Medium
            },
            timeframe_to_see_results_days: if critical > 0 { 30 } else { 60 },
        }
    }
}
