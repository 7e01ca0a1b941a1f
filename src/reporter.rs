use crate::models::{AuditReport, AuditSummary, FixStatus, IssueSeverity, QuickCheck, SeoIssue};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    fn colored_score(score: f64) -> ColoredString {
        let text = format!("{:.2}", score);
        if score >= 80.0 {
            text.bright_green()
        } else if score >= 50.0 {
            text.yellow()
        } else {
            text.bright_red()
        }
    }

    fn severity_label(severity: IssueSeverity) -> ColoredString {
        let label = format!("{:<8}", severity.as_str().to_uppercase());
        match severity {
            IssueSeverity::Critical => label.as_str().bright_red().bold(),
            IssueSeverity::High => label.as_str().bright_red(),
            IssueSeverity::Medium => label.as_str().yellow(),
            IssueSeverity::Low => label.as_str().bright_cyan(),
        }
    }

    fn print_issues(issues: &[SeoIssue]) {
        let mut current_page: Option<&str> = None;
        for issue in issues {
            if current_page != Some(issue.page.as_str()) {
                println!();
                println!("  {} {}", "URL:".bright_white().bold(), issue.page);
                current_page = Some(issue.page.as_str());
            }
            println!(
                "    [{}] {}: {}",
                Self::severity_label(issue.severity),
                issue.title,
                issue.description
            );
        }
    }

    pub fn print_audit_report(report: &AuditReport) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "SEO Audit Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "Audit ID".bright_white().bold(), report.audit_id);
        println!("{}: {}", "URL".bright_white().bold(), report.url);
        println!("{}: {}", "Timestamp".bright_white().bold(), report.timestamp);
        println!();

        println!("{}", "Summary".bright_yellow().bold().underline());
        println!(
            "  SEO Score:           {}",
            Self::colored_score(report.seo_score)
        );
        println!(
            "  Pages Crawled:       {}",
            report.crawl_summary.total_pages.to_string().bright_green()
        );
        println!(
            "  Broken Links:        {}",
            if report.crawl_summary.broken_links > 0 {
                report.crawl_summary.broken_links.to_string().bright_red()
            } else {
                report.crawl_summary.broken_links.to_string().bright_green()
            }
        );
        println!(
            "  Crawl Time:          {:.2}s",
            report.crawl_summary.crawl_time
        );
        println!(
            "  Issues:              {}",
            report.issues.len().to_string().yellow()
        );
        println!();

        if !report.issues.is_empty() {
            println!("{}", "Issues".bright_yellow().bold().underline());
            Self::print_issues(&report.issues);
            println!();
        }

        if !report.recommendations.is_empty() {
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for rec in &report.recommendations {
                let status = match rec.status {
                    FixStatus::Fixed => "fixed".bright_green(),
                    FixStatus::Pending => "pending".dimmed(),
                };
                println!(
                    "  {} [{}] {} ({} page(s), {:?}, ~{} min, ranking {}) {}",
                    rec.id,
                    Self::severity_label(rec.severity),
                    rec.title,
                    rec.affected_pages,
                    rec.implementation_difficulty,
                    rec.time_to_fix_minutes,
                    rec.estimated_ranking_impact.bright_green(),
                    status
                );
            }
            println!();
        }

        let impact = &report.simulated_impact;
        println!("{}", "Simulated Impact".bright_yellow().bold().underline());
        println!(
            "  Score after fixes:   {} ({:+.2})",
            Self::colored_score(impact.estimated_score_after_fixes),
            impact.score_improvement
        );
        println!(
            "  Traffic:             {:+.2}%",
            impact.estimated_traffic_improvement_percent
        );
        println!(
            "  Keyword rankings:    {}",
            impact.estimated_keyword_ranking_improvement
        );
        println!(
            "  Confidence:          {:?}, results in ~{} days",
            impact.confidence_level, impact.timeframe_to_see_results_days
        );

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_quick_check(check: &QuickCheck) {
        println!(
            "{} {} {}",
            "Quick check:".bright_white().bold(),
            check.url,
            Self::colored_score(f64::from(check.score))
        );
        Self::print_issues(&check.issues);
        println!();
    }

    pub fn print_history(history: &[AuditSummary]) {
        println!("{}", "Audit History".bright_yellow().bold().underline());
        for entry in history {
            println!(
                "  {}  {}  score {}  pages {}  issues {}",
                entry.audit_id,
                entry.url,
                Self::colored_score(entry.seo_score),
                entry.pages_audited,
                entry.issues_count
            );
        }
        println!();
    }

    pub fn save_json_report<T: Serialize + ?Sized>(report: &T, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(json.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}
