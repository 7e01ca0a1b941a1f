pub mod aggregator;
pub mod auditor;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod http_client;
pub mod models;
pub mod recommendations;
pub mod reporter;
pub mod seo_analyzer;
pub mod store;
pub mod url_utils;

use anyhow::Result;
use auditor::{Auditor, validate_url};
use cli::Cli;
use colored::*;
use config::Config;
use crawler::{Crawler, CrawlerConfig};
use reporter::Reporter;
use std::time::Duration;
use store::{AuditStore, Retention};

/// Merges the configuration file into `args`, then audits
pub async fn run(args: Cli) -> Result<()> {
    execute(Config::apply(args)?).await
}

/// Audits with arguments that already carry the configuration file
pub async fn execute(args: Cli) -> Result<()> {
    let text_output = args.output != "json";

    // Reject malformed input before any request is made
    let urls = args
        .urls
        .iter()
        .map(|url| validate_url(url))
        .collect::<Result<Vec<_>, _>>()?;

    if text_output {
        println!("{}", "SEO Auditor".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!();
        println!("{} {}", "Max depth:".bright_white().bold(), args.depth);
        println!("{} {}", "Max pages:".bright_white().bold(), args.max_pages);
        println!(
            "{} {}",
            "External links:".bright_white().bold(),
            if args.external { "followed" } else { "skipped" }
        );
        println!();
    }

    let mut crawler = Crawler::new(CrawlerConfig {
        timeout: Duration::from_secs(args.timeout),
        max_pages: args.max_pages,
        follow_external: args.external,
    })?;

    if text_output && !args.quick {
        crawler.enable_progress_bar();
    }

    let retention = args
        .max_history
        .map_or(Retention::KeepAll, Retention::MaxEntries);
    let mut auditor = Auditor::new(crawler, AuditStore::new(retention));

    if args.quick {
        let mut checks = Vec::new();
        for url in &urls {
            let check = auditor.quick_check(url).await;
            if text_output {
                Reporter::print_quick_check(&check);
            } else {
                println!("{}", serde_json::to_string_pretty(&check)?);
            }
            checks.push(check);
        }

        if let Some(filename) = &args.save {
            match checks.as_slice() {
                [single] => Reporter::save_json_report(single, filename)?,
                all => Reporter::save_json_report(all, filename)?,
            }
        }

        return Ok(());
    }

    let mut reports = Vec::new();
    for url in &urls {
        if text_output {
            println!("{} {}", "Auditing:".bright_white().bold(), url);
        }

        let report = auditor.run_audit(url, args.depth, args.auto_fix).await?;

        if text_output {
            Reporter::print_audit_report(&report);
        } else {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        reports.push(report);
    }

    if text_output && auditor.store().len() > 1 {
        Reporter::print_history(&auditor.store().history());
    }

    if let Some(filename) = &args.save {
        match reports.as_slice() {
            [single] => Reporter::save_json_report(single, filename)?,
            all => Reporter::save_json_report(all, filename)?,
        }
    }

    Ok(())
}
