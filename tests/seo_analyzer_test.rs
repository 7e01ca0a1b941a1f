mod server;

use seo_auditor::aggregator::Aggregator;
use seo_auditor::crawler::{Crawler, CrawlerConfig};
use seo_auditor::models::{
    CrawlResult, IssueSeverity, IssueType, PageAnalysis, PageSignals, SeoIssue,
};
use seo_auditor::seo_analyzer::SeoAnalyzer;
use server::get_test_server_url;

/// A page that triggers no rule at all
fn optimized_page(url: &str) -> PageSignals {
    PageSignals {
        title: Some("t".repeat(45)),
        title_length: 45,
        meta_description: Some("d".repeat(155)),
        meta_description_length: 155,
        has_canonical: true,
        h1_count: 1,
        h1_texts: vec!["Heading".to_string()],
        image_count: 10,
        images_without_alt: 0,
        has_schema_markup: true,
        page_size_kb: 250.0,
        word_count: 500,
        mobile_viewport: true,
        ..PageSignals::empty(url)
    }
}

fn issue_types(analysis: &PageAnalysis) -> Vec<IssueType> {
    analysis.issues.iter().map(|issue| issue.issue_type).collect()
}

fn find(analysis: &PageAnalysis, issue_type: IssueType) -> &SeoIssue {
    analysis
        .issues
        .iter()
        .find(|issue| issue.issue_type == issue_type)
        .unwrap_or_else(|| panic!("{:?} not detected", issue_type))
}

#[test]
fn test_optimized_page_scores_100() {
    let analysis = SeoAnalyzer::analyze_single_page(&optimized_page("https://example.com/"));

    assert_eq!(analysis.score, 100);
    assert!(analysis.issues.is_empty());
    assert_eq!(analysis.url, "https://example.com/");
}

#[test]
fn test_page_missing_every_tag_scores_59() {
    let page = PageSignals {
        word_count: 300,
        ..PageSignals::empty("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);

    assert_eq!(analysis.score, 59);
    assert_eq!(
        issue_types(&analysis),
        vec![
            IssueType::MissingTitle,
            IssueType::MissingMetaDescription,
            IssueType::MissingH1,
            IssueType::MissingCanonical,
            IssueType::MissingViewport,
            IssueType::MissingSchema,
        ],
        "Issues should follow rubric order"
    );
    assert!(
        analysis
            .issues
            .iter()
            .all(|issue| issue.page == "https://example.com/")
    );
}

#[test]
fn test_empty_title_counts_as_missing() {
    let page = PageSignals {
        title: Some(String::new()),
        title_length: 0,
        ..optimized_page("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);

    assert_eq!(analysis.score, 90);
    assert_eq!(find(&analysis, IssueType::MissingTitle).severity, IssueSeverity::Critical);
}

#[test]
fn test_title_length_rules() {
    let cases = [
        (29, Some((IssueType::ShortTitle, IssueSeverity::Medium, 97))),
        (30, None),
        (60, None),
        (61, Some((IssueType::LongTitle, IssueSeverity::Low, 98))),
    ];

    for (length, expected) in cases {
        let page = PageSignals {
            title: Some("x".repeat(length)),
            title_length: length,
            ..optimized_page("https://example.com/")
        };
        let analysis = SeoAnalyzer::analyze_single_page(&page);

        match expected {
            Some((issue_type, severity, score)) => {
                let issue = find(&analysis, issue_type);
                assert_eq!(issue.severity, severity);
                assert!(issue.description.contains(&format!("{} characters", length)));
                assert_eq!(analysis.score, score);
            }
            None => assert_eq!(analysis.score, 100, "length {} should pass", length),
        }
    }
}

#[test]
fn test_meta_description_length_rules() {
    let cases = [
        (119, Some((IssueType::ShortMetaDescription, IssueSeverity::Medium, 96))),
        (120, None),
        (160, None),
        (161, Some((IssueType::LongMetaDescription, IssueSeverity::Low, 98))),
    ];

    for (length, expected) in cases {
        let page = PageSignals {
            meta_description: Some("x".repeat(length)),
            meta_description_length: length,
            ..optimized_page("https://example.com/")
        };
        let analysis = SeoAnalyzer::analyze_single_page(&page);

        match expected {
            Some((issue_type, severity, score)) => {
                let issue = find(&analysis, issue_type);
                assert_eq!(issue.severity, severity);
                assert!(issue.description.contains(&format!("{} characters", length)));
                assert_eq!(analysis.score, score);
            }
            None => assert_eq!(analysis.score, 100, "length {} should pass", length),
        }
    }
}

#[test]
fn test_multiple_h1() {
    let page = PageSignals {
        h1_count: 3,
        ..optimized_page("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);

    let issue = find(&analysis, IssueType::MultipleH1);
    assert_eq!(issue.severity, IssueSeverity::Medium);
    assert!(issue.description.contains("3 H1 tags"));
    assert_eq!(analysis.score, 96);
}

#[test]
fn test_missing_alt_text_severity_depends_on_share() {
    let most_missing = PageSignals {
        image_count: 4,
        images_without_alt: 3,
        ..optimized_page("https://example.com/")
    };
    let analysis = SeoAnalyzer::analyze_single_page(&most_missing);
    let issue = find(&analysis, IssueType::MissingAltText);
    assert_eq!(issue.severity, IssueSeverity::Medium);
    assert_eq!(issue.description, "3 of 4 images (75%) are missing alt text");
    assert_eq!(analysis.score, 96);

    let few_missing = PageSignals {
        image_count: 4,
        images_without_alt: 1,
        ..optimized_page("https://example.com/")
    };
    let analysis = SeoAnalyzer::analyze_single_page(&few_missing);
    let issue = find(&analysis, IssueType::MissingAltText);
    assert_eq!(issue.severity, IssueSeverity::Low);
    assert_eq!(issue.description, "1 of 4 images (25%) are missing alt text");
    assert_eq!(analysis.score, 98);

    // Exactly half is not more than half
    let half_missing = PageSignals {
        image_count: 2,
        images_without_alt: 1,
        ..optimized_page("https://example.com/")
    };
    let analysis = SeoAnalyzer::analyze_single_page(&half_missing);
    assert_eq!(find(&analysis, IssueType::MissingAltText).severity, IssueSeverity::Low);
}

#[test]
fn test_no_images_means_no_alt_issue() {
    let page = PageSignals {
        image_count: 0,
        images_without_alt: 0,
        ..optimized_page("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);
    assert!(analysis.issues.is_empty());
}

#[test]
fn test_broken_link_deduction_saturates() {
    let links: Vec<String> = (0..10)
        .map(|i| format!("https://example.com/dead{}", i))
        .collect();
    let page = PageSignals {
        broken_links: links.clone(),
        ..optimized_page("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);

    assert_eq!(analysis.score, 92, "Deduction is capped at 8");
    let issue = find(&analysis, IssueType::BrokenLinks);
    assert_eq!(issue.severity, IssueSeverity::High);
    assert_eq!(issue.links.as_deref(), Some(&links[..5]));
    assert!(issue.description.contains("10 broken links"));
}

#[test]
fn test_broken_link_deduction_below_cap() {
    let page = PageSignals {
        broken_links: vec!["https://example.com/a".to_string(); 3],
        ..optimized_page("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);
    assert_eq!(analysis.score, 94);
}

#[test]
fn test_large_page_and_thin_content() {
    let page = PageSignals {
        page_size_kb: 2500.4,
        word_count: 120,
        ..optimized_page("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);

    assert_eq!(
        issue_types(&analysis),
        vec![IssueType::LargePageSize, IssueType::ThinContent]
    );
    assert!(find(&analysis, IssueType::LargePageSize).description.contains("2500KB"));
    assert!(find(&analysis, IssueType::ThinContent).description.contains("120 words"));
    assert_eq!(analysis.score, 93);

    let at_limit = PageSignals {
        page_size_kb: 2000.0,
        ..optimized_page("https://example.com/")
    };
    assert_eq!(SeoAnalyzer::analyze_single_page(&at_limit).score, 100);
}

#[test]
fn test_worst_page_stays_in_range() {
    let page = PageSignals {
        h1_count: 0,
        image_count: 10,
        images_without_alt: 10,
        broken_links: vec!["https://example.com/x".to_string(); 20],
        page_size_kb: 5000.0,
        word_count: 0,
        ..PageSignals::empty("https://example.com/")
    };

    let analysis = SeoAnalyzer::analyze_single_page(&page);

    // 100 - 10 - 10 - 8 - 4 - 3 - 8 - 2 - 8 - 3 - 4
    assert_eq!(analysis.score, 40);
    assert!(analysis.score <= 100);
}

#[test]
fn test_aggregate_mean_score() {
    let good = SeoAnalyzer::analyze_single_page(&optimized_page("https://example.com/"));
    let bad = SeoAnalyzer::analyze_single_page(&PageSignals {
        word_count: 300,
        ..PageSignals::empty("https://example.com/bad")
    });

    let result = Aggregator::aggregate(&[good, bad]);

    assert_eq!(result.overall_score, 79.5);
    assert_eq!(result.page_count, 2);
    assert_eq!(result.issues.len(), 6);
    assert_eq!(result.issue_summary.critical, 2);
    assert_eq!(result.issue_summary.high, 2);
    assert_eq!(result.issue_summary.medium, 1);
    assert_eq!(result.issue_summary.low, 1);
}

#[test]
fn test_aggregate_rounds_to_two_decimals() {
    let analyses: Vec<PageAnalysis> = [100, 59, 59]
        .into_iter()
        .map(|score| PageAnalysis {
            url: "https://example.com/".to_string(),
            score,
            issues: vec![],
        })
        .collect();

    assert_eq!(Aggregator::aggregate(&analyses).overall_score, 72.67);
}

#[test]
fn test_aggregate_keeps_page_then_detection_order() {
    let first = SeoAnalyzer::analyze_single_page(&PageSignals {
        has_canonical: false,
        word_count: 10,
        ..optimized_page("https://example.com/1")
    });
    let second = SeoAnalyzer::analyze_single_page(&PageSignals {
        mobile_viewport: false,
        ..optimized_page("https://example.com/2")
    });

    let result = Aggregator::aggregate(&[first, second]);
    let order: Vec<(&str, IssueType)> = result
        .issues
        .iter()
        .map(|issue| (issue.page.as_str(), issue.issue_type))
        .collect();

    assert_eq!(
        order,
        vec![
            ("https://example.com/1", IssueType::MissingCanonical),
            ("https://example.com/1", IssueType::ThinContent),
            ("https://example.com/2", IssueType::MissingViewport),
        ]
    );
}

#[test]
fn test_empty_crawl_aggregates_to_zero() {
    let crawl = CrawlResult {
        start_url: "http://unreachable.invalid/".to_string(),
        pages: vec![],
        broken_links: vec![],
        crawl_time: 0.0,
        total_pages: 0,
        timestamp: String::new(),
    };

    let result = SeoAnalyzer::analyze_pages(&crawl);

    assert_eq!(result.overall_score, 0.0);
    assert_eq!(result.page_count, 0);
    assert!(result.issues.is_empty());
    assert_eq!(result.issue_summary.critical, 0);
}

#[tokio::test]
async fn test_unreachable_site_round_trip() {
    let crawler = Crawler::new(CrawlerConfig::default()).expect("Failed to create crawler");

    let crawl = crawler.crawl("http://127.0.0.1:1/", 2).await;
    let result = SeoAnalyzer::analyze_pages(&crawl);

    assert_eq!(crawl.broken_links.len(), 1);
    assert_eq!(result.overall_score, 0.0);
    assert!(result.issues.is_empty());
}

#[tokio::test]
async fn test_crawled_pages_are_scored() {
    let base_url = get_test_server_url().await;
    let crawler = Crawler::new(CrawlerConfig::default()).expect("Failed to create crawler");

    let good = crawler.crawl(&format!("{}/good", base_url), 0).await;
    let analysis = SeoAnalyzer::analyze_single_page(&good.pages[0]);
    assert_eq!(analysis.score, 100, "Unexpected issues: {:?}", analysis.issues);

    let bare = crawler.crawl(&format!("{}/bare", base_url), 0).await;
    let analysis = SeoAnalyzer::analyze_single_page(&bare.pages[0]);
    // Everything missing plus thin content
    assert_eq!(analysis.score, 55);
}
