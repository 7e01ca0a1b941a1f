use clap::Parser;

pub const DEFAULT_DEPTH: usize = 2;
pub const DEFAULT_MAX_PAGES: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_OUTPUT: &str = "text";

#[derive(Parser, Debug, Clone)]
#[command(name = "seo-auditor")]
#[command(about = "Audit websites for technical SEO issues", long_about = None)]
pub struct Cli {
    /// One or more URLs to audit (http:// is assumed when no scheme is given)
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Crawl depth, 0 audits only the start page (default: 2)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Maximum number of pages to crawl per audit (default: 10)
    #[arg(short, long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Per-request timeout in seconds (default: 5)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Follow links to other hosts (default: true)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub external: bool,

    /// Mark auto-fixable recommendations as fixed
    #[arg(long)]
    pub auto_fix: bool,

    /// Score each URL as a single page, without crawling
    #[arg(short, long)]
    pub quick: bool,

    /// Output format: text or json
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Save report to file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Keep at most this many audit reports in memory
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

impl Cli {
    /// Log level used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }
}
