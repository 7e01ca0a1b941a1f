use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, DEFAULT_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT, DEFAULT_TIMEOUT_SECS};

const APP_NAME: &str = "seo-auditor";

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Crawl depth
    pub depth: Option<usize>,

    /// Maximum number of pages to crawl per audit
    pub max_pages: Option<usize>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Follow links to other hosts
    pub external: Option<bool>,

    /// Mark auto-fixable recommendations as fixed
    pub auto_fix: Option<bool>,

    /// Output format: text or json
    pub output: Option<String>,

    /// Save report to file
    pub save: Option<String>,

    /// Keep at most this many audit reports in memory
    pub max_history: Option<usize>,

    /// Verbose output
    pub verbose: Option<bool>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Default configuration file paths, highest priority first:
    /// current directory, then the user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let formats = [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml];
        let mut paths = Vec::new();

        for format in &formats {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("{}.{}", APP_NAME, ext)));
            }
        }

        // XDG_CONFIG_HOME if set and non-empty, otherwise ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let app_dir = config_home.join(APP_NAME);
            for format in &formats {
                for ext in format.extensions() {
                    paths.push(app_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Loads the file named by `--config`, or the first default path found
    pub fn resolve(cli: &Cli) -> Result<Option<Self>> {
        match &cli.config {
            Some(path) => Self::from_file(Path::new(path)).map(Some),
            None => Self::from_default_paths(),
        }
    }

    /// Resolves the configuration file for `cli` and merges it in. Returns
    /// the arguments unchanged when no file is found.
    pub fn apply(cli: Cli) -> Result<Cli> {
        Ok(match Self::resolve(&cli)? {
            Some(config) => config.merge_with_cli(&cli),
            None => cli,
        })
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments that differ from their defaults take precedence
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            urls: cli.urls.clone(),
            depth: if cli.depth != DEFAULT_DEPTH {
                cli.depth
            } else {
                self.depth.unwrap_or(cli.depth)
            },
            max_pages: if cli.max_pages != DEFAULT_MAX_PAGES {
                cli.max_pages
            } else {
                self.max_pages.unwrap_or(cli.max_pages)
            },
            timeout: if cli.timeout != DEFAULT_TIMEOUT_SECS {
                cli.timeout
            } else {
                self.timeout.unwrap_or(cli.timeout)
            },
            external: if !cli.external {
                cli.external
            } else {
                self.external.unwrap_or(cli.external)
            },
            auto_fix: cli.auto_fix || self.auto_fix.unwrap_or(false),
            quick: cli.quick,
            output: if cli.output != DEFAULT_OUTPUT {
                cli.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| cli.output.clone())
            },
            save: cli.save.clone().or_else(|| self.save.clone()),
            max_history: cli.max_history.or(self.max_history),
            verbose: cli.verbose || self.verbose.unwrap_or(false),
            config: cli.config.clone(),
        }
    }
}
