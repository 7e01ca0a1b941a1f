use anyhow::Result;
use clap::Parser;
use colored::*;
use seo_auditor::cli::Cli;
use seo_auditor::config::Config;
use seo_auditor::execute;
use tracing_subscriber::EnvFilter;

fn exit_with_error(e: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".bright_red().bold(), e);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    // The config file may set `verbose`, so it is merged before logging starts
    let args = Config::apply(Cli::parse()).unwrap_or_else(|e| exit_with_error(e));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(args).await {
        exit_with_error(e);
    }

    Ok(())
}
