//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_resolver` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading URLs from arguments or stdin
//! - Writing resolved URLs to stdout
//!
//! All core functionality is implemented in the library crate.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use link_resolver::config::Opt;
use link_resolver::initialization::init_logger_with;
use link_resolver::{read_urls, run_resolve, OutputFormat, ResolveReport};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = match opt.resolver_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("link_resolver error: {}", e);
            process::exit(2);
        }
    };

    let urls = if opt.urls.is_empty() {
        read_urls(io::stdin().lock())?
    } else {
        opt.urls.clone()
    };

    match run_resolve(config, urls, opt.concurrency).await {
        Ok(report) => {
            write_report(&report, &opt.output).context("Failed to write results")?;
            log::info!("Finished in {:.1}s", report.elapsed_seconds);
            Ok(())
        }
        Err(e) => {
            eprintln!("link_resolver error: {:#}", e);
            process::exit(1);
        }
    }
}

fn write_report(report: &ResolveReport, format: &OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for resolution in &report.resolutions {
        match format {
            OutputFormat::Plain => writeln!(out, "{}", resolution.final_url)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(resolution)?)?,
        }
    }
    out.flush()?;
    Ok(())
}
