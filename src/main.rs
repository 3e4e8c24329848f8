//! `depfindr` — find unused and undeclared dependencies across ecosystems.
//!
//! # Flow
//! 1. Parse CLI arguments ([`depfindr::cli`]).
//! 2. Load config ([`depfindr::config::load_config`]).
//! 3. Select checkers by manifest presence ([`depfindr::detector`]), minus
//!    any excluded ecosystems.
//! 4. Run each checker in order and aggregate ([`depfindr::aggregator`]).
//! 5. Render the requested report ([`depfindr::report`]).
//! 6. Exit `0` (clean), `1` (findings present), or `2` (configuration
//!    problem: tool missing or failing, no supported project type, bad
//!    config file).

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use depfindr::aggregator::{run_checkers, Analysis};
use depfindr::cli::{Cli, ReportFormat};
use depfindr::config::load_config;
use depfindr::detector::select_checkers;
use depfindr::error::ConfigurationError;
use depfindr::report;

fn main() -> ExitCode {
    match run() {
        Ok(findings_present) => {
            if findings_present {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            if let Some(config_err) = err.downcast_ref::<ConfigurationError>() {
                if let Some(help_url) = config_err.help_url() {
                    eprintln!("{} {}", "see:".bold(), help_url.cyan());
                }
            }
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let path = cli.path.canonicalize().unwrap_or_else(|_| cli.path.clone());
    let config = load_config(&path, cli.config.as_deref())?;

    if !cli.quiet {
        eprintln!("Analyzing project at: {}", path.display());
    }

    // CLI exclusions merge with config exclusions.
    let excluded_manifests: Vec<&str> = cli
        .exclude_lang
        .iter()
        .chain(config.exclude.iter())
        .map(|lang| lang.manifest_file())
        .collect();

    let mut checkers = select_checkers(&path);
    checkers.retain(|checker| !excluded_manifests.contains(&checker.manifest_file()));

    let Analysis {
        findings,
        help_text,
    } = run_checkers(&checkers, &path, cli.debug, cli.quiet)?;

    let format = cli
        .report
        .or(config.report)
        .unwrap_or(ReportFormat::Terminal);

    match format {
        ReportFormat::Terminal => {
            report::terminal::render(&findings, &help_text, &path, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&findings)?);
        }
        ReportFormat::Summary => {
            report::summary::render(&findings, &help_text)?;
        }
    }

    Ok(!findings.is_empty())
}
