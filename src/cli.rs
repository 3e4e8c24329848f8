use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "depfindr",
    about = "Find unused and undeclared dependencies across ecosystems",
    version
)]
pub struct Cli {
    /// Project path to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Report format
    #[arg(long, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Config file [default: ./.depfindr.toml, fallback <config dir>/depfindr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip an ecosystem even when its manifest is present (repeatable)
    #[arg(long = "exclude-lang", value_name = "LANG")]
    pub exclude_lang: Vec<EcosystemArg>,

    /// Echo raw tool output to stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Include per-tool troubleshooting text in terminal output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Terminal,
    Json,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcosystemArg {
    Node,
    Php,
    Python,
    Java,
}

impl EcosystemArg {
    /// The manifest file whose checker this exclusion disables.
    pub fn manifest_file(&self) -> &'static str {
        match self {
            EcosystemArg::Node => "package.json",
            EcosystemArg::Php => "composer.json",
            EcosystemArg::Python => "pyproject.toml",
            EcosystemArg::Java => "pom.xml",
        }
    }
}
