use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "depscan",
    about = "Discover Maven dependency graphs with full import-path provenance",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.depscan/config.toml, fallback ~/.config/depscan/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Build every module before analysis, even if it already resolves
    #[arg(long)]
    pub build: bool,

    /// Run `mvn clean` before building
    #[arg(long)]
    pub force_clean: bool,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show every import path and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
