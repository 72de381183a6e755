//! `depscan`: discover a Maven project's resolved dependency graph.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`diagnostics`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Resolve `java` / `mvn` ([`adapter::BuildAdapter::initialize`]).
//! 4. Discover modules ([`manifest`]), falling back to the nearest ancestor `pom.xml`.
//! 5. Build modules that do not resolve yet (or all, with `--build`).
//! 6. Parse `mvn dependency:tree` ([`tree`]) and merge import paths ([`graph`]).
//! 7. Render the requested report ([`report`]).

mod adapter;
mod cli;
mod config;
mod diagnostics;
mod error;
mod graph;
mod manifest;
mod models;
mod process;
mod report;
mod resolver;
mod tree;

#[cfg(test)]
mod testing;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use adapter::maven::{MavenAdapter, MavenOptions};
use adapter::BuildAdapter;
use cli::{Cli, ReportFormat};
use config::load_config;
use diagnostics::{init_logging, TracingDiagnostics};
use manifest::find_ancestor;
use models::ManifestRecord;
use process::SystemRunner;
use report::ModuleReport;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let path = cli
        .path
        .canonicalize()
        .with_context(|| format!("project path {} does not exist", cli.path.display()))?;

    let config = load_config(&path, cli.config.as_deref())?;

    let runner = Arc::new(SystemRunner::new(config.commands.timeout())?);
    let mut adapter = MavenAdapter::new(
        runner,
        Arc::new(TracingDiagnostics),
        MavenOptions::from_config(&config.maven),
    )?;
    adapter.initialize()?;
    if let Some(tools) = adapter.tools() {
        tracing::debug!("Using {} ({})", tools.maven.command, tools.maven.version);
        if let Some(java) = &tools.java {
            tracing::debug!("Using {} ({})", java.command, java.version);
        }
    }

    let (root, modules) = locate_modules(&adapter, &path)?;
    if modules.is_empty() {
        bail!("no pom.xml found in or above {}", path.display());
    }

    let mut reports = Vec::with_capacity(modules.len());
    for module in modules {
        let dir = module_dir(&root, &module);
        let progress = (!cli.quiet).then(|| spinner(&module.name));

        let dependencies = analyze_module(&adapter, &dir, &cli)
            .with_context(|| format!("analyzing module {} ({})", module.name, dir.display()));
        if let Some(progress) = progress {
            progress.finish_and_clear();
        }

        reports.push(ModuleReport {
            module,
            dependencies: dependencies?,
        });
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&reports, &root, cli.verbose, cli.quiet),
        ReportFormat::Json => println!("{}", report::json::render(&reports)?),
    }

    Ok(())
}

/// Modules under `path`; when there are none, the module owning `path` itself.
fn locate_modules(adapter: &MavenAdapter, path: &Path) -> Result<(PathBuf, Vec<ManifestRecord>)> {
    let modules = adapter.discover_modules(path)?;
    if !modules.is_empty() {
        return Ok((path.to_path_buf(), modules));
    }

    match find_ancestor(|dir| adapter.is_module(dir), path)? {
        Some(ancestor) => {
            tracing::debug!("Using enclosing module at {}", ancestor.display());
            let modules = adapter.discover_modules(&ancestor)?;
            Ok((ancestor, modules))
        }
        None => Ok((path.to_path_buf(), Vec::new())),
    }
}

fn module_dir(root: &Path, module: &ManifestRecord) -> PathBuf {
    root.join(&module.path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf())
}

fn analyze_module(
    adapter: &MavenAdapter,
    dir: &Path,
    cli: &Cli,
) -> Result<Vec<models::Dependency>> {
    let needs_build = cli.build || cli.force_clean || !adapter.is_built(dir)?;
    if needs_build {
        tracing::info!("Building {}", dir.display());
        adapter.build(dir, cli.force_clean)?;
    }
    Ok(adapter.analyze(dir)?)
}

fn spinner(name: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Analyzing {}", name));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_dir() {
        let root = Path::new("/work");
        let record = |path: &str| ManifestRecord {
            name: "m".to_string(),
            path: path.to_string(),
            kind: "mvn".to_string(),
        };
        assert_eq!(module_dir(root, &record("pom.xml")), PathBuf::from("/work"));
        assert_eq!(
            module_dir(root, &record("core/api/pom.xml")),
            PathBuf::from("/work/core/api")
        );
    }
}
