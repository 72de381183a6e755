use std::path::Path;
use std::sync::Arc;

use crate::config::{binary_candidates, MavenConfig};
use crate::diagnostics::Diagnostics;
use crate::error::ScanError;
use crate::graph::compute_import_paths;
use crate::manifest::ManifestLocator;
use crate::models::{Dependency, ManifestRecord, ToolContext};
use crate::process::{command_line, CommandOutput, CommandRunner};
use crate::resolver::BinaryResolver;
use crate::tree::{TreeFormat, TreeParser};

/// Marker Maven prints when the local repository lacks a module's artifacts.
const ARTIFACT_MISSING: &str = "Could not find artifact";

/// Where to look for binaries and how to build.
#[derive(Debug, Clone)]
pub struct MavenOptions {
    pub java_candidates: Vec<String>,
    pub maven_candidates: Vec<String>,
    pub build_args: Vec<String>,
}

impl MavenOptions {
    /// `$JAVA_BINARY` / `$MAVEN_BINARY` first, then configured paths, then `java` / `mvn`.
    pub fn from_config(config: &MavenConfig) -> Self {
        Self {
            java_candidates: binary_candidates("JAVA_BINARY", config.java_binary.as_deref(), "java"),
            maven_candidates: binary_candidates("MAVEN_BINARY", config.binary.as_deref(), "mvn"),
            build_args: config.build_args.clone(),
        }
    }
}

/// Resolved binaries. Java is optional: Maven finds its own JVM.
#[derive(Debug, Clone)]
pub struct MavenTools {
    pub java: Option<ToolContext>,
    pub maven: ToolContext,
}

/// [`BuildAdapter`](super::BuildAdapter) for Apache Maven (`pom.xml`) builds.
pub struct MavenAdapter {
    runner: Arc<dyn CommandRunner>,
    diagnostics: Arc<dyn Diagnostics>,
    options: MavenOptions,
    parser: TreeParser,
    manifests: ManifestLocator,
    tools: Option<MavenTools>,
}

impl MavenAdapter {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        diagnostics: Arc<dyn Diagnostics>,
        options: MavenOptions,
    ) -> Result<Self, ScanError> {
        Ok(Self {
            parser: TreeParser::new(TreeFormat::maven()?),
            manifests: ManifestLocator::pom(diagnostics.clone()),
            runner,
            diagnostics,
            options,
            tools: None,
        })
    }

    pub fn tools(&self) -> Option<&MavenTools> {
        self.tools.as_ref()
    }

    fn mvn(&self) -> Result<&str, ScanError> {
        self.tools
            .as_ref()
            .map(|t| t.maven.command.as_str())
            .ok_or_else(|| ScanError::NotInitialized {
                tool: "Maven".to_string(),
            })
    }

    /// Run Maven in `dir`; a non-zero exit becomes [`ScanError::CommandFailed`].
    fn run_checked(&self, dir: &Path, args: &[&str]) -> Result<CommandOutput, ScanError> {
        let mvn = self.mvn()?;
        let line = command_line(mvn, args);
        self.diagnostics
            .debug(&format!("Running `{}` in dir `{}`...", line, dir.display()));

        let output = self.runner.run(Some(dir), mvn, args)?;
        if !output.success() {
            self.diagnostics
                .debug(&format!("Running `{}` failed: {}", line, output.stderr.trim()));
            return Err(ScanError::CommandFailed {
                command: line,
                dir: dir.to_path_buf(),
                status: output.status,
                stderr: output.stderr,
            });
        }

        self.diagnostics.debug(&format!("Done running `{}`", line));
        Ok(output)
    }
}

impl super::BuildAdapter for MavenAdapter {
    fn name(&self) -> &'static str {
        "mvn"
    }

    fn initialize(&mut self) -> Result<(), ScanError> {
        self.diagnostics.debug("Initializing Maven adapter...");
        let resolver = BinaryResolver::new(self.runner.clone(), self.diagnostics.clone());

        let java = match resolver.which("Java", &["-version"], &self.options.java_candidates) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                self.diagnostics.warn(&format!(
                    "Could not find Java binary (try setting $JAVA_BINARY): {}",
                    e
                ));
                None
            }
        };
        let maven = resolver.which("Maven", &["--version"], &self.options.maven_candidates)?;

        self.tools = Some(MavenTools { java, maven });
        self.diagnostics.debug("Done initializing Maven adapter.");
        Ok(())
    }

    fn build(&self, module_dir: &Path, force_clean: bool) -> Result<(), ScanError> {
        if force_clean {
            self.run_checked(module_dir, &["clean"])?;
        }

        let args: Vec<&str> = self.options.build_args.iter().map(String::as_str).collect();
        self.run_checked(module_dir, &args)?;
        Ok(())
    }

    fn analyze(&self, module_dir: &Path) -> Result<Vec<Dependency>, ScanError> {
        let output = self.run_checked(module_dir, &["dependency:tree", "-B"])?;
        let edges = self.parser.parse(&output.stdout)?;
        let deps = compute_import_paths(&edges);

        self.diagnostics.debug(&format!(
            "Found {} dependencies ({} edges) in {}",
            deps.len(),
            edges.len(),
            module_dir.display()
        ));
        Ok(deps)
    }

    fn is_built(&self, module_dir: &Path) -> Result<bool, ScanError> {
        let mvn = self.mvn()?;
        let args = ["dependency:list", "-B"];
        let output = self.runner.run(Some(module_dir), mvn, &args)?;

        if !output.success() {
            if output.stdout.contains(ARTIFACT_MISSING) {
                return Ok(false);
            }
            return Err(ScanError::CommandFailed {
                command: command_line(mvn, &args),
                dir: module_dir.to_path_buf(),
                status: output.status,
                stderr: output.stderr,
            });
        }

        Ok(!output.stdout.trim().is_empty())
    }

    fn is_module(&self, target: &Path) -> Result<bool, ScanError> {
        let manifest = self.manifests.file_name();
        if target.file_name().is_some_and(|n| n == manifest) {
            return Ok(target.is_file());
        }
        Ok(target.join(manifest).is_file())
    }

    fn discover_modules(&self, root: &Path) -> Result<Vec<ManifestRecord>, ScanError> {
        self.manifests.discover(root)
    }
}
