use std::path::Path;

use crate::error::ScanError;
use crate::models::{Dependency, ManifestRecord};

pub mod maven;

/// Capabilities every build-tool integration provides.
///
/// Parsing and aggregation primitives ([`crate::tree`], [`crate::graph`]) are
/// shared; each variant only supplies tool invocation and its tree format.
pub trait BuildAdapter {
    /// Short tool label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Resolve the tool binaries. Fails only when a required binary is missing.
    fn initialize(&mut self) -> Result<(), ScanError>;

    /// Build the module, purging the tool's build output first when `force_clean`.
    fn build(&self, module_dir: &Path, force_clean: bool) -> Result<(), ScanError>;

    /// Resolved dependency set of the module, with import paths.
    fn analyze(&self, module_dir: &Path) -> Result<Vec<Dependency>, ScanError>;

    /// `Ok(false)` when the tool reports unresolved artifacts, i.e. a build is needed.
    fn is_built(&self, module_dir: &Path) -> Result<bool, ScanError>;

    /// Does `target` denote a module of this tool?
    fn is_module(&self, target: &Path) -> Result<bool, ScanError>;

    fn discover_modules(&self, root: &Path) -> Result<Vec<ManifestRecord>, ScanError>;
}
