//! Build manifest discovery.
//!
//! Two modes: an upward ancestor search for the directory that owns a
//! manifest, and a downward glob for every nested manifest when the search
//! root has none of its own.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::diagnostics::Diagnostics;
use crate::error::ScanError;
use crate::models::ManifestRecord;

/// Walk from `start` towards the filesystem root and return the first
/// directory for which `stop_when` holds.
///
/// The filesystem root itself is never tested; reaching it yields `Ok(None)`.
pub fn find_ancestor<F>(stop_when: F, start: &Path) -> Result<Option<PathBuf>, ScanError>
where
    F: Fn(&Path) -> Result<bool, ScanError>,
{
    let mut dir = std::path::absolute(start).map_err(|source| ScanError::Io {
        path: start.to_path_buf(),
        source,
    })?;

    loop {
        let Some(parent) = dir.parent() else {
            return Ok(None);
        };
        if stop_when(&dir)? {
            return Ok(Some(dir));
        }
        dir = parent.to_path_buf();
    }
}

/// The fields of a POM that can name a module. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "project")]
struct PomFile {
    #[serde(rename = "name")]
    name: Option<String>,
    #[serde(rename = "artifactId")]
    artifact_id: Option<String>,
    #[serde(rename = "groupId")]
    group_id: Option<String>,
    #[serde(rename = "version")]
    version: Option<String>,
}

impl PomFile {
    /// `<name>` first, then `<artifactId>`.
    fn display_name(&self) -> Option<&str> {
        [self.name.as_deref(), self.artifact_id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

fn parse_pom(path: &Path) -> Result<PomFile, ScanError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    quick_xml::de::from_str(&content).map_err(|source| ScanError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Finds manifests named `file_name` and labels them with `kind`.
pub struct ManifestLocator {
    file_name: &'static str,
    kind: &'static str,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ManifestLocator {
    pub fn new(file_name: &'static str, kind: &'static str, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            file_name,
            kind,
            diagnostics,
        }
    }

    /// Maven POM locator.
    pub fn pom(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self::new("pom.xml", "mvn", diagnostics)
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// A manifest at `root` wins outright; only without one are nested
    /// manifests enumerated, at any depth. Unreadable directories are logged
    /// and skipped.
    pub fn discover(&self, root: &Path) -> Result<Vec<ManifestRecord>, ScanError> {
        let root_manifest = root.join(self.file_name);
        if root_manifest.is_file() {
            return Ok(vec![ManifestRecord {
                name: self.module_name(&root_manifest),
                path: self.file_name.to_string(),
                kind: self.kind.to_string(),
            }]);
        }

        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            self.file_name
        );
        let paths = glob::glob(&pattern).map_err(|e| ScanError::ManifestSearch {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        let mut records = Vec::new();
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    self.diagnostics.debug(&format!("Skipping {}: {}", e.path().display(), e));
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(&path);
            records.push(ManifestRecord {
                name: self.module_name(&path),
                path: relative.to_string_lossy().into_owned(),
                kind: self.kind.to_string(),
            });
        }

        self.diagnostics.debug(&format!(
            "Found {} nested {} file(s) under {}",
            records.len(),
            self.file_name,
            root.display()
        ));
        Ok(records)
    }

    /// Name taken from the manifest itself, else its directory's name.
    /// Parse failures only affect naming and are never propagated.
    fn module_name(&self, manifest: &Path) -> String {
        let fallback = manifest
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match parse_pom(manifest) {
            Ok(pom) => {
                self.diagnostics.debug(&format!(
                    "Parsed {} ({:?}:{:?}:{:?})",
                    manifest.display(),
                    pom.group_id,
                    pom.artifact_id,
                    pom.version
                ));
                pom.display_name().map(str::to_string).unwrap_or(fallback)
            }
            Err(e) => {
                self.diagnostics
                    .debug(&format!("Error parsing {}: {}", manifest.display(), e));
                fallback
            }
        }
    }
}
