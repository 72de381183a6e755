use std::fmt;

use serde::{Deserialize, Serialize};

/// Fetcher tag reserved for the synthetic analysis root.
pub const ROOT_FETCHER: &str = "root";

/// Structural identity of a dependency: origin system, package, revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Locator {
    pub fetcher: String,
    pub package: String,
    pub revision: String,
}

impl Locator {
    pub fn new(
        fetcher: impl Into<String>,
        package: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            fetcher: fetcher.into(),
            package: package.into(),
            revision: revision.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.fetcher == ROOT_FETCHER
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}${}", self.fetcher, self.package, self.revision)
    }
}

/// Ordered chain of locators from the synthetic root down to a dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPath(pub Vec<Locator>);

impl ImportPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of ancestors on the path.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, locator: Locator) {
        self.0.push(locator);
    }

    pub fn truncate(&mut self, depth: usize) {
        self.0.truncate(depth);
    }

    pub fn locators(&self) -> &[Locator] {
        &self.0
    }
}

impl fmt::Display for ImportPath {
    /// Root sentinels are skipped, so a path holding only the root renders as `""`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for locator in self.locators().iter().filter(|l| !l.is_root()) {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", locator)?;
            first = false;
        }
        Ok(())
    }
}

/// One observation made while walking a raw tree: `locator` was reached via `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    pub locator: Locator,
    pub from: ImportPath,
}

/// A deduplicated dependency and every distinct path it was reached through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(flatten)]
    pub locator: Locator,
    /// Always serialized, `[]` for dependencies reached straight from the root.
    #[serde(default)]
    pub via: Vec<String>,
}

impl Dependency {
    /// Reached directly from the root, i.e. no intermediate path was recorded.
    pub fn is_direct(&self) -> bool {
        self.via.is_empty()
    }
}

/// A discovered build manifest, as handed to the outer module system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub name: String,
    /// Manifest path relative to the search root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A resolved external binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolContext {
    pub command: String,
    pub version: String,
}
