//! Renderers for discovered dependency graphs.
//!
//! - [`terminal`]: colored table per module with a summary line; respects `--verbose` / `--quiet`.
//! - [`json`]: machine-readable module/dependency listing.

use serde::Serialize;

use crate::models::{Dependency, ManifestRecord};

pub mod json;
pub mod terminal;

/// Analysis result of one discovered module.
#[derive(Debug, Serialize)]
pub struct ModuleReport {
    pub module: ManifestRecord,
    pub dependencies: Vec<Dependency>,
}
