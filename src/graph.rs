use std::collections::{BTreeSet, HashMap};

use crate::models::{Dependency, ImportEdge, Locator};

/// Merge edges by locator, collecting every distinct path each one was reached through.
///
/// Root-tagged locators are dropped, and an empty path (reached straight from the
/// root) contributes nothing to `via` while still emitting the dependency.
/// Output is sorted by locator so reports are stable.
pub fn compute_import_paths(edges: &[ImportEdge]) -> Vec<Dependency> {
    let mut paths: HashMap<&Locator, BTreeSet<String>> = HashMap::new();

    for edge in edges.iter().filter(|e| !e.locator.is_root()) {
        paths
            .entry(&edge.locator)
            .or_default()
            .insert(edge.from.to_string());
    }

    let mut deps: Vec<Dependency> = paths
        .into_iter()
        .map(|(locator, via)| Dependency {
            locator: locator.clone(),
            via: via.into_iter().filter(|p| !p.is_empty()).collect(),
        })
        .collect();

    deps.sort_by(|a, b| a.locator.cmp(&b.locator));
    deps
}
