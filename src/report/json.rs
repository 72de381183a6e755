use anyhow::Result;

use super::ModuleReport;

/// Render reports as pretty-printed JSON. `via` is always an explicit array.
pub fn render(reports: &[ModuleReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
