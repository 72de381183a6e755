use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::ModuleReport;
use crate::models::Dependency;

/// Render a colored terminal report.
pub fn render(reports: &[ModuleReport], path: &Path, verbose: bool, quiet: bool) {
    let total: usize = reports.iter().map(|r| r.dependencies.len()).sum();
    let direct: usize = reports
        .iter()
        .flat_map(|r| &r.dependencies)
        .filter(|d| d.is_direct())
        .count();

    if quiet {
        println!(
            "Modules: {}  Dependencies: {}  Direct: {}  Transitive: {}",
            reports.len(),
            total.to_string().bold(),
            direct.to_string().green(),
            (total - direct).to_string().yellow(),
        );
        return;
    }

    println!("\n {} v{}", "depscan".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Scanning: {}\n", path.display());

    for report in reports {
        println!(
            " {} {} ({})\n",
            "[MODULE]".cyan().bold(),
            report.module.name.bold(),
            report.module.path
        );
        if report.dependencies.is_empty() {
            println!("   no dependencies reported\n");
            continue;
        }
        println!("{}\n", build_table(&report.dependencies, verbose));
    }

    println!(
        " {} {} dependencies across {} module(s): {} direct, {} transitive\n",
        "✓".green(),
        total,
        reports.len(),
        direct,
        total - direct
    );
}

fn build_table(deps: &[Dependency], verbose: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Revision").add_attribute(Attribute::Bold),
            Cell::new("Scope").add_attribute(Attribute::Bold),
            Cell::new("Paths").add_attribute(Attribute::Bold),
        ]);

    for dep in deps {
        let (scope, color) = if dep.is_direct() {
            ("direct", Color::Green)
        } else {
            ("transitive", Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(&dep.locator.package),
            Cell::new(&dep.locator.revision),
            Cell::new(scope).fg(color),
            Cell::new(via_summary(dep, verbose)).set_alignment(CellAlignment::Left),
        ]);
    }

    table
}

/// All paths when verbose, otherwise the first path plus a count of the rest.
fn via_summary(dep: &Dependency, verbose: bool) -> String {
    match dep.via.as_slice() {
        [] => "-".to_string(),
        all if verbose => all.join("\n"),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{} (+{} more)", first, rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locator;

    fn dep(via: &[&str]) -> Dependency {
        Dependency {
            locator: Locator::new("mvn", "g:a", "1"),
            via: via.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_via_summary() {
        assert_eq!(via_summary(&dep(&[]), false), "-");
        assert_eq!(via_summary(&dep(&["p1"]), false), "p1");
        assert_eq!(via_summary(&dep(&["p1", "p2", "p3"]), false), "p1 (+2 more)");
        assert_eq!(via_summary(&dep(&["p1", "p2"]), true), "p1\np2");
    }

    #[test]
    fn test_table_has_row_per_dependency() {
        let table = build_table(&[dep(&[]), dep(&["p1"])], false);
        assert_eq!(table.row_iter().count(), 2);
    }
}
