//! Parsing of indented dependency-tree dumps into import edges.
//!
//! The tool-specific constants (section markers, line shape, indentation
//! width, coordinate layout) live in [`TreeFormat`]; the walk itself only
//! relies on the indentation-depth encoding.

use regex::Regex;

use crate::error::ScanError;
use crate::models::{ImportEdge, ImportPath, Locator};

/// Shape of one tool's tree output.
pub struct TreeFormat {
    /// A line matching this opens a section.
    section_start: Regex,
    /// Lines equal to any of these, ignoring trailing whitespace, close a section.
    section_end: Vec<&'static str>,
    /// Captures (indentation prefix, coordinate) from an in-section line.
    line: Regex,
    /// Captures the coordinate fields.
    coordinate: Regex,
    /// Characters of indentation per tree level.
    indent_width: usize,
    /// Builds a locator from the coordinate captures.
    to_locator: fn(&regex::Captures<'_>) -> Locator,
}

impl TreeFormat {
    /// Output of `mvn dependency:tree`, e.g.
    ///
    /// ```text
    /// [INFO] --- maven-dependency-plugin:2.8:tree (default-cli) @ app ---
    /// [INFO] com.example:app:jar:1.0
    /// [INFO] +- junit:junit:jar:4.12:test
    /// [INFO] |  \- org.hamcrest:hamcrest-core:jar:1.3:test
    /// [INFO] ------------------------------------------------------------------------
    /// ```
    pub fn maven() -> Result<Self, regex::Error> {
        Ok(Self {
            section_start: Regex::new(r"^\[INFO\] --- .*? ---$")?,
            section_end: vec![
                "[INFO] ",
                "[INFO] ------------------------------------------------------------------------",
            ],
            line: Regex::new(r"^\[INFO\] ([ `+\\|-]*)([^ `+\\|-].+)$")?,
            coordinate: Regex::new(r"([^:]+):([^:]+):([^:]*):([^:]+)")?,
            indent_width: 3,
            to_locator: |caps| {
                Locator::new("mvn", format!("{}:{}", &caps[1], &caps[2]), &caps[4])
            },
        })
    }
}

/// Turns raw tree text into ordered [`ImportEdge`]s.
pub struct TreeParser {
    format: TreeFormat,
}

impl TreeParser {
    pub fn new(format: TreeFormat) -> Self {
        Self { format }
    }

    /// Lines that belong to a tree section, in order.
    pub fn section_lines<'a>(&self, output: &'a str) -> Result<Vec<&'a str>, ScanError> {
        let mut lines = Vec::new();
        let mut in_section = false;

        for line in output.lines() {
            if self.format.section_start.is_match(line) {
                if in_section {
                    return Err(ScanError::ParseInconsistency {
                        line: line.to_string(),
                        reason: "section started before the previous one ended".to_string(),
                    });
                }
                in_section = true;
                continue;
            }
            if self
                .format
                .section_end
                .iter()
                .any(|end| end.trim_end() == line.trim_end())
            {
                in_section = false;
                continue;
            }
            if in_section {
                lines.push(line);
            }
        }

        Ok(lines)
    }

    /// Walk every section line, rebuilding each node's ancestor chain from its depth.
    ///
    /// A node at depth `d` is a child of the most recent node at depth `d - 1`,
    /// so the ancestor stack is cut back to `d` entries before each push.
    pub fn parse(&self, output: &str) -> Result<Vec<ImportEdge>, ScanError> {
        let width = self.format.indent_width;
        let mut stack = ImportPath::new();
        let mut edges = Vec::new();

        for line in self.section_lines(output)? {
            let caps = self
                .format
                .line
                .captures(line)
                .ok_or_else(|| ScanError::ParseInconsistency {
                    line: line.to_string(),
                    reason: "not a dependency tree line".to_string(),
                })?;

            let indent = caps[1].chars().count();
            if indent % width != 0 {
                return Err(ScanError::ParseInconsistency {
                    line: line.to_string(),
                    reason: format!(
                        "indentation of {} is not a multiple of {}",
                        indent, width
                    ),
                });
            }
            let depth = indent / width;
            if depth > stack.depth() {
                return Err(ScanError::ParseInconsistency {
                    line: line.to_string(),
                    reason: format!("depth {} skips a level below {}", depth, stack.depth()),
                });
            }

            let coordinate = &caps[2];
            let fields = self.format.coordinate.captures(coordinate).ok_or_else(|| {
                ScanError::ParseInconsistency {
                    line: line.to_string(),
                    reason: format!("`{}` is not a group:artifact:type:version coordinate", coordinate),
                }
            })?;
            let locator = (self.format.to_locator)(&fields);

            stack.truncate(depth);
            edges.push(ImportEdge {
                locator: locator.clone(),
                from: stack.clone(),
            });
            stack.push(locator);
        }

        Ok(edges)
    }
}
