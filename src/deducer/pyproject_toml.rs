use std::path::Path;

use crate::models::Position;

/// Finds dependency positions within a `pyproject.toml` file.
///
/// The scan has no sub-line precision: a trimmed line starting with the
/// dependency name, bare or quoted, is a match at column 1. A name that is
/// a prefix of another can therefore match the wrong line first; that
/// imprecision is inherited heuristic behavior and intentionally left as-is.
pub struct PyprojectTomlDeducer;

impl super::PositionDeducer for PyprojectTomlDeducer {
    fn find_position(&self, manifest_path: &Path, dependency_name: &str) -> Option<Position> {
        let content = std::fs::read_to_string(manifest_path).ok()?;
        locate(&content, dependency_name)
    }
}

fn locate(content: &str, dependency_name: &str) -> Option<Position> {
    let quoted = format!("\"{dependency_name}\"");

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with(dependency_name) || trimmed.starts_with(&quoted) {
            return Some(Position {
                line: idx + 1,
                column: 1,
            });
        }
    }
    None
}
