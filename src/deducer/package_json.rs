use std::path::Path;

use regex::Regex;

use crate::models::Position;

/// Finds dependency positions within a `package.json` file.
pub struct PackageJsonDeducer;

impl super::PositionDeducer for PackageJsonDeducer {
    fn find_position(&self, manifest_path: &Path, dependency_name: &str) -> Option<Position> {
        let content = std::fs::read_to_string(manifest_path).ok()?;
        locate(&content, dependency_name)
    }
}

fn locate(content: &str, dependency_name: &str) -> Option<Position> {
    // Keys look like: "package-name": "version"
    let pattern = Regex::new(&format!(
        r#"^\s*"{}"\s*:"#,
        regex::escape(dependency_name)
    ))
    .ok()?;
    let needle = format!("\"{dependency_name}\"");

    for (idx, line) in content.lines().enumerate() {
        if pattern.is_match(line) {
            return Some(Position {
                line: idx + 1,
                column: line.find(&needle)? + 1,
            });
        }
    }
    None
}
