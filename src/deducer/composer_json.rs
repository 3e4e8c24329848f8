use std::path::Path;

use crate::models::Position;

/// Finds dependency positions within a `composer.json` file.
pub struct ComposerJsonDeducer;

impl super::PositionDeducer for ComposerJsonDeducer {
    fn find_position(&self, manifest_path: &Path, dependency_name: &str) -> Option<Position> {
        let content = std::fs::read_to_string(manifest_path).ok()?;
        locate(&content, dependency_name)
    }
}

fn locate(content: &str, dependency_name: &str) -> Option<Position> {
    let needle = format!("\"{dependency_name}\"");

    for (idx, line) in content.lines().enumerate() {
        if let Some(col) = line.find(&needle) {
            // Only a quoted key counts, at any indentation.
            let rest = line[col + needle.len()..].trim_start();
            if rest.starts_with(':') {
                return Some(Position {
                    line: idx + 1,
                    column: col + 1,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::super::PositionDeducer;
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"{
    "name": "acme/app",
    "require": {
        "php": ">=8.1",
        "monolog/monolog": "^3.0"
    }
}"#;

    #[test]
    fn test_finds_required_package() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", MANIFEST).unwrap();
        let position = ComposerJsonDeducer.find_position(f.path(), "monolog/monolog");
        assert_eq!(position, Some(Position { line: 5, column: 9 }));
    }

    #[test]
    fn test_quoted_value_is_not_a_key() {
        // "php" appears as a value substring nowhere followed by a colon
        assert_eq!(locate("{\"require\": {\"ext-json\": \"*\"}}\n", "json"), None);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let position =
            ComposerJsonDeducer.find_position(Path::new("/non/existent/composer.json"), "monolog/monolog");
        assert_eq!(position, None);
    }
}
