use std::path::Path;

use crate::models::Position;

pub mod composer_json;
pub mod package_json;
pub mod pom_xml;
pub mod pyproject_toml;

/// Heuristic locator of a dependency declaration's line/column inside a
/// manifest file. These are text scans, not format parsers, by design:
/// the first structural match in file order wins, and any read failure
/// (including a missing file) is reported as not-found.
pub trait PositionDeducer {
    fn find_position(&self, manifest_path: &Path, dependency_name: &str) -> Option<Position>;
}
