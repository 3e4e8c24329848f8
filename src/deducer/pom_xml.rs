use std::path::Path;

use crate::models::Position;

/// Finds dependency positions within a `pom.xml` file.
///
/// The dependency name is a compound `groupId:artifactId`. The scan walks
/// `<dependency>` blocks line by line and reports the opening tag of the
/// first block containing both matching `<groupId>` and `<artifactId>`
/// lines.
pub struct PomXmlDeducer;

impl super::PositionDeducer for PomXmlDeducer {
    fn find_position(&self, manifest_path: &Path, dependency_name: &str) -> Option<Position> {
        let content = std::fs::read_to_string(manifest_path).ok()?;
        locate(&content, dependency_name)
    }
}

fn locate(content: &str, dependency_name: &str) -> Option<Position> {
    let (group_id, artifact_id) = dependency_name.split_once(':')?;
    let group_tag = format!("<groupId>{group_id}</groupId>");
    let artifact_tag = format!("<artifactId>{artifact_id}</artifactId>");

    let lines: Vec<&str> = content.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        let Some(col) = line.find("<dependency>") else {
            continue;
        };

        let block = lines[idx..]
            .iter()
            .take_while(|l| !l.contains("</dependency>"));
        let mut has_group = false;
        let mut has_artifact = false;
        for block_line in block {
            has_group = has_group || block_line.contains(&group_tag);
            has_artifact = has_artifact || block_line.contains(&artifact_tag);
        }

        if has_group && has_artifact {
            return Some(Position {
                line: idx + 1,
                column: col + 1,
            });
        }
    }
    None
}
