use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::deducer::pom_xml::PomXmlDeducer;
use crate::deducer::PositionDeducer;
use crate::models::{Dependency, DependencyCategory, DependencyStatus, Extra, Finding};

use super::{capture_stdout, classify_run_error, CheckOutcome, Checker, RunFn};

const INSTALL_URL: &str = "https://maven.apache.org/install.html";
const DOCS_URL: &str =
    "https://maven.apache.org/plugins/maven-dependency-plugin/analyze-mojo.html";

const UNUSED_SECTION: &str = "Unused_but_Declared_Dependencies";
const UNDECLARED_SECTION: &str = "Used_but_Undeclared_Dependencies";

const HELP_TEXT: &str = "
This report was generated using the \
**[maven-dependency-plugin](https://maven.apache.org/plugins/maven-dependency-plugin/analyze-mojo.html)** \
analyze report for Java projects.

If you believe a dependency has been incorrectly flagged:

1. Run `mvn dependency:analyze-report` locally and open \
`target/site/dependency-analysis.html` to replicate the findings.
2. Check the [dependency:analyze documentation](https://maven.apache.org/plugins/maven-dependency-plugin/analyze-mojo.html) \
for options to fine-tune the analysis.
3. If local results are also wrong, follow the \
[Maven issue management page](https://maven.apache.org/issue-management.html); \
otherwise report it on this repository's issue tracker.
";

/// Checker for Java projects, scraping the HTML report produced by
/// `mvn dependency:analyze-report`.
///
/// The report has one named section per verdict; each section holds a table
/// whose rows carry seven cells (groupId, artifactId, version, scope, type,
/// classifier, optional). Rows with fewer cells are skipped.
pub struct MavenChecker {
    deducer: PomXmlDeducer,
    run_fn: RunFn,
}

impl MavenChecker {
    pub fn new() -> Self {
        Self::with_run_fn(Box::new(default_run))
    }

    pub fn with_run_fn(run_fn: RunFn) -> Self {
        Self {
            deducer: PomXmlDeducer,
            run_fn,
        }
    }
}

impl Default for MavenChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for MavenChecker {
    fn name(&self) -> &'static str {
        "Maven Dependency Analyzer"
    }

    fn manifest_file(&self) -> &'static str {
        "pom.xml"
    }

    fn run(&self, project_root: &Path, debug: bool) -> Result<CheckOutcome> {
        let html = (self.run_fn)(project_root)
            .map_err(|err| classify_run_error(err, self.name(), INSTALL_URL, DOCS_URL))?;
        if debug {
            eprintln!("{html}");
        }

        let mut findings =
            self.parse_section(&html, UNUSED_SECTION, DependencyStatus::Unused, project_root);
        findings.extend(self.parse_section(
            &html,
            UNDECLARED_SECTION,
            DependencyStatus::Undeclared,
            project_root,
        ));

        Ok(CheckOutcome {
            findings,
            help_text: HELP_TEXT,
        })
    }
}

fn default_run(project_root: &Path) -> Result<String> {
    capture_stdout(
        "mvn",
        &["--batch-mode", "dependency:analyze-report"],
        project_root,
        &[],
    )?;
    let report_path = project_root.join("target/site/dependency-analysis.html");
    std::fs::read_to_string(&report_path)
        .with_context(|| format!("failed to read {}", report_path.display()))
}

impl MavenChecker {
    fn parse_section(
        &self,
        html: &str,
        section_id: &str,
        status: DependencyStatus,
        project_root: &Path,
    ) -> Vec<Finding> {
        let manifest_path = project_root.join(self.manifest_file());
        let mut findings = Vec::new();

        for cells in section_rows(html, section_id) {
            if cells.len() < 7 {
                continue;
            }

            let group_id = &cells[0];
            let artifact_id = &cells[1];
            let version = &cells[2];
            let scope = &cells[3];
            let optional = &cells[6];
            let name = format!("{group_id}:{artifact_id}");

            findings.push(Finding {
                status,
                category: if scope == "test" {
                    DependencyCategory::Development
                } else {
                    DependencyCategory::Runtime
                },
                dependency: Dependency {
                    name: name.clone(),
                    version: (!version.is_empty()).then(|| version.clone()),
                },
                source_file: self.manifest_file().to_string(),
                position: self.deducer.find_position(&manifest_path, &name),
                optional: Some(optional == "true"),
                extra: Some(Extra {
                    link: format!(
                        "https://search.maven.org/artifact/{group_id}/{artifact_id}"
                    ),
                    icon: "res/maven.svg".to_string(),
                }),
            });
        }

        findings
    }
}

/// Scrape the `<td>` cell texts of every row in the first table following
/// the element anchored with `section_id` (matched against both `id` and
/// `name` attributes, as the site plugin has emitted either over the years).
fn section_rows(html: &str, section_id: &str) -> Vec<Vec<String>> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;

    let mut in_section = false;
    let mut in_table = false;
    let mut in_cell = false;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut cells: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();

                if !in_section {
                    let anchored = e.attributes().flatten().any(|attr| {
                        let key = attr.key.local_name();
                        (key.as_ref() == b"id" || key.as_ref() == b"name")
                            && attr.value.as_ref() == section_id.as_bytes()
                    });
                    if anchored {
                        in_section = true;
                    }
                    continue;
                }

                match tag.as_str() {
                    "table" if !in_table => in_table = true,
                    "tr" if in_table => cells.clear(),
                    "td" if in_table => {
                        in_cell = true;
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                match tag.as_str() {
                    "td" if in_cell => {
                        in_cell = false;
                        cells.push(std::mem::take(&mut text));
                    }
                    "tr" if in_table && !cells.is_empty() => {
                        rows.push(std::mem::take(&mut cells));
                    }
                    "table" if in_table => break,
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_cell {
                    text.push_str(e.unescape().unwrap_or_default().trim());
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use std::fs;
    use tempfile::TempDir;

    const REPORT: &str = r#"<html><body>
<div class="section">
<h3><a name="Unused_but_Declared_Dependencies"></a>Unused but Declared Dependencies</h3>
<table border="0" class="bodyTable">
<tr class="a"><th>GroupId</th><th>ArtifactId</th><th>Version</th><th>Scope</th><th>Type</th><th>Classifier</th><th>Optional</th></tr>
<tr class="b"><td>org.apache.commons</td><td>commons-lang3</td><td>3.12.0</td><td>compile</td><td>jar</td><td></td><td>false</td></tr>
<tr class="a"><td>junit</td><td>junit</td><td>4.13.2</td><td>test</td><td>jar</td><td></td><td>true</td></tr>
</table>
</div>
<div class="section">
<h3><a name="Used_but_Undeclared_Dependencies"></a>Used but Undeclared Dependencies</h3>
<table border="0" class="bodyTable">
<tr class="a"><th>GroupId</th><th>ArtifactId</th><th>Version</th><th>Scope</th><th>Type</th><th>Classifier</th><th>Optional</th></tr>
<tr class="b"><td>com.google.code.gson</td><td>gson</td><td>2.8.8</td><td>compile</td><td>jar</td><td></td><td>false</td></tr>
</table>
</div>
</body></html>"#;

    const POM: &str = r#"<?xml version="1.0"?>
<project>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
      <version>3.12.0</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
    </dependency>
  </dependencies>
</project>"#;

    #[test]
    fn test_scrapes_both_sections() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pom.xml"), POM).unwrap();

        let checker = MavenChecker::with_run_fn(Box::new(move |_| Ok(REPORT.to_string())));
        let outcome = checker.run(dir.path(), false).unwrap();

        assert_eq!(outcome.findings.len(), 3);

        let lang3 = &outcome.findings[0];
        assert_eq!(lang3.status, DependencyStatus::Unused);
        assert_eq!(lang3.category, DependencyCategory::Runtime);
        assert_eq!(lang3.dependency.name, "org.apache.commons:commons-lang3");
        assert_eq!(lang3.dependency.version.as_deref(), Some("3.12.0"));
        assert_eq!(lang3.optional, Some(false));
        assert_eq!(lang3.source_file, "pom.xml");
        assert_eq!(lang3.position, Some(Position { line: 4, column: 5 }));

        let junit = &outcome.findings[1];
        assert_eq!(junit.category, DependencyCategory::Development);
        assert_eq!(junit.optional, Some(true));
        assert_eq!(junit.position, Some(Position { line: 9, column: 5 }));

        let gson = &outcome.findings[2];
        assert_eq!(gson.status, DependencyStatus::Undeclared);
        assert_eq!(gson.dependency.name, "com.google.code.gson:gson");
        // gson is not declared in the pom, so no position can be deduced.
        assert_eq!(gson.position, None);
    }

    #[test]
    fn test_header_rows_and_short_rows_are_skipped() {
        let html = r#"<body>
<h3><a name="Unused_but_Declared_Dependencies"></a>Unused</h3>
<table>
<tr><th>GroupId</th><th>ArtifactId</th></tr>
<tr><td>too</td><td>short</td></tr>
</table>
</body>"#;
        let checker = MavenChecker::with_run_fn(Box::new(|_| unreachable!()));
        let findings = checker.parse_section(
            html,
            UNUSED_SECTION,
            DependencyStatus::Unused,
            Path::new("/tmp"),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_section_yields_no_rows() {
        assert!(section_rows("<body><table><tr><td>x</td></tr></table></body>", UNUSED_SECTION)
            .is_empty());
    }

    #[test]
    fn test_only_first_table_after_anchor_is_read() {
        let html = r#"<body>
<a name="Unused_but_Declared_Dependencies"></a>
<table><tr><td>a</td></tr></table>
<table><tr><td>b</td></tr></table>
</body>"#;
        let rows = section_rows(html, UNUSED_SECTION);
        assert_eq!(rows, vec![vec!["a".to_string()]]);
    }
}
