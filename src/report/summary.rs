use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};

use crate::models::{DependencyStatus, Finding};

/// Render a CI summary: workflow-command annotations on stdout for every
/// finding that carries a position, plus a Markdown report appended to the
/// file named by `$GITHUB_STEP_SUMMARY` (stdout when unset).
pub fn render(findings: &[Finding], help_text: &str) -> Result<()> {
    for line in annotations(findings) {
        println!("{line}");
    }

    let markdown = render_markdown(findings, help_text);
    match std::env::var_os("GITHUB_STEP_SUMMARY") {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open {}", path.to_string_lossy()))?;
            file.write_all(markdown.as_bytes())?;
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

/// `::error file={path},line={line},col={col}::{message}` lines, one per
/// positioned finding.
fn annotations(findings: &[Finding]) -> Vec<String> {
    findings
        .iter()
        .filter_map(|finding| {
            let position = finding.position?;
            let verb = match finding.status {
                DependencyStatus::Unused => "Unused",
                DependencyStatus::Undeclared => "Undeclared",
            };
            let message = format!(
                "{} {} dependency: {}",
                verb, finding.category, finding.dependency.name
            )
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");
            Some(format!(
                "::error file={},line={},col={}::{}",
                finding.source_file, position.line, position.column, message
            ))
        })
        .collect()
}

fn render_markdown(findings: &[Finding], help_text: &str) -> String {
    let mut out = String::from("# Dependency Analysis Results\n\n");

    if findings.is_empty() {
        out.push_str("No unused or undeclared dependencies found.\n");
        return out;
    }

    out.push_str("| Status | Dependency | Version | Category | Optional | Location |\n");
    out.push_str("| --- | --- | --- | --- | --- | --- |\n");
    for finding in findings {
        out.push_str(&format!(
            "| {} | `{}` | {} | {} | {} | {} |\n",
            finding.status,
            finding.dependency.name,
            finding.dependency.version.as_deref().unwrap_or("(n/a)"),
            finding.category,
            if finding.optional == Some(true) { "✓" } else { "" },
            finding.location(),
        ));
    }

    out.push('\n');
    out.push_str(help_text);
    out
}
