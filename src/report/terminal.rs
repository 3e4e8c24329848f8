use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{DependencyStatus, Finding};

/// Render a colored terminal report.
pub fn render(
    findings: &[Finding],
    help_text: &str,
    path: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let unused = findings
        .iter()
        .filter(|f| f.status == DependencyStatus::Unused)
        .count();
    let undeclared = findings.len() - unused;

    if quiet {
        println!(
            "Total: {}  Unused: {}  Undeclared: {}",
            findings.len(),
            unused.to_string().yellow(),
            undeclared.to_string().red(),
        );
        return Ok(());
    }

    println!("\n {} v{}", "depfindr".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Analyzed: {}\n", path.display());

    if findings.is_empty() {
        println!(" {} No unused or undeclared dependencies found.", "✓".green());
        return Ok(());
    }

    render_table(findings);
    println!(
        "\n {} {} unused, {} undeclared",
        "Σ".bold(),
        unused.to_string().yellow(),
        undeclared.to_string().red(),
    );

    if verbose && !help_text.is_empty() {
        println!("{help_text}");
    }

    Ok(())
}

fn render_table(findings: &[Finding]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Dependency").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Optional").add_attribute(Attribute::Bold),
            Cell::new("Location").add_attribute(Attribute::Bold),
        ]);

    for finding in findings {
        let status_color = match finding.status {
            DependencyStatus::Unused => Color::Yellow,
            DependencyStatus::Undeclared => Color::Red,
        };

        table.add_row(vec![
            Cell::new(finding.status.to_string()).fg(status_color),
            Cell::new(&finding.dependency.name).fg(Color::Cyan),
            Cell::new(finding.dependency.version.as_deref().unwrap_or("(n/a)")),
            Cell::new(finding.category.to_string()),
            Cell::new(if finding.optional == Some(true) { "✓" } else { "" }),
            Cell::new(finding.location()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
}
