use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::checker::Checker;
use crate::detector::select_checkers;
use crate::error::ConfigurationError;
use crate::models::Finding;

/// The aggregate result of one analysis run: findings in checker invocation
/// order (then tool-internal order) and the concatenated troubleshooting
/// text of every checker that ran.
#[derive(Debug)]
pub struct Analysis {
    pub findings: Vec<Finding>,
    pub help_text: String,
}

/// Run every applicable checker against the project, strictly sequentially.
/// Zero applicable checkers is a terminal condition; tool-level errors
/// propagate unchanged. An empty finding list is a successful, clean run.
pub fn analyze(project_root: &Path, debug: bool, quiet: bool) -> Result<Analysis> {
    let checkers = select_checkers(project_root);
    run_checkers(&checkers, project_root, debug, quiet)
}

pub fn run_checkers(
    checkers: &[Box<dyn Checker>],
    project_root: &Path,
    debug: bool,
    quiet: bool,
) -> Result<Analysis> {
    if checkers.is_empty() {
        return Err(ConfigurationError::NoSupportedProject.into());
    }

    let mut findings = Vec::new();
    let mut help_text = String::new();

    for checker in checkers {
        let spinner = if quiet { None } else { Some(tool_spinner(checker.name())) };

        let outcome = checker.run(project_root, debug);

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let outcome = outcome?;

        if !quiet {
            eprintln!(
                "  {} {}: {} finding(s)",
                "→".cyan(),
                checker.name(),
                outcome.findings.len()
            );
        }

        findings.extend(outcome.findings);
        help_text.push_str(outcome.help_text);
    }

    Ok(Analysis { findings, help_text })
}

fn tool_spinner(name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Running {name}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckOutcome;
    use crate::models::{Dependency, DependencyCategory, DependencyStatus};

    struct StubChecker {
        name: &'static str,
        dep_names: Vec<&'static str>,
    }

    impl Checker for StubChecker {
        fn name(&self) -> &'static str {
            self.name
        }

        fn manifest_file(&self) -> &'static str {
            "stub.json"
        }

        fn run(&self, _project_root: &Path, _debug: bool) -> Result<CheckOutcome> {
            let findings = self
                .dep_names
                .iter()
                .map(|name| Finding {
                    status: DependencyStatus::Unused,
                    category: DependencyCategory::Unknown,
                    dependency: Dependency {
                        name: name.to_string(),
                        version: None,
                    },
                    source_file: "stub.json".to_string(),
                    position: None,
                    optional: None,
                    extra: None,
                })
                .collect();
            Ok(CheckOutcome {
                findings,
                help_text: "[stub help]",
            })
        }
    }

    #[test]
    fn test_analyze_on_empty_project_is_terminal() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = analyze(dir.path(), false, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::NoSupportedProject)
        ));
    }

    #[test]
    fn test_no_checkers_is_terminal() {
        let err = run_checkers(&[], Path::new("/tmp"), false, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigurationError>(),
            Some(ConfigurationError::NoSupportedProject)
        ));
    }

    #[test]
    fn test_findings_concatenate_in_checker_order() {
        let checkers: Vec<Box<dyn Checker>> = vec![
            Box::new(StubChecker {
                name: "first",
                dep_names: vec!["a", "b"],
            }),
            Box::new(StubChecker {
                name: "second",
                dep_names: vec!["c"],
            }),
        ];

        let analysis = run_checkers(&checkers, Path::new("/tmp"), false, true).unwrap();
        let names: Vec<_> = analysis
            .findings
            .iter()
            .map(|f| f.dependency.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(analysis.help_text, "[stub help][stub help]");
    }

    #[test]
    fn test_empty_findings_are_a_clean_run() {
        let checkers: Vec<Box<dyn Checker>> = vec![Box::new(StubChecker {
            name: "empty",
            dep_names: vec![],
        })];
        let analysis = run_checkers(&checkers, Path::new("/tmp"), false, true).unwrap();
        assert!(analysis.findings.is_empty());
    }
}
