use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Result};

use crate::error::ConfigurationError;
use crate::models::Finding;

pub mod composer;
pub mod fawltydeps;
pub mod knip;
pub mod maven;

/// Replaceable execution seam: takes the project root, returns the tool's
/// captured stdout. Tests substitute this to feed fixture output without
/// invoking the real tool.
pub type RunFn = Box<dyn Fn(&Path) -> Result<String>>;

/// Findings plus the checker's troubleshooting blurb, concatenated across
/// checkers by the aggregator.
#[derive(Debug)]
pub struct CheckOutcome {
    pub findings: Vec<Finding>,
    pub help_text: &'static str,
}

pub trait Checker {
    /// User-friendly name of the wrapped tool.
    fn name(&self) -> &'static str;

    /// Manifest file whose presence in the project root selects this checker.
    fn manifest_file(&self) -> &'static str;

    fn run(&self, project_root: &Path, debug: bool) -> Result<CheckOutcome>;
}

/// Run `cmd` in `cwd` and capture stdout. Exit codes listed in `soft_exit`
/// mean "ran fine, found issues" for the given tool and are not errors.
pub(crate) fn capture_stdout(
    cmd: &str,
    args: &[&str],
    cwd: &Path,
    soft_exit: &[i32],
) -> Result<String> {
    let output = Command::new(cmd)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                anyhow!("command not found: {cmd}")
            } else {
                anyhow!("failed to spawn {cmd}: {err}")
            }
        })?;

    let code = output.status.code().unwrap_or(-1);
    if output.status.success() || soft_exit.contains(&code) {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Shell wrappers (npx, poetry) report a missing subcommand on stderr
    // rather than failing to spawn.
    if stderr.contains("command not found") {
        bail!("command not found: {cmd}");
    }
    bail!("{cmd} exited with status {code}: {}", stderr.trim_end());
}

/// Classify a failed invocation: a "command not found" anywhere in the error
/// chain means the tool is missing (install link); anything else is an
/// execution failure (documentation link). Parse errors never reach this
/// path and propagate as-is.
pub(crate) fn classify_run_error(
    err: anyhow::Error,
    tool: &'static str,
    install_url: &'static str,
    docs_url: &'static str,
) -> anyhow::Error {
    let missing = err
        .chain()
        .any(|cause| cause.to_string().contains("command not found"));
    if missing {
        ConfigurationError::ToolNotInstalled {
            tool,
            help_url: install_url,
        }
        .into()
    } else {
        ConfigurationError::ToolExecutionFailed {
            tool,
            message: format!("{err:#}"),
            help_url: docs_url,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_missing_command() {
        let err = classify_run_error(
            anyhow!("command not found: npx"),
            "Knip",
            "https://example.com/install",
            "https://example.com/docs",
        );
        match err.downcast_ref::<ConfigurationError>() {
            Some(ConfigurationError::ToolNotInstalled { tool, help_url }) => {
                assert_eq!(*tool, "Knip");
                assert_eq!(*help_url, "https://example.com/install");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_classify_generic_failure() {
        let err = classify_run_error(
            anyhow!("mvn exited with status 1: build failed"),
            "Maven Dependency Analyzer",
            "https://example.com/install",
            "https://example.com/docs",
        );
        match err.downcast_ref::<ConfigurationError>() {
            Some(ConfigurationError::ToolExecutionFailed { help_url, .. }) => {
                assert_eq!(*help_url, "https://example.com/docs");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}
