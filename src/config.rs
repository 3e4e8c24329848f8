use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::{EcosystemArg, ReportFormat};

/// Root configuration structure, deserialized from `.depfindr.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ecosystems to skip even when their manifest is present. Merged with
    /// any `--exclude-lang` flags.
    pub exclude: Vec<EcosystemArg>,
    /// Default report format; `--report` takes precedence.
    pub report: Option<ReportFormat>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config` (an error if unreadable)
/// 2. `<project_path>/.depfindr.toml`
/// 3. `<user config dir>/depfindr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        return parse(&content, path);
    }

    let project_config = project_path.join(".depfindr.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return parse(&content, &project_config);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("depfindr").join("config.toml");
        if user_config.exists() {
            let content = std::fs::read_to_string(&user_config)?;
            return parse(&content, &user_config);
        }
    }

    Ok(Config::default())
}

fn parse(content: &str, path: &Path) -> Result<Config> {
    toml::from_str(content).with_context(|| format!("invalid config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert!(config.exclude.is_empty());
        assert!(config.report.is_none());
    }

    #[test]
    fn test_project_config_is_picked_up() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".depfindr.toml"),
            "exclude = [\"php\", \"java\"]\nreport = \"json\"\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.exclude, vec![EcosystemArg::Php, EcosystemArg::Java]);
        assert_eq!(config.report, Some(ReportFormat::Json));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "no_such_key = true\n").unwrap();
        assert!(load_config(dir.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());
    }
}
