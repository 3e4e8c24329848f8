use thiserror::Error;

/// Raised when a wrapped tool cannot run at all, or when no checker applies
/// to the project. Tool variants carry a link to a help document so the
/// user can fix their environment; findings themselves are never errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("`{tool}` is not installed")]
    ToolNotInstalled {
        tool: &'static str,
        help_url: &'static str,
    },

    #[error("execution failed for {tool}: {message}")]
    ToolExecutionFailed {
        tool: &'static str,
        message: String,
        help_url: &'static str,
    },

    #[error("could not detect a supported project type")]
    NoSupportedProject,
}

impl ConfigurationError {
    pub fn help_url(&self) -> Option<&str> {
        match self {
            ConfigurationError::ToolNotInstalled { help_url, .. }
            | ConfigurationError::ToolExecutionFailed { help_url, .. } => Some(help_url),
            ConfigurationError::NoSupportedProject => None,
        }
    }
}
