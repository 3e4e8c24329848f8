use serde::{Deserialize, Serialize};

/// A location within a source file. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DependencyStatus {
    /// Declared in the manifest but never referenced by code.
    Unused,
    /// Referenced by code but absent from the manifest.
    Undeclared,
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyStatus::Unused => write!(f, "UNUSED"),
            DependencyStatus::Undeclared => write!(f, "UNDECLARED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyCategory {
    Runtime,
    Development,
    /// Used when the underlying tool does not distinguish dependency classes.
    Unknown,
}

impl std::fmt::Display for DependencyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyCategory::Runtime => write!(f, "runtime"),
            DependencyCategory::Development => write!(f, "development"),
            DependencyCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// The package a finding refers to, in the ecosystem's native naming
/// scheme (`group:artifact` for Java).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Presentation-only metadata attached by a checker: a registry page for
/// the package and an ecosystem icon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub link: String,
    pub icon: String,
}

/// One normalized unused/undeclared-dependency result. Every checker maps
/// its tool's output to this structure; a finding is immutable once built
/// and carries no checker identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub status: DependencyStatus,
    pub category: DependencyCategory,
    pub dependency: Dependency,
    /// Manifest or source file the finding is attributed to, relative to
    /// the project root.
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Extra>,
}

impl Finding {
    /// `file.ext:12` style location string for reports.
    pub fn location(&self) -> String {
        match self.position {
            Some(pos) => format!("{}:{}", self.source_file, pos.line),
            None => self.source_file.clone(),
        }
    }
}
