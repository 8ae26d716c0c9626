//! The flattened target record.

use serde::{Deserialize, Serialize};

/// A buildable unit read from the codemodel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    name: String,
    #[serde(rename = "type")]
    target_type: String,
    artifacts: Vec<String>,
    sources: Vec<String>,
}

impl Target {
    /// Creates a target record.
    pub fn new(
        name: impl Into<String>,
        target_type: impl Into<String>,
        artifacts: Vec<String>,
        sources: Vec<String>,
    ) -> Self {
        Self { name: name.into(), target_type: target_type.into(), artifacts, sources }
    }

    /// Target name, taken from the configuration's target entry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind label such as `EXECUTABLE` or `UTILITY`. Not interpreted.
    #[must_use]
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// Output files relative to the build root. Empty for utility targets.
    #[must_use]
    pub fn artifacts(&self) -> &[String] {
        &self.artifacts
    }

    /// Source files in the target's compile/link graph.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }
}
