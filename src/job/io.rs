//! Loading task-job descriptions from disk.

use super::TaskJob;
use crate::error::{JobScriptError, Result};
use std::path::Path;

impl TaskJob {
    /// Load a description file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobScriptError::UserError(format!(
                "failed to read job description '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a description from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            JobScriptError::UserError(format!("failed to parse job description YAML: {}", e))
        })
    }

    /// Parse a description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            JobScriptError::UserError(format!("failed to parse job description JSON: {}", e))
        })
    }
}
