//! Model configuration loading from YAML files

use crate::{MimError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for containment resolution
///
/// ```yaml
/// root_marker: topRoot
/// max_depth: 64
/// max_branches: 100000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Container name that marks a class as a child of the tree root
    pub root_marker: String,
    /// Longest containment branch the resolver will follow
    pub max_depth: usize,
    /// Container edges the resolver may explore for one class
    pub max_branches: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            root_marker: "topRoot".to_string(),
            max_depth: 64,
            max_branches: 100_000,
        }
    }
}

impl ModelConfig {
    /// Load configuration from a YAML file; omitted keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MimError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content)
            .map_err(|e| MimError::Config(format!("Failed to parse config {:?}: {}", path, e)))
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let config: ModelConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Reject settings under which nothing could ever resolve
    pub fn validate(&self) -> Result<()> {
        if self.root_marker.trim().is_empty() {
            return Err(MimError::Config("root_marker must not be empty".to_string()));
        }
        if self.max_depth == 0 {
            return Err(MimError::Config("max_depth must be at least 1".to_string()));
        }
        if self.max_branches == 0 {
            return Err(MimError::Config(
                "max_branches must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ModelConfig::from_yaml("max_depth: 8\n").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.root_marker, "topRoot");
        assert_eq!(config.max_branches, 100_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "root_marker: polUni\nmax_branches: 10").unwrap();

        let config = ModelConfig::load(file.path()).unwrap();
        assert_eq!(config.root_marker, "polUni");
        assert_eq!(config.max_branches, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelConfig::load(Path::new("/nonexistent/mimgen.yaml")).unwrap_err();
        assert!(matches!(err, MimError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let config = ModelConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
