//! Run configuration.
//!
//! Every field has a default, so an absent `component-graph.toml` is the same
//! as an empty one. CLI flags are layered on top by the binary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{GraphError, Result};

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "component-graph.toml";

/// How a module's component identity is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStrategy {
    /// Match `displayName`, class, or `createClass` declarations in source text.
    #[default]
    Source,
    /// Strip the components-directory token from the module request.
    Path,
}

impl fmt::Display for IdentityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityStrategy::Source => write!(f, "source"),
            IdentityStrategy::Path => write!(f, "path"),
        }
    }
}

impl FromStr for IdentityStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source" => Ok(IdentityStrategy::Source),
            "path" => Ok(IdentityStrategy::Path),
            other => Err(GraphError::InvalidConfig(format!(
                "unknown identity strategy \"{other}\" (expected \"source\" or \"path\")"
            ))),
        }
    }
}

/// Configuration for one graph generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Identity of the component the graph is rooted at.
    pub root: String,
    /// Substring marking an import from the actions directory.
    pub actions: String,
    /// Substring marking an import from the stores directory.
    pub stores: String,
    /// Substring marking the components directory (path strategy only).
    pub components: Option<String>,
    /// Output directory for the rendered page.
    pub target: PathBuf,
    /// Append the four legend nodes.
    pub legend: bool,
    pub identity: IdentityStrategy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            root: "App".to_string(),
            actions: "actions/".to_string(),
            stores: "stores/".to_string(),
            components: None,
            target: PathBuf::from("graph"),
            legend: false,
            identity: IdentityStrategy::Source,
        }
    }
}

impl GraphConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| GraphError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `component-graph.toml` from a project root.
    pub fn load_from_root(root: &Path) -> Result<Self> {
        Self::load(&root.join(CONFIG_FILE_NAME))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check that the settings can drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.root.is_empty() {
            return Err(GraphError::InvalidConfig("root component name is empty".into()));
        }
        if self.actions.is_empty() || self.stores.is_empty() {
            return Err(GraphError::InvalidConfig(
                "actions and stores directory tokens must not be empty".into(),
            ));
        }
        if self.identity == IdentityStrategy::Path
            && self.components.as_deref().map_or(true, str::is_empty)
        {
            return Err(GraphError::InvalidConfig(
                "identity = \"path\" requires a components directory token".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the output directory against a project root.
    pub fn resolve_target(&self, project_root: &Path) -> PathBuf {
        if self.target.is_absolute() {
            self.target.clone()
        } else {
            project_root.join(&self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.root, "App");
        assert_eq!(config.actions, "actions/");
        assert_eq!(config.stores, "stores/");
        assert_eq!(config.components, None);
        assert!(!config.legend);
        assert_eq!(config.identity, IdentityStrategy::Source);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GraphConfig::from_toml("root = \"Shell\"\nlegend = true\n").unwrap();
        assert_eq!(config.root, "Shell");
        assert!(config.legend);
        assert_eq!(config.actions, "actions/");
        assert_eq!(config.target, PathBuf::from("graph"));
    }

    #[test]
    fn test_path_strategy_from_toml() {
        let config =
            GraphConfig::from_toml("identity = \"path\"\ncomponents = \"components/\"\n").unwrap();
        assert_eq!(config.identity, IdentityStrategy::Path);
        assert_eq!(config.components.as_deref(), Some("components/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_path_strategy_requires_components() {
        let config = GraphConfig {
            identity: IdentityStrategy::Path,
            ..GraphConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(GraphConfig::from_toml("rooot = \"App\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GraphConfig::load_from_root(dir.path()).unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "root = ").unwrap();
        let err = GraphConfig::load_from_root(dir.path()).unwrap_err();
        assert!(matches!(err, GraphError::Config { .. }));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("path".parse::<IdentityStrategy>().unwrap(), IdentityStrategy::Path);
        assert!("ast".parse::<IdentityStrategy>().is_err());
    }

    #[test]
    fn test_resolve_target() {
        let config = GraphConfig::default();
        assert_eq!(
            config.resolve_target(Path::new("/project")),
            PathBuf::from("/project/graph")
        );
    }
}
