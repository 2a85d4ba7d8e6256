//! Configuration for the `wikigraph` binary.
//!
//! [`WikigraphConfig`] loads from a TOML file, environment variables and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `WIKIGRAPH_CONFIG` environment variable
//! 3. XDG default: `~/.config/wikigraph/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wikigraph_core::traits::ConfigProvider;
use wikigraph_core::{Error, Result};
use wikigraph_query::QueryConfig;

/// Environment variable prefix and config directory name.
pub const ENV_PREFIX: &str = "WIKIGRAPH";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikigraphConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path for all project data.
    pub base_path: Option<String>,

    /// Graph document location.
    pub graph: GraphConfig,

    /// Query defaults and limits.
    pub query: QueryConfig,
}

/// Graph document configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Path of the graph JSON file.
    pub path: Option<String>,
}

impl Default for WikigraphConfig {
    fn default() -> Self {
        Self {
            project_name: "wikigraph".to_string(),
            base_path: None,
            graph: GraphConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl WikigraphConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// The result is checked with [`QueryConfig::validate`].
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("graph");
        env_opts.add_section("query");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;
        config.query.validate()?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("WIKIGRAPH_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wikigraph").join("config.toml"))
    }

    /// Point the config at a different graph document.
    pub fn with_graph_path(mut self, path: impl Into<String>) -> Self {
        self.graph.path = Some(path.into());
        self
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `WIKIGRAPH_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for WikigraphConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn graph_path(&self) -> Result<PathBuf> {
        match &self.graph.path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Ok(self.base_path()?.join("data").join("graphs").join("graph.json")),
        }
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                flatten_toml_value(val, &format!("{prefix}_{}", key.to_uppercase()), out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
