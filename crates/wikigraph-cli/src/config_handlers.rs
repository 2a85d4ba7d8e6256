//! Handlers for `wikigraph config {path,get,set,init,export}`.

use crate::cli::ConfigAction;
use crate::config::WikigraphConfig;
use std::path::PathBuf;
use wikigraph_core::{Error, Result};

/// Handle a config subcommand.
///
/// Takes the raw `--config` path because `path` and `init` must work before
/// a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            let value = config_value(config_path, &key)?;
            println!("{value}");
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let path = set_config_value(config_path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = init_config_file(file.as_deref(), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = WikigraphConfig::load(config_path)?;
            for (key, value) in config.to_env_vars()? {
                if docker_env {
                    println!("--env {key}={value}");
                } else {
                    println!("{key}={value}");
                }
            }
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = WikigraphConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist, run `wikigraph config init` to create it)");
    }
    Ok(())
}

/// Look up a dotted key in the effective configuration.
pub fn config_value(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = WikigraphConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a dotted key into the config file and return the file's path.
///
/// The edited document must still load as a [`WikigraphConfig`].
pub fn set_config_value(config_path: Option<&str>, key: &str, value: &str) -> Result<PathBuf> {
    let path = WikigraphConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `wikigraph config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;

    let updated: WikigraphConfig = doc
        .clone()
        .try_into()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    updated.query.validate()?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Write a default config file and return its path.
pub fn init_config_file(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => WikigraphConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = WikigraphConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(Error::config("Empty key path"));
    };
    if parts.iter().any(|part| part.is_empty()) {
        return Err(Error::config(format!("Invalid key '{key}'")));
    }

    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value.
///
/// Priority: bool, integer, float, string.
fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::EnvGuard;
    use tempfile::TempDir;

    fn write_default_config(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, WikigraphConfig::default().to_toml_string().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_cmd_config_path_explicit() {
        assert!(cmd_config_path(Some("/explicit/config.toml")).is_ok());
    }

    #[test]
    fn test_config_value_simple_and_nested() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(&dir);
        let path = path.to_str().unwrap();

        assert_eq!(config_value(Some(path), "project_name").unwrap(), "wikigraph");
        assert_eq!(config_value(Some(path), "query.max_depth_limit").unwrap(), "10");
        assert_eq!(config_value(Some(path), "query.weights.reference").unwrap(), "1");
    }

    #[test]
    fn test_config_value_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(&dir);

        let err = config_value(Some(path.to_str().unwrap()), "query.nope").unwrap_err();
        assert!(err.to_string().contains("query.nope"));
    }

    #[test]
    fn test_set_config_value_creates_section() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(&dir);
        let path_str = path.to_str().unwrap();
        let _guard = EnvGuard::remove("WIKIGRAPH_GRAPH_PATH");

        set_config_value(Some(path_str), "graph.path", "/srv/graph.json").unwrap();
        set_config_value(Some(path_str), "query.timeout_ms", "250").unwrap();

        let config = WikigraphConfig::load(Some(path_str)).unwrap();
        assert_eq!(config.graph.path.as_deref(), Some("/srv/graph.json"));
        assert_eq!(config.query.timeout_ms, Some(250));
    }

    #[test]
    fn test_set_config_value_rejects_wrong_type() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let result = set_config_value(Some(path.to_str().unwrap()), "query.max_limit", "lots");
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_set_config_value_rejects_limit_below_default() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(&dir);

        let err = set_config_value(Some(path.to_str().unwrap()), "query.max_limit", "3")
            .unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_set_config_value_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(set_config_value(Some(path.to_str().unwrap()), "graph.path", "/g").is_err());
    }

    #[test]
    fn test_init_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let written = init_config_file(Some(path_str), false).unwrap();
        assert_eq!(written, path);
        let config: WikigraphConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(config, WikigraphConfig::default());

        assert!(init_config_file(Some(path_str), false).is_err());
        assert!(init_config_file(Some(path_str), true).is_ok());
    }

    #[test]
    fn test_handle_config_export() {
        let dir = TempDir::new().unwrap();
        let path = write_default_config(&dir);
        let action = ConfigAction::Export { docker_env: true };
        assert!(handle_config_command(Some(path.to_str().unwrap()), action).is_ok());
    }

    #[test]
    fn test_set_nested_value_rejects_empty_segment() {
        let mut doc = toml::Value::Table(toml::map::Map::new());
        assert!(set_nested_value(&mut doc, "query..limit", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_set_nested_value_through_scalar_fails() {
        let mut doc: toml::Value = toml::from_str("project_name = \"x\"").unwrap();
        let result = set_nested_value(&mut doc, "project_name.inner", toml::Value::Integer(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("0.5"), toml::Value::Float(0.5));
        assert_eq!(parse_value("/srv/g.json"), toml::Value::String("/srv/g.json".into()));
    }
}
