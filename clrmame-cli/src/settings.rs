//! User settings (`~/.config/clrmame/settings.toml`).
//!
//! ```toml
//! [output]
//! format = "json"
//!
//! [parse]
//! container = "map"
//! ```
//!
//! Command-line flags always take precedence over the file.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli_types::{ContainerKind, OutputFormat};
use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub output: OutputSettings,
    pub parse: ParseSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct ParseSettings {
    pub container: ContainerKind,
}

/// Keys accepted by `config set`.
pub(crate) const KEYS: &[&str] = &["output.format", "parse.container"];

/// Canonical path to the settings file: `~/.config/clrmame/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("clrmame").join("settings.toml")
}

/// Load settings, falling back to defaults if the file is missing or invalid.
pub(crate) fn load() -> Settings {
    load_from(&settings_path())
}

pub(crate) fn load_from(path: &Path) -> Settings {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return Settings::default();
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring invalid settings file {}: {e}", path.display());
            Settings::default()
        }
    }
}

/// Check a `config set` key/value pair before writing it.
fn validate(key: &str, value: &str) -> Result<(), CliError> {
    let ok = match key {
        "output.format" => matches!(value, "text" | "json"),
        "parse.container" => matches!(value, "list" | "map"),
        _ => {
            return Err(CliError::config(format!(
                "unknown key '{key}' (expected one of: {})",
                KEYS.join(", ")
            )));
        }
    };
    if ok {
        Ok(())
    } else {
        Err(CliError::config(format!("invalid value '{value}' for {key}")))
    }
}

/// Set one value in the settings file.
///
/// Uses `toml::Value` for a surgical update so unrelated tables are preserved.
pub(crate) fn save_value(key: &str, value: &str) -> Result<(), CliError> {
    save_value_to(&settings_path(), key, value)
}

pub(crate) fn save_value_to(settings: &Path, key: &str, value: &str) -> Result<(), CliError> {
    validate(key, value)?;
    let (table_name, field) = key
        .split_once('.')
        .ok_or_else(|| CliError::config(format!("malformed key '{key}'")))?;

    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let root = doc
        .as_table_mut()
        .ok_or_else(|| CliError::config("settings.toml root is not a table"))?;
    let table = root
        .entry(table_name)
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| CliError::config(format!("[{table_name}] is not a table")))?;
    table.insert(field.to_string(), toml::Value::String(value.to_string()));

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = load_from(&tmp.path().join("settings.toml"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert_eq!(settings.parse.container, ContainerKind::List);
    }

    #[test]
    fn test_load_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[parse]\ncontainer = \"map\"\n").unwrap();
        let settings = load_from(&path);
        assert_eq!(settings.parse.container, ContainerKind::Map);
        assert_eq!(settings.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();
        assert_eq!(load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_value_preserves_other_tables() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[extra]\nkeep = true\n").unwrap();

        save_value_to(&path, "output.format", "json").unwrap();
        save_value_to(&path, "parse.container", "map").unwrap();

        let settings = load_from(&path);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.parse.container, ContainerKind::Map);

        let doc: toml::Value = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(doc["extra"]["keep"].as_bool(), Some(true));
    }

    #[test]
    fn test_save_value_rejects_bad_input() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        assert!(save_value_to(&path, "output.colour", "json").is_err());
        assert!(save_value_to(&path, "output.format", "yaml").is_err());
        assert!(!path.exists());
    }
}
