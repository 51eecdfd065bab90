//! Optional TOML configuration.
//!
//! ```toml
//! log_level = "warn"
//!
//! [input]
//! delimiter = ","
//!
//! [output]
//! border = "|"
//! ```
//!
//! Loading never fails: problems are returned as warnings and the affected
//! settings keep their defaults.

use directories::ProjectDirs;
use gridsheet_core::DocumentOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    log_level: Option<String>,
    input: Option<InputSection>,
    output: Option<OutputSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputSection {
    delimiter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    border: Option<String>,
}

/// Effective settings after reading the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// `tracing` filter directive, e.g. `"info"` or `"gridsheet_engine=debug"`
    pub log_level: Option<String>,
    pub options: DocumentOptions,
}

/// Load the config from `config_file`, or from the user config dir if none is given.
///
/// A missing default file is not an error. Returns the config and any warnings.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = config_file.map(Path::to_path_buf).or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let content = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            return (Config::default(), warnings);
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                return (Config::default(), warnings);
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            return (Config::default(), warnings);
        }
    };

    let (config, parse_warnings) = parse_config(&content, &path.display().to_string());
    warnings.extend(parse_warnings);
    (config, warnings)
}

/// Parse config text. `origin` names the source in warnings.
pub(crate) fn parse_config(content: &str, origin: &str) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let mut config = Config::default();

    let file = match toml::from_str::<ConfigFile>(content) {
        Ok(file) => file,
        Err(err) => {
            warnings.push(format!("Failed to parse {}: {}", origin, err));
            return (config, warnings);
        }
    };

    config.log_level = file
        .log_level
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty());

    if let Some(delimiter) = file.input.and_then(|input| input.delimiter) {
        match single_char(&delimiter) {
            Ok(c) => config.options.delimiter = c,
            Err(err) => warnings.push(format!("{}: input.delimiter {}", origin, err)),
        }
    }

    if let Some(border) = file.output.and_then(|output| output.border) {
        match single_char(&border) {
            Ok(c) => config.options.border = c,
            Err(err) => warnings.push(format!("{}: output.border {}", origin, err)),
        }
    }

    (config, warnings)
}

fn single_char(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '"' && c != '\n' && c != '\r' => Ok(c),
        (Some(c), None) => Err(format!("cannot be {:?}", c)),
        _ => Err(format!("must be a single character, got {:?}", value)),
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridsheet")?;
    Some(proj.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let (config, warnings) = parse_config(
            "log_level = \"debug\"\n[input]\ndelimiter = \";\"\n[output]\nborder = \"!\"\n",
            "test",
        );
        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.options.delimiter, ';');
        assert_eq!(config.options.border, '!');
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let (config, warnings) = parse_config("", "test");
        assert!(warnings.is_empty());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_tab_delimiter() {
        let (config, warnings) = parse_config("[input]\ndelimiter = \"\\t\"\n", "test");
        assert!(warnings.is_empty());
        assert_eq!(config.options.delimiter, '\t');
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let (config, warnings) = parse_config("[output]\nborder = \"|\"\nwidth = 4\n", "test");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to parse test"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_multi_char_value_keeps_default() {
        let (config, warnings) =
            parse_config("[input]\ndelimiter = \"::\"\n[output]\nborder = \"#\"\n", "test");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("input.delimiter"));
        assert_eq!(config.options.delimiter, ',');
        assert_eq!(config.options.border, '#');
    }

    #[test]
    fn test_parse_quote_delimiter_is_rejected() {
        let (config, warnings) = parse_config("[input]\ndelimiter = '\"'\n", "test");
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.options.delimiter, ',');
    }

    #[test]
    fn test_parse_blank_log_level_is_unset() {
        let (config, _) = parse_config("log_level = \"  \"\n", "test");
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_load_missing_explicit_file_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nborder = \"+\"\n").unwrap();
        let (config, warnings) = load_config(Some(&path));
        assert!(warnings.is_empty());
        assert_eq!(config.options.border, '+');
    }

    #[test]
    fn test_load_oversize_file_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let padding = "#".repeat(MAX_CONFIG_FILE_BYTES as usize + 1);
        std::fs::write(&path, padding).unwrap();
        let (config, warnings) = load_config(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warnings[0].starts_with("Refusing to read"));
    }
}
