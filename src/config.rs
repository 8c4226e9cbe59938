use std::fs;
use std::io::ErrorKind;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::models::forecast::{Coordinates, WarningThresholds};
use crate::models::frame::Color;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Credentials {
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct App {
    pub debug: bool,
    #[serde(rename = "query-api")]
    pub query_api: bool,
}

impl Default for App {
    fn default() -> Self {
        Self { debug: false, query_api: true }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Files {
    pub snapshot: String,
}

impl Default for Files {
    fn default() -> Self {
        Self { snapshot: "/tmp/weatherink-forecast-cache.txt".to_string() }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    File,
    Null,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct DisplayParameters {
    pub sink: SinkKind,
    pub output: String,
    pub border: Color,
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    pub left_pull: i32,
}

impl Default for DisplayParameters {
    fn default() -> Self {
        Self {
            sink: SinkKind::File,
            output: "/tmp/weatherink-frame.json".to_string(),
            border: Color::Yellow,
            width: 212,
            height: 104,
            font_size: 38,
            left_pull: 20,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Http {
    pub timeout_secs: u64,
}

impl Default for Http {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        Self { log_path: String::new(), log_level: LevelFilter::Info, log_to_stdout: true }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: Credentials,
    pub app: App,
    pub location: Coordinates,
    pub warnings: WarningThresholds,
    pub files: Files,
    pub display: DisplayParameters,
    pub http: Http,
    pub general: General,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            app: App::default(),
            location: Coordinates::default(),
            warnings: WarningThresholds::default(),
            files: Files::default(),
            display: DisplayParameters::default(),
            http: Http::default(),
            general: General::default(),
        }
    }
}

impl Config {
    /// Returns the api key if one is configured and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.credentials.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

/// Loads the configuration file, falling back to defaults if the file is missing or
/// malformed. Any problem is handed back alongside the defaults so that it can be logged
/// once logging is up, since the logging setup itself lives in the configuration.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_or_default(config_path: &str) -> (Config, Option<ConfigError>) {
    match load_config(config_path) {
        Ok(config) => (config, None),
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => (Config::default(), None),
        Err(e) => (Config::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_full_config() {
        let file = write_config(r#"
[credentials]
api-key = "abc123"

[app]
debug = true
query-api = true

[location]
lat = 56.2233
long = 15.6583

[warnings]
uv = 6
precipitation = 0.3

[files]
snapshot = "/var/tmp/snapshot.txt"

[display]
sink = "null"
border = "red"

[general]
log_level = "debug"
log_to_stdout = false
"#);
        let config = load_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.api_key(), Some("abc123"));
        assert!(config.app.debug);
        assert_eq!(config.location, Coordinates { lat: 56.2233, long: 15.6583 });
        assert_eq!(config.warnings, WarningThresholds { uv: 6, precipitation: 0.3 });
        assert_eq!(config.files.snapshot, "/var/tmp/snapshot.txt");
        assert_eq!(config.display.sink, SinkKind::Null);
        assert_eq!(config.display.border, Color::Red);
        assert_eq!(config.display.width, 212);
        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(!config.general.log_to_stdout);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let file = write_config("[app]\nquery-api = false\n");
        let config = load_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.api_key(), None);
        assert!(!config.app.debug);
        assert!(!config.app.query_api);
        assert_eq!(config.warnings, WarningThresholds::default());
        assert_eq!(config.files.snapshot, "/tmp/weatherink-forecast-cache.txt");
    }

    #[test]
    fn test_blank_api_key_is_no_key() {
        let file = write_config("[credentials]\napi-key = \"  \"\n");
        let config = load_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_absent_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let (config, err) = load_or_default(path.to_str().unwrap());

        assert!(err.is_none());
        assert_eq!(config.api_key(), None);
        assert!(!config.app.debug);
    }

    #[test]
    fn test_partial_location_keeps_other_settings() {
        let file = write_config("[credentials]\napi-key = \"abc123\"\n\n[app]\ndebug = true\n\n[location]\nlat = 40.0\n");
        let (config, err) = load_or_default(file.path().to_str().unwrap());

        assert!(err.is_none());
        assert_eq!(config.api_key(), Some("abc123"));
        assert!(config.app.debug);
        assert_eq!(config.location, Coordinates { lat: 40.0, long: -77.032645 });
    }

    #[test]
    fn test_unreadable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (config, err) = load_or_default(dir.path().to_str().unwrap());

        assert!(matches!(err, Some(ConfigError::Io(_))));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let file = write_config("[credentials\napi-key = ");
        let (config, err) = load_or_default(file.path().to_str().unwrap());

        assert!(matches!(err, Some(ConfigError::Toml(_))));
        assert_eq!(config.api_key(), None);
        assert!(!config.app.debug);
    }
}
