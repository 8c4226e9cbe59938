use std::io;
use thiserror::Error;

/// Errors when requesting data from a weather source
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} returned a not-OK status code: {status}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

/// A field that could not be located or parsed in an otherwise good response
#[derive(Error, Debug)]
#[error("unable to read '{field}' from forecast: {reason}")]
pub struct ParseError {
    pub field: String,
    pub reason: String,
}

impl ParseError {
    pub fn missing(field: &str) -> ParseError {
        ParseError { field: field.to_string(), reason: "not present".to_string() }
    }

    pub fn invalid(field: &str, reason: impl ToString) -> ParseError {
        ParseError { field: field.to_string(), reason: reason.to_string() }
    }
}

/// Errors from any weather source
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("FetchError: {0}")]
    Fetch(#[from] FetchError),
    #[error("ParseError: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::Io: {0}")]
    Io(#[from] io::Error),
    #[error("ConfigError::Toml: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Snapshot file access errors, "file not found" is never one of these
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("unable to read snapshot {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("unable to write snapshot {path}: {source}")]
    Write { path: String, source: io::Error },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("DisplayError::Io: {0}")]
    Io(#[from] io::Error),
    #[error("DisplayError::Document: {0}")]
    Document(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("LoggingError::Appender: {0}")]
    Appender(#[from] io::Error),
    #[error("LoggingError::Config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("LoggingError::SetLogger: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// Anything that aborts a display cycle
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}
