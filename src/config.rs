/// Service configuration.
///
/// Settings come from a TOML file (default `./buoymon.toml`), with
/// environment variables taking precedence for the handful of knobs an
/// operator toggles per run. A missing file is not an error (every field
/// has a default) but a malformed file is, so a typo cannot silently run
/// the service on defaults.

use serde::Deserialize;
use std::fmt;

use crate::logging::LogLevel;

/// Config file consulted when `BUOYMON_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "./buoymon.toml";

// ---------------------------------------------------------------------------
// Config model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Seconds between evaluation cycles.
    pub tick_interval_secs: u64,
    /// Samples kept per chart line.
    pub series_capacity: usize,
    /// Rows kept in the activity log.
    pub activity_log_capacity: usize,
    /// Minimum level written to the log ("debug", "info", "warn", "error").
    pub log_level: String,
    /// Optional log file; console-only when absent.
    pub log_file: Option<String>,
    /// Run the scripted flood demo instead of the random walk.
    pub demo_mode: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 10,
            series_capacity: crate::history::DEFAULT_SERIES_CAPACITY,
            activity_log_capacity: crate::monitor::DEFAULT_ACTIVITY_CAPACITY,
            log_level: "info".to_string(),
            log_file: None,
            demo_mode: false,
        }
    }
}

impl MonitorConfig {
    /// The configured log level; an unrecognized name falls back to Info
    /// rather than refusing to start the service.
    pub fn parsed_log_level(&self) -> LogLevel {
        self.log_level.parse().unwrap_or(LogLevel::Info)
    }

    /// Applies overrides from an environment-like lookup. Split out from
    /// `apply_env_overrides` so tests can drive it without touching the
    /// process environment.
    ///
    /// Recognized variables:
    ///   BUOYMON_LOG_LEVEL          — log level name
    ///   BUOYMON_DEMO               — "1"/"true" enables the flood demo
    ///   BUOYMON_TICK_INTERVAL_SECS — cycle interval
    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = get("BUOYMON_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(demo) = get("BUOYMON_DEMO") {
            self.demo_mode = matches!(demo.trim(), "1" | "true" | "TRUE" | "yes");
        }
        if let Some(interval) = get("BUOYMON_TICK_INTERVAL_SECS") {
            if let Ok(secs) = interval.trim().parse::<u64>() {
                self.tick_interval_secs = secs;
            }
        }
    }

    /// Applies overrides from the real process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Errors that can arise when loading the configuration file.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(String),
    /// The file could not be parsed as TOML.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads configuration from a TOML file.
pub fn load(path: &str) -> Result<MonitorConfig, ConfigError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Io(format!("{}: {}", path, e)))?;
    parse(&text)
}

/// Loads configuration, treating a missing file as defaults. A present but
/// malformed file is still an error.
pub fn load_or_default(path: &str) -> Result<MonitorConfig, ConfigError> {
    if std::path::Path::new(path).exists() {
        load(path)
    } else {
        Ok(MonitorConfig::default())
    }
}

/// Parses configuration from TOML text.
pub fn parse(text: &str) -> Result<MonitorConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
