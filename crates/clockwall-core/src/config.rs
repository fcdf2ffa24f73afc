//! Configuration loading and typed config structures for Clockwall.
//!
//! The configuration lives in `clockwall.yaml`. Every section and field has
//! a serde default, so an empty document yields a working setup: a
//! one-second heartbeat aligned to wall-clock seconds, the three-state edit
//! cycle, 24-hour readouts and no initial clocks.

use std::path::Path;

use clockwall_types::{ClockKind, EditCycle, TimeFormat};
use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "CLOCKWALL_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// An initial clock names a time zone missing from the table.
    #[error("unknown time zone label: {label}")]
    UnknownTimeZone {
        /// The label as written in the configuration.
        label: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Clockwall configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClockwallConfig {
    /// Heartbeat timing.
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,

    /// Per-clock behavior and the clocks to create at startup.
    #[serde(default)]
    pub clocks: ClocksConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Engine run bounds.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl ClockwallConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `CLOCKWALL_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error from [`ClockwallConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error from [`ClockwallConfig::validate`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and time-zone labels.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero heartbeat period and
    /// [`ConfigError::UnknownTimeZone`] for an initial clock whose label is
    /// not in the time-zone table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat.period_ms == 0 {
            return Err(ConfigError::Invalid {
                reason: "heartbeat.period_ms must be at least 1".to_owned(),
            });
        }
        for clock in &self.clocks.initial {
            clock.offset_minutes()?;
        }
        Ok(())
    }
}

/// Heartbeat timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeartbeatConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    /// Whether the first tick waits for the next wall-clock second boundary.
    #[serde(default = "default_true")]
    pub align_to_second: bool,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            align_to_second: true,
        }
    }
}

/// Clock behavior shared by every clock the collection creates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClocksConfig {
    /// Edit cycle walked by digital clocks.
    #[serde(default)]
    pub digital_edit_cycle: EditCycle,

    /// Edit cycle walked by analog clocks.
    #[serde(default)]
    pub analog_edit_cycle: EditCycle,

    /// Readout format of newly created clocks.
    #[serde(default)]
    pub default_time_format: TimeFormat,

    /// Clocks created at startup, in display order.
    #[serde(default)]
    pub initial: Vec<InitialClock>,
}

impl ClocksConfig {
    /// The edit cycle configured for `kind`.
    pub const fn edit_cycle_for(&self, kind: ClockKind) -> EditCycle {
        match kind {
            ClockKind::Digital => self.digital_edit_cycle,
            ClockKind::Analog => self.analog_edit_cycle,
        }
    }
}

impl Default for ClocksConfig {
    fn default() -> Self {
        Self {
            digital_edit_cycle: EditCycle::HoursMinutes,
            analog_edit_cycle: EditCycle::HoursMinutes,
            default_time_format: TimeFormat::H24,
            initial: Vec::new(),
        }
    }
}

/// One clock to create at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InitialClock {
    /// Rendering variant.
    pub kind: ClockKind,

    /// Time-zone label from the table, e.g. `GMT+05:30`. Absent means the
    /// host's local offset.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl InitialClock {
    /// Resolve the configured label to an offset in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTimeZone`] if the label is not in the
    /// table.
    pub fn offset_minutes(&self) -> Result<Option<i32>, ConfigError> {
        self.time_zone
            .as_deref()
            .map(|label| {
                clockwall_types::offset_for_label(label).ok_or_else(|| {
                    ConfigError::UnknownTimeZone {
                        label: label.to_owned(),
                    }
                })
            })
            .transpose()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Override the level with `CLOCKWALL_LOG_LEVEL` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(LOG_LEVEL_ENV) {
            self.level = val;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Engine run bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Stop after this many seconds (0 = run until interrupted).
    #[serde(default)]
    pub max_run_seconds: u64,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_period_ms() -> u64 {
    1000
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}
