// Infrastructure configuration - File and environment settings with validation
use crate::application::host_metrics::MIN_CPU_SAMPLE_WINDOW;
use crate::domain::color::TemperatureRange;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "STRIP_MONITOR";

/// Upper bound for the external temperature utility
pub const MAX_COMMAND_TIMEOUT_MS: u64 = 2000;
pub const MIN_CPU_SAMPLE_WINDOW_MS: u64 = MIN_CPU_SAMPLE_WINDOW.as_millis() as u64;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("poll_interval_ms must be greater than zero")]
    ZeroPollInterval,
    #[error("cpu.sample_window_ms must be at least 1000, got {0}")]
    CpuWindowTooShort(u64),
    #[error("display.font_size must be greater than zero")]
    ZeroFontSize,
    #[error("temperature.command_timeout_ms must be within 1..=2000, got {0}")]
    CommandTimeout(u64),
    #[error("temperature.sensor_group must not be empty")]
    EmptySensorGroup,
    #[error("temperature.max_celsius ({max}) must be greater than min_celsius ({min})")]
    TemperatureRange { min: f64, max: f64 },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
    pub cpu: CpuSettings,
    pub display: DisplaySettings,
    pub temperature: TemperatureSettings,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            cpu: CpuSettings::default(),
            display: DisplaySettings::default(),
            temperature: TemperatureSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CpuSettings {
    pub sample_window_ms: u64,
}

impl Default for CpuSettings {
    fn default() -> Self {
        Self {
            sample_window_ms: MIN_CPU_SAMPLE_WINDOW_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub font_size: u32,
    pub output: OutputFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_size: 14,
            output: OutputFormat::Terminal,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureStrategy {
    /// External utility printing e.g. `52.3°C`
    Command,
    /// OS sensor API, averaged over a sensor group
    Sensors,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TemperatureSettings {
    pub strategies: Vec<TemperatureStrategy>,
    pub command: String,
    pub args: Vec<String>,
    pub command_timeout_ms: u64,
    pub sensor_group: String,
    pub min_celsius: f64,
    pub max_celsius: f64,
}

impl Default for TemperatureSettings {
    fn default() -> Self {
        Self {
            strategies: vec![TemperatureStrategy::Command, TemperatureStrategy::Sensors],
            command: "osx-cpu-temp".to_string(),
            args: Vec::new(),
            command_timeout_ms: MAX_COMMAND_TIMEOUT_MS,
            sensor_group: "coretemp".to_string(),
            min_celsius: 30.0,
            max_celsius: 100.0,
        }
    }
}

impl TemperatureSettings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn range(&self) -> TemperatureRange {
        TemperatureRange::new(self.min_celsius, self.max_celsius)
    }
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn cpu_sample_window(&self) -> Duration {
        Duration::from_millis(self.cpu.sample_window_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.cpu.sample_window_ms < MIN_CPU_SAMPLE_WINDOW_MS {
            return Err(ConfigError::CpuWindowTooShort(self.cpu.sample_window_ms));
        }
        if self.display.font_size == 0 {
            return Err(ConfigError::ZeroFontSize);
        }

        let temp = &self.temperature;
        if temp.command_timeout_ms == 0 || temp.command_timeout_ms > MAX_COMMAND_TIMEOUT_MS {
            return Err(ConfigError::CommandTimeout(temp.command_timeout_ms));
        }
        if temp.sensor_group.trim().is_empty() {
            return Err(ConfigError::EmptySensorGroup);
        }
        // Negated so NaN bounds are rejected too
        if !(temp.max_celsius > temp.min_celsius) {
            return Err(ConfigError::TemperatureRange {
                min: temp.min_celsius,
                max: temp.max_celsius,
            });
        }

        Ok(())
    }
}

/// Load from an optional config file (extension resolved by `config`) plus
/// `STRIP_MONITOR_*` environment overrides, e.g. `STRIP_MONITOR_TEMPERATURE__SENSOR_GROUP`.
pub fn load_monitor_config(path: &str) -> anyhow::Result<MonitorConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    finish(builder)
}

/// Parse a TOML document on its own, without file or environment lookups
pub fn parse_monitor_config(toml: &str) -> anyhow::Result<MonitorConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));

    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<MonitorConfig> {
    let settings = builder.build()?;
    let config: MonitorConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
