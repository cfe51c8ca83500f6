// External temperature utility (e.g. osx-cpu-temp) run with a bounded timeout
use crate::application::host_metrics::TemperatureSource;
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

const CELSIUS_SUFFIX: &str = "°C";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("unparsable temperature output {0:?}")]
    Unparsable(String),
}

#[derive(Debug, Clone)]
pub struct CommandTemperatureSource {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandTemperatureSource {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Run the utility once and parse its stdout.
    ///
    /// The child is spawned with `kill_on_drop`, so when the timeout fires and
    /// the output future is dropped the process is killed and reaped.
    pub async fn run(&self) -> Result<f64, CommandError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(CommandError::TimedOut {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        parse_celsius(&String::from_utf8_lossy(&output.stdout))
    }
}

#[async_trait]
impl TemperatureSource for CommandTemperatureSource {
    fn name(&self) -> &str {
        &self.program
    }

    async fn read_celsius(&self) -> Option<f64> {
        match self.run().await {
            Ok(celsius) => Some(celsius),
            Err(e) => {
                tracing::debug!("Temperature command unavailable: {}", e);
                None
            }
        }
    }
}

/// Parse output like `52.3°C` (surrounding whitespace allowed)
pub fn parse_celsius(output: &str) -> Result<f64, CommandError> {
    let trimmed = output.trim();
    let number = trimmed.strip_suffix(CELSIUS_SUFFIX).unwrap_or(trimmed).trim();

    match number.parse::<f64>() {
        Ok(celsius) if celsius.is_finite() => Ok(celsius),
        _ => Err(CommandError::Unparsable(trimmed.to_string())),
    }
}
