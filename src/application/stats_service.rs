// Stats service - Use case for collecting one snapshot of host metrics
use crate::application::host_metrics::{HostMetrics, MIN_CPU_SAMPLE_WINDOW, TemperatureSource};
use crate::domain::stats::{RamUsage, StatsSnapshot, round_to};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct StatsCollector {
    host: Arc<dyn HostMetrics>,
    temperature_sources: Vec<Arc<dyn TemperatureSource>>,
    cpu_window: Duration,
}

impl StatsCollector {
    /// `cpu_window` is raised to `MIN_CPU_SAMPLE_WINDOW` when shorter.
    pub fn new(
        host: Arc<dyn HostMetrics>,
        temperature_sources: Vec<Arc<dyn TemperatureSource>>,
        cpu_window: Duration,
    ) -> Self {
        Self {
            host,
            temperature_sources,
            cpu_window: cpu_window.max(MIN_CPU_SAMPLE_WINDOW),
        }
    }

    /// Collect CPU, memory and temperature. Blocks for at least the CPU window.
    ///
    /// Only CPU and memory failures are errors; a missing temperature is `None`.
    pub async fn collect(&self) -> Result<StatsSnapshot> {
        let cpu_percent = self
            .host
            .sample_cpu_percent(self.cpu_window)
            .await
            .context("Failed to sample CPU utilization")?;
        let cpu_percent = round_to(cpu_percent.clamp(0.0, 100.0), 1);

        let counters = self.host.memory().context("Failed to read memory counters")?;
        let ram = RamUsage::from_counters(counters);

        let temperature = self.read_temperature().await;

        Ok(StatsSnapshot::new(cpu_percent, ram, temperature))
    }

    /// Try each temperature source in order, first reading wins
    async fn read_temperature(&self) -> Option<f64> {
        for source in &self.temperature_sources {
            if let Some(celsius) = source.read_celsius().await {
                tracing::trace!("Temperature {:.1}°C from {}", celsius, source.name());
                return Some(celsius);
            }
            tracing::debug!("Temperature source {} gave no reading", source.name());
        }
        None
    }
}
