// sysinfo-backed host access: CPU, memory and sensor temperatures
use crate::application::host_metrics::{
    HostError, HostMetrics, MIN_CPU_SAMPLE_WINDOW, TemperatureSource,
};
use crate::domain::stats::{MemoryCounters, round_to};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::{Components, CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Keeps one `System` around so CPU usage has a baseline between refreshes.
pub struct SysinfoHost {
    system: Mutex<System>,
}

impl SysinfoHost {
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(
            RefreshKind::new()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );
        system.refresh_cpu_usage();
        system.refresh_memory();

        Self {
            system: Mutex::new(system),
        }
    }

    fn with_system<T>(&self, f: impl FnOnce(&mut System) -> T) -> Result<T, HostError> {
        let mut system = self.system.lock().map_err(|_| HostError::Poisoned)?;
        Ok(f(&mut system))
    }
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostMetrics for SysinfoHost {
    async fn sample_cpu_percent(&self, window: Duration) -> Result<f64, HostError> {
        let window = window
            .max(MIN_CPU_SAMPLE_WINDOW)
            .max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

        // Usage is the delta between two refreshes, so refresh at both ends of the window
        self.with_system(|sys| sys.refresh_cpu_usage())?;
        tokio::time::sleep(window).await;

        self.with_system(|sys| {
            sys.refresh_cpu_usage();
            if sys.cpus().is_empty() {
                return Err(HostError::NoProcessors);
            }
            Ok(f64::from(sys.global_cpu_usage()))
        })?
    }

    fn memory(&self) -> Result<MemoryCounters, HostError> {
        let counters = self.with_system(|sys| {
            sys.refresh_memory();
            MemoryCounters {
                total_bytes: sys.total_memory(),
                used_bytes: sys.used_memory(),
                available_bytes: sys.available_memory(),
            }
        })?;

        if counters.total_bytes == 0 {
            return Err(HostError::NoMemory);
        }
        Ok(counters)
    }
}

/// Averages the readings of one sensor group, e.g. every `coretemp` core.
pub struct SensorTemperatureSource {
    group: String,
    components: Mutex<Components>,
}

impl SensorTemperatureSource {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            components: Mutex::new(Components::new_with_refreshed_list()),
        }
    }
}

#[async_trait]
impl TemperatureSource for SensorTemperatureSource {
    fn name(&self) -> &str {
        "sensors"
    }

    async fn read_celsius(&self) -> Option<f64> {
        let mut components = match self.components.lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::warn!("Sensor component list is poisoned");
                return None;
            }
        };
        components.refresh();

        let readings = components
            .list()
            .iter()
            .map(|c| (c.label(), c.temperature()));
        let average = average_group_temperature(readings, &self.group);

        if average.is_none() {
            tracing::debug!("No readings for sensor group {}", self.group);
        }
        average
    }
}

/// Mean of the finite readings whose label belongs to `group`, rounded to 1 decimal.
///
/// sysinfo labels components as "<chip> <sensor>" on Linux ("coretemp Core 0"),
/// so a reading belongs to the group when its label starts with the group name.
pub fn average_group_temperature<'a>(
    readings: impl IntoIterator<Item = (&'a str, f32)>,
    group: &str,
) -> Option<f64> {
    let group = group.to_lowercase();
    let (sum, count) = readings
        .into_iter()
        .filter(|(label, _)| label.to_lowercase().starts_with(&group))
        .map(|(_, celsius)| f64::from(celsius))
        .filter(|celsius| celsius.is_finite())
        .fold((0.0, 0usize), |(sum, count), celsius| (sum + celsius, count + 1));

    if count == 0 {
        return None;
    }
    Some(round_to(sum / count as f64, 1))
}
