// Host access traits for metric collection
use crate::domain::stats::MemoryCounters;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Shortest CPU sampling window that yields a meaningful percentage
pub const MIN_CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum HostError {
    #[error("CPU utilization unavailable: host reported no processors")]
    NoProcessors,
    #[error("memory counters unavailable: host reported zero total memory")]
    NoMemory,
    #[error("host handle is poisoned")]
    Poisoned,
}

#[async_trait]
pub trait HostMetrics: Send + Sync {
    /// System-wide CPU utilization sampled over `window`, in percent.
    /// Windows shorter than `MIN_CPU_SAMPLE_WINDOW` are stretched to it.
    async fn sample_cpu_percent(&self, window: Duration) -> Result<f64, HostError>;

    /// Current physical memory counters
    fn memory(&self) -> Result<MemoryCounters, HostError>;
}

/// One way of obtaining the CPU temperature.
///
/// `None` means the strategy has nothing to offer on this host right now;
/// it is never an error from the caller's point of view.
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    fn name(&self) -> &str;

    async fn read_celsius(&self) -> Option<f64>;
}
