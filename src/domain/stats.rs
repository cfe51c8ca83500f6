// Host statistics domain models
use serde::Serialize;
use std::fmt;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Raw physical memory counters as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCounters {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RamUsage {
    pub percent: f64,
    pub used_gb: f64,
    pub total_gb: f64,
    pub available_gb: f64,
}

impl RamUsage {
    pub fn new(percent: f64, used_gb: f64, total_gb: f64, available_gb: f64) -> Self {
        Self {
            percent,
            used_gb,
            total_gb,
            available_gb,
        }
    }

    /// Percent is the share of memory that is not available, like `free` reports it.
    pub fn from_counters(counters: MemoryCounters) -> Self {
        let total = counters.total_bytes;
        let used = counters.used_bytes.min(total);
        let available = counters.available_bytes.min(total);

        let percent = if total == 0 {
            0.0
        } else {
            round_to((total - available) as f64 / total as f64 * 100.0, 1)
        };

        Self {
            percent,
            used_gb: bytes_to_gb(used),
            total_gb: bytes_to_gb(total),
            available_gb: bytes_to_gb(available),
        }
    }
}

/// One poll's worth of host metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub cpu_percent: f64,
    pub ram: RamUsage,
    pub temperature_celsius: Option<f64>,
}

impl StatsSnapshot {
    pub fn new(cpu_percent: f64, ram: RamUsage, temperature_celsius: Option<f64>) -> Self {
        Self {
            cpu_percent,
            ram,
            temperature_celsius,
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cpu={:.1}% ram={:.1}% ({} GB / {} GB, {} GB available)",
            self.cpu_percent,
            self.ram.percent,
            self.ram.used_gb,
            self.ram.total_gb,
            self.ram.available_gb
        )?;
        match self.temperature_celsius {
            Some(t) => write!(f, " temp={:.1}°C", t),
            None => write!(f, " temp=unavailable"),
        }
    }
}

/// Byte count to gigabytes (1024³), rounded to 2 decimals
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
