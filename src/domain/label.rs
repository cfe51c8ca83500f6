// Display label domain models
use super::color::Rgba;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Ram,
    Temperature,
}

impl MetricKind {
    /// Name shown in front of the value on the strip
    pub fn display_name(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Ram => "RAM",
            MetricKind::Temperature => "Temp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLabel {
    pub kind: MetricKind,
    pub text: String,
    pub color: Rgba,
    pub font_size: u32,
}

impl DisplayLabel {
    pub fn new(kind: MetricKind, text: String, color: Rgba, font_size: u32) -> Self {
        Self {
            kind,
            text,
            color,
            font_size,
        }
    }
}

/// Everything rendered for one tick. Superseded wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelFrame {
    pub captured_at: DateTime<Utc>,
    pub labels: [DisplayLabel; 3],
}

impl LabelFrame {
    pub fn new(captured_at: DateTime<Utc>, labels: [DisplayLabel; 3]) -> Self {
        Self {
            captured_at,
            labels,
        }
    }
}
