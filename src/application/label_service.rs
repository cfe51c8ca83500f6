// Label service - Turns a stats snapshot into the three strip labels
use crate::domain::color::{TemperatureRange, color_for_percentage};
use crate::domain::label::{DisplayLabel, MetricKind};
use crate::domain::stats::StatsSnapshot;

pub const DEFAULT_FONT_SIZE: u32 = 14;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone)]
pub struct LabelBuilder {
    font_size: u32,
    temperature_range: TemperatureRange,
}

impl Default for LabelBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE, TemperatureRange::default())
    }
}

impl LabelBuilder {
    pub fn new(font_size: u32, temperature_range: TemperatureRange) -> Self {
        Self {
            font_size,
            temperature_range,
        }
    }

    /// CPU, RAM and temperature labels, always in that order.
    pub fn build_labels(&self, snapshot: &StatsSnapshot) -> [DisplayLabel; 3] {
        let cpu = DisplayLabel::new(
            MetricKind::Cpu,
            format!("{}: {:.1}%", MetricKind::Cpu.display_name(), snapshot.cpu_percent),
            color_for_percentage(snapshot.cpu_percent),
            self.font_size,
        );

        let ram = DisplayLabel::new(
            MetricKind::Ram,
            format!("{}: {:.1}%", MetricKind::Ram.display_name(), snapshot.ram.percent),
            color_for_percentage(snapshot.ram.percent),
            self.font_size,
        );

        let temp_name = MetricKind::Temperature.display_name();
        let temp_text = match snapshot.temperature_celsius {
            Some(t) => format!("{}: {:.1}°C", temp_name, t),
            None => format!("{}: {}", temp_name, NOT_AVAILABLE),
        };
        let temperature = DisplayLabel::new(
            MetricKind::Temperature,
            temp_text,
            self.temperature_range.color_for(snapshot.temperature_celsius),
            self.font_size,
        );

        [cpu, ram, temperature]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::{Rgba, color_for_temperature};
    use crate::domain::stats::RamUsage;

    fn snapshot(temperature: Option<f64>) -> StatsSnapshot {
        StatsSnapshot::new(23.4, RamUsage::new(61.2, 9.79, 16.0, 6.21), temperature)
    }

    fn assert_close(actual: Rgba, expected: Rgba) {
        let eps = 1e-9;
        assert!((actual.r - expected.r).abs() < eps, "{:?} != {:?}", actual, expected);
        assert!((actual.g - expected.g).abs() < eps, "{:?} != {:?}", actual, expected);
        assert!((actual.b - expected.b).abs() < eps, "{:?} != {:?}", actual, expected);
        assert_eq!(actual.a, expected.a);
    }

    #[test]
    fn test_labels_with_temperature() {
        let labels = LabelBuilder::default().build_labels(&snapshot(Some(55.0)));

        assert_eq!(labels[0].kind, MetricKind::Cpu);
        assert_eq!(labels[0].text, "CPU: 23.4%");
        assert_close(labels[0].color, Rgba::opaque(0.468, 1.0, 0.0));

        assert_eq!(labels[1].kind, MetricKind::Ram);
        assert_eq!(labels[1].text, "RAM: 61.2%");
        assert_close(labels[1].color, Rgba::opaque(1.0, 0.776, 0.0));

        assert_eq!(labels[2].kind, MetricKind::Temperature);
        assert_eq!(labels[2].text, "Temp: 55.0°C");
        assert_close(labels[2].color, color_for_percentage(25.0 / 70.0 * 100.0));
        assert_eq!(labels[2].color, color_for_temperature(Some(55.0)));

        assert!(labels.iter().all(|l| l.font_size == DEFAULT_FONT_SIZE));
    }

    #[test]
    fn test_labels_without_temperature() {
        let labels = LabelBuilder::default().build_labels(&snapshot(None));

        assert_eq!(labels.len(), 3);
        assert_eq!(labels[2].kind, MetricKind::Temperature);
        assert_eq!(labels[2].text, "Temp: N/A");
        assert_eq!(labels[2].color, Rgba::opaque(0.7, 0.7, 0.7));
    }

    #[test]
    fn test_build_labels_is_deterministic() {
        let builder = LabelBuilder::default();
        let snap = snapshot(Some(71.3));
        assert_eq!(builder.build_labels(&snap), builder.build_labels(&snap));
    }

    #[test]
    fn test_one_decimal_formatting() {
        let snap = StatsSnapshot::new(5.0, RamUsage::new(100.0, 16.0, 16.0, 0.0), Some(42.26));
        let labels = LabelBuilder::default().build_labels(&snap);

        assert_eq!(labels[0].text, "CPU: 5.0%");
        assert_eq!(labels[1].text, "RAM: 100.0%");
        assert_eq!(labels[2].text, "Temp: 42.3°C");
    }

    #[test]
    fn test_font_size_and_range_are_configurable() {
        let builder = LabelBuilder::new(18, TemperatureRange::new(40.0, 80.0));
        let labels = builder.build_labels(&snapshot(Some(60.0)));

        assert!(labels.iter().all(|l| l.font_size == 18));
        assert_close(labels[2].color, Rgba::opaque(1.0, 1.0, 0.0));
    }
}
