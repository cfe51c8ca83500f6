// Builds the ordered temperature acquisition strategies from configuration
use crate::application::host_metrics::TemperatureSource;
use crate::infrastructure::command_temperature::CommandTemperatureSource;
use crate::infrastructure::config::{TemperatureSettings, TemperatureStrategy};
use crate::infrastructure::sysinfo_host::SensorTemperatureSource;
use std::sync::Arc;

pub fn build_temperature_sources(
    settings: &TemperatureSettings,
) -> Vec<Arc<dyn TemperatureSource>> {
    let mut sources: Vec<Arc<dyn TemperatureSource>> = Vec::new();
    let mut seen = Vec::new();

    for strategy in &settings.strategies {
        if seen.contains(strategy) {
            tracing::warn!("Ignoring duplicate temperature strategy {:?}", strategy);
            continue;
        }
        seen.push(*strategy);

        match strategy {
            TemperatureStrategy::Command => sources.push(Arc::new(CommandTemperatureSource::new(
                settings.command.clone(),
                settings.args.clone(),
                settings.command_timeout(),
            ))),
            TemperatureStrategy::Sensors => sources.push(Arc::new(SensorTemperatureSource::new(
                settings.sensor_group.clone(),
            ))),
        }
    }

    if sources.is_empty() {
        tracing::warn!(
            "No temperature strategies configured, temperature will show as unavailable"
        );
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_command_then_sensors() {
        let sources = build_temperature_sources(&TemperatureSettings::default());
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["osx-cpu-temp", "sensors"]);
    }

    #[test]
    fn test_order_and_duplicates() {
        let settings = TemperatureSettings {
            strategies: vec![
                TemperatureStrategy::Sensors,
                TemperatureStrategy::Command,
                TemperatureStrategy::Sensors,
            ],
            command: "istats".to_string(),
            ..TemperatureSettings::default()
        };

        let sources = build_temperature_sources(&settings);
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["sensors", "istats"]);
    }

    #[test]
    fn test_no_strategies() {
        let settings = TemperatureSettings {
            strategies: Vec::new(),
            ..TemperatureSettings::default()
        };
        assert!(build_temperature_sources(&settings).is_empty());
    }
}
