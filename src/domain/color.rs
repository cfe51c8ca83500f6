// Severity color mapping - percentages and temperatures to RGBA
use serde::Serialize;

/// Color used when a metric has no reading.
pub const NEUTRAL_GRAY: Rgba = Rgba::opaque(0.7, 0.7, 0.7);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Channels scaled to 0-255, for terminals and other 8-bit surfaces
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Temperature domain mapped onto the 0-100% severity scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min_celsius: f64,
    pub max_celsius: f64,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            min_celsius: 30.0,
            max_celsius: 100.0,
        }
    }
}

impl TemperatureRange {
    /// `max_celsius` must be greater than `min_celsius`.
    pub fn new(min_celsius: f64, max_celsius: f64) -> Self {
        debug_assert!(
            max_celsius > min_celsius,
            "temperature range is empty: {}..{}",
            min_celsius,
            max_celsius
        );
        Self {
            min_celsius,
            max_celsius,
        }
    }

    /// Linear remap of a temperature into a percentage. Not clamped.
    pub fn to_percentage(&self, celsius: f64) -> f64 {
        (celsius - self.min_celsius) / (self.max_celsius - self.min_celsius) * 100.0
    }

    pub fn color_for(&self, celsius: Option<f64>) -> Rgba {
        match celsius {
            Some(t) => color_for_percentage(self.to_percentage(t)),
            None => NEUTRAL_GRAY,
        }
    }
}

/// Green (0%) -> yellow (50%) -> red (100%). Out-of-range input is clamped,
/// NaN counts as 100%.
pub fn color_for_percentage(percent: f64) -> Rgba {
    let percent = if percent.is_nan() {
        100.0
    } else {
        percent.clamp(0.0, 100.0)
    };

    if percent <= 50.0 {
        let ratio = percent / 50.0;
        Rgba::opaque(ratio, 1.0, 0.0)
    } else {
        let ratio = (percent - 50.0) / 50.0;
        Rgba::opaque(1.0, 1.0 - ratio, 0.0)
    }
}

/// Severity color for a CPU temperature over the default 30-100°C range.
pub fn color_for_temperature(celsius: Option<f64>) -> Rgba {
    TemperatureRange::default().color_for(celsius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Rgba, expected: Rgba) {
        let eps = 1e-9;
        assert!(
            (actual.r - expected.r).abs() < eps
                && (actual.g - expected.g).abs() < eps
                && (actual.b - expected.b).abs() < eps
                && (actual.a - expected.a).abs() < eps,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_gradient_anchors() {
        assert_eq!(color_for_percentage(0.0), Rgba::opaque(0.0, 1.0, 0.0));
        assert_eq!(color_for_percentage(50.0), Rgba::opaque(1.0, 1.0, 0.0));
        assert_eq!(color_for_percentage(100.0), Rgba::opaque(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(color_for_percentage(-10.0), color_for_percentage(0.0));
        assert_eq!(color_for_percentage(250.0), color_for_percentage(100.0));
    }

    #[test]
    fn test_nan_maps_to_red() {
        let color = color_for_percentage(f64::NAN);
        assert_eq!(color, color_for_percentage(100.0));
        assert!((0.0..=1.0).contains(&color.g));
    }

    #[test]
    fn test_channels_stay_in_unit_range() {
        for step in 0..=1000 {
            let color = color_for_percentage(step as f64 / 10.0);
            for channel in [color.r, color.g, color.b, color.a] {
                assert!((0.0..=1.0).contains(&channel), "channel {} at {}", channel, step);
            }
            assert_eq!(color.b, 0.0);
            assert_eq!(color.a, 1.0);
        }
    }

    #[test]
    fn test_continuous_at_midpoint() {
        let below = color_for_percentage(50.0 - 1e-9);
        let above = color_for_percentage(50.0 + 1e-9);
        assert_close(below, above);
        assert_close(below, Rgba::opaque(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_intermediate_values() {
        assert_close(color_for_percentage(23.4), Rgba::opaque(0.468, 1.0, 0.0));
        assert_close(color_for_percentage(61.2), Rgba::opaque(1.0, 0.776, 0.0));
    }

    #[test]
    fn test_missing_temperature_is_gray() {
        assert_eq!(color_for_temperature(None), Rgba::opaque(0.7, 0.7, 0.7));
    }

    #[test]
    fn test_temperature_anchors() {
        assert_close(color_for_temperature(Some(30.0)), color_for_percentage(0.0));
        assert_close(color_for_temperature(Some(65.0)), color_for_percentage(50.0));
        assert_close(color_for_temperature(Some(100.0)), color_for_percentage(100.0));
        // Outside the domain clamps through the percentage mapping
        assert_eq!(color_for_temperature(Some(10.0)), color_for_percentage(0.0));
        assert_eq!(color_for_temperature(Some(120.0)), color_for_percentage(100.0));
    }

    #[test]
    fn test_custom_temperature_range() {
        let range = TemperatureRange::new(40.0, 90.0);
        assert_close(range.color_for(Some(65.0)), color_for_percentage(50.0));
        assert_eq!(range.color_for(None), NEUTRAL_GRAY);
    }

    #[test]
    fn test_degenerate_range_still_yields_valid_color() {
        // Bypasses `new`; 0/0 becomes NaN and must not leak into the channels
        let range = TemperatureRange {
            min_celsius: 50.0,
            max_celsius: 50.0,
        };
        let color = range.color_for(Some(50.0));
        for channel in [color.r, color.g, color.b, color.a] {
            assert!((0.0..=1.0).contains(&channel));
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "temperature range is empty")]
    fn test_empty_range_is_rejected() {
        TemperatureRange::new(50.0, 50.0);
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(Rgba::opaque(1.0, 0.5, 0.0).to_rgb8(), (255, 128, 0));
        assert_eq!(Rgba::opaque(0.0, 1.0, 0.0).to_rgb8(), (0, 255, 0));
        assert_eq!(Rgba::opaque(-0.5, 2.0, 0.0).to_rgb8(), (0, 255, 0));
    }
}
