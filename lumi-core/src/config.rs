use embassy_time::Duration;

use crate::{climate::TemperatureUnit, measure::Threshold};

/// Shortest reading delay the sensors are rated for.
pub const MIN_READING_DELAY: Duration = Duration::from_millis(1_000);

/// Settings of one sampling/indicator pair, fixed for the lifetime of the program.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub reading_delay: Duration,
    /// How long the indicator stays lit per completed cycle.
    pub indicator_pulse: Duration,
    /// Largest percent delta still considered valid.
    pub validity_threshold: Threshold,
    /// Log every sample.
    pub verbose: bool,
    pub temperature_unit: TemperatureUnit,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleConfig {
    /// The board defaults: a reading every 15 s, a 125 ms pulse, 25 % threshold.
    pub const fn new() -> Self {
        Self {
            reading_delay: Duration::from_millis(15_000),
            indicator_pulse: Duration::from_millis(125),
            validity_threshold: Threshold::DEFAULT,
            verbose: false,
            temperature_unit: TemperatureUnit::Fahrenheit,
        }
    }

    pub const fn with_reading_delay(mut self, reading_delay: Duration) -> Self {
        self.reading_delay = reading_delay;
        self
    }

    pub const fn with_indicator_pulse(mut self, indicator_pulse: Duration) -> Self {
        self.indicator_pulse = indicator_pulse;
        self
    }

    pub const fn with_validity_threshold(mut self, threshold: Threshold) -> Self {
        self.validity_threshold = threshold;
        self
    }

    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub const fn with_temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.temperature_unit = unit;
        self
    }

    /// Whether the reading delay is shorter than [`MIN_READING_DELAY`].
    pub fn reading_delay_below_floor(&self) -> bool {
        self.reading_delay < MIN_READING_DELAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_defaults() {
        let config = CycleConfig::default();

        assert_eq!(config.reading_delay.as_millis(), 15_000);
        assert_eq!(config.indicator_pulse.as_millis(), 125);
        assert_eq!(config.validity_threshold.as_hundredths(), 2_500);
        assert!(!config.verbose);
        assert_eq!(config.temperature_unit, TemperatureUnit::Fahrenheit);
        assert!(!config.reading_delay_below_floor());
    }

    #[test]
    fn builders_replace_single_fields() {
        let config = CycleConfig::new()
            .with_reading_delay(Duration::from_millis(50))
            .with_indicator_pulse(Duration::from_millis(10))
            .with_validity_threshold(Threshold::from_hundredths(1_000))
            .with_verbose(true)
            .with_temperature_unit(TemperatureUnit::Celsius);

        assert_eq!(config.reading_delay.as_millis(), 50);
        assert_eq!(config.indicator_pulse.as_millis(), 10);
        assert_eq!(config.validity_threshold.as_hundredths(), 1_000);
        assert!(config.verbose);
        assert_eq!(config.temperature_unit, TemperatureUnit::Celsius);
        assert!(config.reading_delay_below_floor());
    }
}
