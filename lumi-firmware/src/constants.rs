use embassy_time::Duration;
use lumi_core::{CycleConfig, TemperatureUnit, Threshold};

pub const LUMI_READING_DELAY_MS: u64 = 15_000;
pub const LUMI_INDICATOR_PULSE_MS: u64 = 125;
/// In hundredths of a percent.
pub const LUMI_VALIDITY_THRESHOLD: u32 = 2_500;
pub const LUMI_VERBOSE: bool = false;

pub const LUMI_DISPLAY_I2C_HZ: u32 = 100_000;

/// The DHT11 needs a second after power up before it answers.
pub const LUMI_SENSOR_SETTLE_MS: u64 = 1_000;

pub static LUMI_CONFIG: CycleConfig = CycleConfig::new()
    .with_reading_delay(Duration::from_millis(LUMI_READING_DELAY_MS))
    .with_indicator_pulse(Duration::from_millis(LUMI_INDICATOR_PULSE_MS))
    .with_validity_threshold(Threshold::from_hundredths(LUMI_VALIDITY_THRESHOLD))
    .with_verbose(LUMI_VERBOSE)
    .with_temperature_unit(TemperatureUnit::Fahrenheit);
