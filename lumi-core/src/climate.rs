//! Temperature and humidity as shown on the readout.

use core::fmt;

use crate::measure::write_hundredths;

/// Unit the temperature is displayed in.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Suffix used on the readout.
    pub const fn symbol(&self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }
}

/// A climate sensor measurement as delivered by the driver.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateSample {
    millidegrees_celsius: i32,
    millipercent: i32,
}

impl ClimateSample {
    #[inline]
    pub const fn new(millidegrees_celsius: i32, millipercent: i32) -> Self {
        Self {
            millidegrees_celsius,
            millipercent,
        }
    }

    /// Return temperature in milli-degrees celsius.
    #[inline]
    pub const fn as_millidegrees_celsius(&self) -> i32 {
        self.millidegrees_celsius
    }

    /// Return relative humidity in 1/1000 %RH.
    #[inline]
    pub const fn as_millipercent(&self) -> i32 {
        self.millipercent
    }
}

/// A climate sample converted to the display unit, with 0.01 resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    temperature: i32,
    unit: TemperatureUnit,
    humidity: i32,
}

impl ClimateReading {
    /// Convert a sample, rounding half away from zero to hundredths.
    ///
    /// Humidity is clamped to `0..=100 %RH`.
    pub const fn from_sample(sample: ClimateSample, unit: TemperatureUnit) -> Self {
        let millidegrees = sample.millidegrees_celsius as i64;
        let temperature = match unit {
            TemperatureUnit::Celsius => div_round(millidegrees, 10),
            // F = C * 9 / 5 + 32
            TemperatureUnit::Fahrenheit => div_round(millidegrees * 9, 50) + 3_200,
        };

        let humidity = div_round(sample.millipercent as i64, 10);
        let humidity = if humidity < 0 {
            0
        } else if humidity > 10_000 {
            10_000
        } else {
            humidity
        };

        Self {
            temperature: temperature as i32,
            unit,
            humidity: humidity as i32,
        }
    }

    /// Temperature in hundredths of a degree of [`Self::unit`].
    #[inline]
    pub const fn temperature_hundredths(&self) -> i32 {
        self.temperature
    }

    #[inline]
    pub fn temperature(&self) -> f32 {
        self.temperature as f32 / 100.0
    }

    #[inline]
    pub const fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Relative humidity in hundredths of a percent.
    #[inline]
    pub const fn humidity_hundredths(&self) -> i32 {
        self.humidity
    }

    #[inline]
    pub fn humidity(&self) -> f32 {
        self.humidity as f32 / 100.0
    }

    /// Formats the temperature with two decimals, without the unit.
    pub const fn display_temperature(&self) -> Hundredths {
        Hundredths(self.temperature as i64)
    }

    /// Formats the humidity with two decimals.
    pub const fn display_humidity(&self) -> Hundredths {
        Hundredths(self.humidity as i64)
    }
}

/// Display adapter for a fixed point value with two decimals.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hundredths(i64);

impl fmt::Display for Hundredths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hundredths(f, self.0)
    }
}

const fn div_round(numerator: i64, denominator: i64) -> i64 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::format;

    #[test]
    fn celsius_keeps_two_decimals() {
        let reading =
            ClimateReading::from_sample(ClimateSample::new(23_730, 62_968), TemperatureUnit::Celsius);

        assert_eq!(reading.temperature_hundredths(), 2_373);
        assert_eq!(reading.humidity_hundredths(), 6_297);
        assert_eq!(reading.unit().symbol(), 'C');
    }

    #[test]
    fn fahrenheit_conversion() {
        let convert = |millidegrees| {
            ClimateReading::from_sample(
                ClimateSample::new(millidegrees, 0),
                TemperatureUnit::Fahrenheit,
            )
            .temperature_hundredths()
        };

        assert_eq!(convert(0), 3_200);
        assert_eq!(convert(25_000), 7_700);
        assert_eq!(convert(100_000), 21_200);
        assert_eq!(convert(-40_000), -4_000);
        // 23.73 C is 74.714 F
        assert_eq!(convert(23_730), 7_471);
    }

    #[test]
    fn humidity_is_clamped() {
        let high =
            ClimateReading::from_sample(ClimateSample::new(0, 120_000), TemperatureUnit::Celsius);
        let low = ClimateReading::from_sample(ClimateSample::new(0, -500), TemperatureUnit::Celsius);

        assert_eq!(high.humidity(), 100.0);
        assert_eq!(low.humidity(), 0.0);
    }

    #[test]
    fn negative_values_format_with_sign() {
        let reading =
            ClimateReading::from_sample(ClimateSample::new(-4_050, 55_000), TemperatureUnit::Celsius);

        assert_eq!(format!("{}", reading.display_temperature()), "-4.05");
        assert_eq!(format!("{}", reading.display_humidity()), "55.00");
    }
}
