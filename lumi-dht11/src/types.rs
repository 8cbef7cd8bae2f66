/// A temperature measurement.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(i32);

/// A humidity measurement.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Humidity(i32);

/// A combined temperature / humidity measurement.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// The measured temperature.
    pub temperature: Temperature,
    /// The measured humidity.
    pub humidity: Humidity,
}

/// The 40 bit frame sent by the sensor, in transmission order.
///
/// Humidity integral and decimal part, temperature integral and decimal part,
/// then the checksum.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame(pub [u8; 5]);

impl RawFrame {
    /// Whether the checksum byte matches the four data bytes.
    pub const fn checksum_ok(&self) -> bool {
        let [a, b, c, d, sum] = self.0;
        a.wrapping_add(b).wrapping_add(c).wrapping_add(d) == sum
    }
}

impl From<RawFrame> for Measurement {
    fn from(frame: RawFrame) -> Self {
        let [hum_int, hum_dec, temp_int, temp_dec, _] = frame.0;

        Self {
            temperature: Temperature::from_raw(temp_int, temp_dec),
            humidity: Humidity::from_raw(hum_int, hum_dec),
        }
    }
}

impl Temperature {
    /// Create a new `Temperature` from the two temperature bytes of a frame.
    ///
    /// Bit 7 of the decimal byte marks a temperature below zero, the low
    /// nibble holds tenths of a degree.
    pub const fn from_raw(integral: u8, decimal: u8) -> Self {
        let magnitude = integral as i32 * 1000 + (decimal & 0x0F) as i32 * 100;

        if decimal & 0x80 != 0 {
            Self(-magnitude)
        } else {
            Self(magnitude)
        }
    }

    /// Create a new `Temperature` from milli-degrees celsius.
    pub const fn from_millidegrees_celsius(millidegrees: i32) -> Self {
        Self(millidegrees)
    }

    /// Return temperature in milli-degrees celsius.
    pub const fn as_millidegrees_celsius(&self) -> i32 {
        self.0
    }

    /// Return temperature in degrees celsius.
    pub const fn as_degrees_celsius(&self) -> f32 {
        self.0 as f32 / 1000.0
    }
}

impl Humidity {
    /// Create a new `Humidity` from the two humidity bytes of a frame.
    pub const fn from_raw(integral: u8, decimal: u8) -> Self {
        Self(integral as i32 * 1000 + decimal as i32 * 100)
    }

    /// Create a new `Humidity` from 1/1000 %RH.
    pub const fn from_millipercent(millipercent: i32) -> Self {
        Self(millipercent)
    }

    /// Return relative humidity in 1/1000 %RH.
    pub const fn as_millipercent(&self) -> i32 {
        self.0
    }

    /// Return relative humidity in %RH.
    pub const fn as_percent(&self) -> f32 {
        self.0 as f32 / 1000.0
    }
}
