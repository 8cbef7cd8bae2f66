//! Derivation of a validated measurement from the two redundant LDR readings.
//!
//! All values are kept in fixed point so that rounding is exact and the
//! validity boundary is decided on integers rather than floats.

use core::fmt;

/// Raw readings from both LDRs, taken during the same cycle.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPair {
    /// Reading of the first LDR.
    pub first: u16,
    /// Reading of the second LDR.
    pub second: u16,
}

impl SensorPair {
    #[inline]
    pub const fn new(first: u16, second: u16) -> Self {
        Self { first, second }
    }
}

/// Average of a sensor pair in sensor counts.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Average(u16);

impl Average {
    /// Wrap an already averaged value.
    #[inline]
    pub const fn from_counts(counts: u16) -> Self {
        Self(counts)
    }

    /// Return the average in sensor counts.
    #[inline]
    pub const fn as_counts(&self) -> u16 {
        self.0
    }

    /// Return the average as a float. Always a whole number.
    #[inline]
    pub const fn as_f32(&self) -> f32 {
        self.0 as f32
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A percentage in hundredths of a percent (`4000` is `40.00 %`).
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PercentDelta(u32);

impl PercentDelta {
    /// No difference between the two readings. Also returned for a zero average.
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Return the value in hundredths of a percent.
    #[inline]
    pub const fn as_hundredths(&self) -> u32 {
        self.0
    }

    /// Return the value in percent, carrying two decimal places.
    #[inline]
    pub fn as_percent(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl fmt::Display for PercentDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hundredths(f, i64::from(self.0))
    }
}

/// Largest acceptable percent delta, inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Threshold(u32);

impl Threshold {
    /// 25.00 %, the factory setting of the board.
    pub const DEFAULT: Self = Self(2_500);

    #[inline]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    /// Convert a percentage, rounded to the nearest hundredth.
    ///
    /// Negative and NaN inputs become `0.00 %`, so only identical readings pass.
    pub fn from_percent(percent: f32) -> Self {
        let hundredths = percent * 100.0;
        if !(hundredths > 0.0) {
            return Self(0);
        }

        Self((hundredths + 0.5) as u32)
    }

    #[inline]
    pub const fn as_hundredths(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_percent(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything derived from one [`SensorPair`].
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DerivedMeasurement {
    pub average: Average,
    /// `|first - second|`
    pub raw_delta: u16,
    pub percent_delta: PercentDelta,
    pub is_valid: bool,
}

impl DerivedMeasurement {
    /// Run the whole derivation for a pair of readings.
    ///
    /// ```
    /// use lumi_core::{DerivedMeasurement, SensorPair, Threshold};
    ///
    /// let derived = DerivedMeasurement::derive(SensorPair::new(20_000, 30_000), Threshold::DEFAULT);
    ///
    /// assert_eq!(derived.average.as_counts(), 25_000);
    /// assert_eq!(derived.raw_delta, 10_000);
    /// assert_eq!(derived.percent_delta.as_hundredths(), 4_000);
    /// assert!(!derived.is_valid);
    /// ```
    pub const fn derive(pair: SensorPair, threshold: Threshold) -> Self {
        let average = average(pair.first, pair.second);
        let raw_delta = raw_delta(pair.first, pair.second);
        let percent_delta = percent_delta(raw_delta, average);

        Self {
            average,
            raw_delta,
            percent_delta,
            is_valid: is_valid(percent_delta, threshold),
        }
    }
}

/// Average of two readings, rounded to the nearest count with ties to even.
///
/// ```
/// use lumi_core::average;
///
/// assert_eq!(average(24_000, 26_000).as_counts(), 25_000);
/// assert_eq!(average(1, 2).as_counts(), 2);
/// assert_eq!(average(2, 3).as_counts(), 2);
/// ```
pub const fn average(first: u16, second: u16) -> Average {
    let sum = first as u32 + second as u32;
    let half = sum / 2;
    let rounded = if sum % 2 == 1 && half % 2 == 1 {
        half + 1
    } else {
        half
    };

    // Never above u16::MAX: an odd sum has an even half at the top of the range.
    Average(rounded as u16)
}

/// Absolute difference between two readings.
#[inline]
pub const fn raw_delta(first: u16, second: u16) -> u16 {
    first.abs_diff(second)
}

/// `raw_delta / average * 100`, rounded to two decimals with ties to even.
///
/// A zero average (both readings at most one count) returns
/// [`PercentDelta::ZERO`] instead of dividing by zero.
///
/// ```
/// use lumi_core::{percent_delta, Average, PercentDelta};
///
/// assert_eq!(percent_delta(2_000, Average::from_counts(25_000)).as_hundredths(), 800);
/// assert_eq!(percent_delta(1, Average::from_counts(0)), PercentDelta::ZERO);
/// ```
pub const fn percent_delta(raw_delta: u16, average: Average) -> PercentDelta {
    let divisor = average.0 as u32;
    if divisor == 0 {
        return PercentDelta::ZERO;
    }

    // 65_535 * 10_000 still fits a u32.
    let scaled = raw_delta as u32 * 10_000;
    let quotient = scaled / divisor;
    let twice_remainder = 2 * (scaled % divisor);

    let rounds_up =
        twice_remainder > divisor || (twice_remainder == divisor && quotient % 2 == 1);

    PercentDelta(if rounds_up { quotient + 1 } else { quotient })
}

/// Whether a percent delta is within the threshold. The boundary is valid.
#[inline]
pub const fn is_valid(percent_delta: PercentDelta, threshold: Threshold) -> bool {
    percent_delta.0 <= threshold.0
}

/// Write a fixed point value with two decimals, e.g. `-405` as `-4.05`.
pub(crate) fn write_hundredths(f: &mut fmt::Formatter<'_>, value: i64) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();

    write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}
