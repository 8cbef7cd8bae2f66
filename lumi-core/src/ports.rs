//! Collaborators the sample pipeline drives.
//!
//! Hardware adapters implement these; tests substitute in-memory fakes.

use core::future::Future;

use crate::{climate::ClimateSample, readout::Readout};

/// Which of the two redundant LDRs to read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LdrChannel {
    First,
    Second,
}

/// The two redundant light sensors.
///
/// Readings are 16-bit, with `u16::MAX` at full scale.
pub trait LightSensors {
    type Error;

    /// Take one reading from one of the sensors.
    fn read(&mut self, channel: LdrChannel) -> impl Future<Output = Result<u16, Self::Error>>;
}

/// The temperature/humidity sensor.
pub trait ClimateSensor {
    type Error;

    /// Trigger a measurement and return it once available.
    fn measure(&mut self) -> impl Future<Output = Result<ClimateSample, Self::Error>>;
}

/// The screen showing the latest readout.
///
/// An update completes before the pipeline starts its reading delay, so a slow
/// display stretches the cycle.
pub trait ReadoutDisplay {
    type Error;

    fn update(&mut self, readout: &Readout) -> impl Future<Output = Result<(), Self::Error>>;
}
