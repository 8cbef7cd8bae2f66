//! # Introduction
//!
//! A platform agnostic Rust driver for the Aosong DHT11 temperature / humidity
//! sensor, based on the
//! [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits.
//!
//! The sensor talks over a single open-drain data line with a pull-up. The
//! host pulls the line low for at least 18 ms to request a reading, then
//! releases it. The sensor answers with an 80 µs low / 80 µs high handshake
//! followed by 40 bits, each a 50 µs low phase and a high phase whose length
//! encodes the bit (about 27 µs for `0`, 70 µs for `1`).
//!
//! ## Blocking / Non-Blocking Modes
//!
//! [`Dht11::measure`] holds the pin low with the provided delay and reads the
//! answer in one go. Executors that should not spin for 18 ms can instead call
//! [`Dht11::start_signal`], wait [`Dht11::start_duration`] µs themselves, and
//! then call [`Dht11::read_response`]. Reading the answer is always blocking,
//! as bits are decoded by timing the line.
//!
//! ## Usage
//!
//! ```no_run
//! # use embedded_hal::{delay::DelayNs, digital::{InputPin, OutputPin}};
//! # fn run<P: InputPin + OutputPin>(pin: P, mut delay: impl DelayNs) {
//! use lumi_dht11::Dht11;
//!
//! let mut dht = Dht11::new(pin);
//! let measurement = dht.measure(&mut delay).unwrap();
//!
//! let celsius = measurement.temperature.as_degrees_celsius();
//! let humidity = measurement.humidity.as_percent();
//! # }
//! ```
#![deny(unsafe_code, missing_docs)]
#![no_std]

mod types;

use embedded_hal::{
    delay::DelayNs,
    digital::{self, InputPin, OutputPin},
};

pub use types::*;

/// Longest wait for any edge, in polling steps of 1 µs.
const EDGE_TIMEOUT: u32 = 100;
/// High phases longer than this many polling steps are a `1`.
const ONE_THRESHOLD: u32 = 30;

/// All possible errors in this crate
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: digital::Error> {
    /// Data pin error
    Pin(E),
    /// The sensor did not answer, or stopped answering mid-frame
    Timeout,
    /// Checksum validation failed
    Checksum,
}

impl<E> From<E> for Error<E>
where
    E: digital::Error,
{
    fn from(e: E) -> Self {
        Error::Pin(e)
    }
}

/// Driver for the DHT11 sensor.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dht11<P> {
    /// The open-drain data pin.
    pin: P,
}

impl<P> Dht11<P>
where
    P: InputPin + OutputPin,
{
    /// Create a new instance of the driver for the DHT11.
    #[inline]
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Destroy driver instance, return the data pin.
    pub fn destroy(self) -> P {
        self.pin
    }

    /// How long the start signal must be held, in microseconds.
    #[inline(always)]
    pub const fn start_duration(&self) -> u32 {
        18_000
    }

    /// Pull the data line low to request a measurement.
    ///
    /// Hold it for [`start_duration`](Self::start_duration) before calling
    /// [`read_response`](Self::read_response).
    pub fn start_signal(&mut self) -> Result<(), Error<P::Error>> {
        self.pin.set_low().map_err(Error::Pin)
    }

    /// Release the data line and decode the sensor's answer.
    ///
    /// This is a timing critical, blocking call of about 5 ms.
    pub fn read_response(&mut self, delay: &mut impl DelayNs) -> Result<Measurement, Error<P::Error>> {
        self.pin.set_high()?;

        // Handshake: the sensor pulls low, then high, then low for the first bit.
        self.wait_for_level(false, delay)?;
        self.wait_for_level(true, delay)?;
        self.wait_for_level(false, delay)?;

        let mut frame = [0u8; 5];

        for bit in 0..40 {
            self.wait_for_level(true, delay)?;
            let high = self.wait_for_level(false, delay)?;

            if high > ONE_THRESHOLD {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }

        let frame = RawFrame(frame);

        if !frame.checksum_ok() {
            return Err(Error::Checksum);
        }

        Ok(frame.into())
    }

    /// Request and read a measurement.
    ///
    /// This is a blocking function call.
    pub fn measure(&mut self, delay: &mut impl DelayNs) -> Result<Measurement, Error<P::Error>> {
        self.start_signal()?;
        delay.delay_us(self.start_duration());
        self.read_response(delay)
    }

    /// Poll until the line reads `high`, returning the number of 1 µs steps
    /// it took.
    fn wait_for_level(&mut self, high: bool, delay: &mut impl DelayNs) -> Result<u32, Error<P::Error>> {
        for elapsed in 0..EDGE_TIMEOUT {
            if self.pin.is_high()? == high {
                return Ok(elapsed);
            }

            delay.delay_us(1);
        }

        Err(Error::Timeout)
    }
}
