//! The indicator task: one LED pulse per completed sample cycle.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;
use lumi_fmt::{debug, info, warn};

use crate::flag::{CompletionFlag, Shutdown};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorState {
    /// Waiting for the completion flag.
    Idle,
    /// LED on, waiting for the pulse to elapse.
    Pulsing,
}

/// Drives the indicator LED from the [`CompletionFlag`].
///
/// The flag stays set for the whole pulse and is cleared when the LED goes
/// off, so the sampling task can see whether a pulse is still owed.
pub struct Indicator<'a, P> {
    flag: &'a CompletionFlag,
    led: P,
    pulse: Duration,
    state: IndicatorState,
}

impl<'a, P> Indicator<'a, P>
where
    P: OutputPin,
{
    pub fn new(flag: &'a CompletionFlag, led: P, pulse: Duration) -> Self {
        Self {
            flag,
            led,
            pulse,
            state: IndicatorState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> IndicatorState {
        self.state
    }

    /// Destroy the indicator, returning the LED pin.
    pub fn release(self) -> P {
        self.led
    }

    /// Wait for the next completion and emit one pulse.
    pub async fn pulse_once(&mut self) {
        let flag = self.flag;
        flag.wait().await;

        self.light();
        Timer::after(self.pulse).await;
        self.extinguish();
    }

    /// Pulse once per completion until `shutdown` is requested.
    ///
    /// A shutdown during a pulse cuts it short. The LED is always left off.
    pub async fn run(&mut self, shutdown: &Shutdown) {
        let flag = self.flag;
        info!("Indicator running");

        loop {
            if let Either::Second(()) = select(flag.wait(), shutdown.wait()).await {
                break;
            }

            self.light();
            let pulse = select(Timer::after(self.pulse), shutdown.wait()).await;
            self.extinguish();

            if let Either::Second(()) = pulse {
                break;
            }
        }

        info!("Indicator stopped");
    }

    fn light(&mut self) {
        self.state = IndicatorState::Pulsing;
        debug!("Indicator on");

        if self.led.set_high().is_err() {
            warn!("Indicator LED could not be switched on");
        }
    }

    fn extinguish(&mut self) {
        if self.led.set_low().is_err() {
            warn!("Indicator LED could not be switched off");
        }

        self.flag.clear();
        self.state = IndicatorState::Idle;
    }
}
