use core::convert::Infallible;

use embassy_rp::gpio::{Level, OutputOpenDrain};
use embassy_time::{Delay, Timer};
use lumi_core::{ClimateSample, ports::ClimateSensor};
use lumi_dht11::{Dht11, Error};
use lumi_fmt::debug;

/// DHT11 on an open-drain data line, pulled up on the module.
pub struct Dht11Climate<'d> {
    dht: Dht11<OutputOpenDrain<'d>>,
}

impl Dht11Climate<'static> {
    pub fn new(r: crate::ClimateResources) -> Self {
        Self {
            dht: Dht11::new(OutputOpenDrain::new(r.data, Level::High)),
        }
    }
}

impl ClimateSensor for Dht11Climate<'_> {
    type Error = Error<Infallible>;

    async fn measure(&mut self) -> Result<ClimateSample, Self::Error> {
        self.dht.start_signal()?;

        Timer::after_micros(self.dht.start_duration().into()).await;

        // Bits are told apart by timing the line, so the read must not be preempted.
        let m = critical_section::with(|_| self.dht.read_response(&mut Delay))?;

        debug!(
            "T: {}C, H: {}%",
            m.temperature.as_degrees_celsius(),
            m.humidity.as_percent()
        );

        Ok(ClimateSample::new(
            m.temperature.as_millidegrees_celsius(),
            m.humidity.as_millipercent(),
        ))
    }
}
