//! The sampling task.
//!
//! One cycle reads both LDRs and the climate sensor, derives the measurement,
//! raises the [`CompletionFlag`] and then updates the display. The flag is
//! always raised before the display update, so the indicator pulse starts
//! while the screen redraws.

use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use lumi_fmt::{debug, error, info, warn};

use crate::{
    climate::ClimateReading,
    config::CycleConfig,
    flag::{CompletionFlag, Shutdown},
    measure::{DerivedMeasurement, SensorPair},
    ports::{ClimateSensor, LdrChannel, LightSensors, ReadoutDisplay},
    readout::{Readout, Sample},
};

/// A cycle that did not complete.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError<LE, CE, DE> {
    /// An LDR could not be read. Nothing was derived or displayed.
    Light(LE),
    /// The climate sensor could not be read. Nothing was derived or displayed.
    Climate(CE),
    /// The sample was taken and signalled, but the display rejected it.
    Display(DE),
}

/// The pipeline could not start.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError<LE, CE, DE> {
    /// The LDRs did not answer the first reading.
    Light(LE),
    /// The climate sensor did not answer the first reading.
    Climate(CE),
    /// The initial blank readout could not be shown.
    Display(DE),
}

pub type CycleResult<L, C, D> = Result<
    Sample,
    CycleError<<L as LightSensors>::Error, <C as ClimateSensor>::Error, <D as ReadoutDisplay>::Error>,
>;

pub type SetupResult<L, C, D> = Result<
    (),
    SetupError<<L as LightSensors>::Error, <C as ClimateSensor>::Error, <D as ReadoutDisplay>::Error>,
>;

pub struct SamplePipeline<'a, L, C, D> {
    light: L,
    climate: C,
    display: D,
    flag: &'a CompletionFlag,
    config: CycleConfig,
}

impl<'a, L, C, D> SamplePipeline<'a, L, C, D>
where
    L: LightSensors,
    C: ClimateSensor,
    D: ReadoutDisplay,
{
    pub fn new(light: L, climate: C, display: D, flag: &'a CompletionFlag, config: CycleConfig) -> Self {
        Self {
            light,
            climate,
            display,
            flag,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Destroy the pipeline, returning its collaborators.
    pub fn release(self) -> (L, C, D) {
        (self.light, self.climate, self.display)
    }

    /// Check that every sensor answers, then show the blank readout.
    ///
    /// Must succeed before the first cycle. The readings taken here are
    /// discarded.
    pub async fn start(&mut self) -> SetupResult<L, C, D> {
        if self.config.reading_delay_below_floor() {
            warn!(
                "Reading delay of {}ms is below the sensors' rated minimum",
                self.config.reading_delay.as_millis()
            );
        }

        self.light
            .read(LdrChannel::First)
            .await
            .map_err(SetupError::Light)?;
        self.light
            .read(LdrChannel::Second)
            .await
            .map_err(SetupError::Light)?;
        self.climate.measure().await.map_err(SetupError::Climate)?;

        self.display
            .update(&Readout::Blank)
            .await
            .map_err(SetupError::Display)
    }

    /// Run one sampling cycle without the trailing reading delay.
    ///
    /// A failed sensor read abandons the cycle before anything is derived, so
    /// neither the flag nor the display is touched.
    pub async fn cycle(&mut self) -> CycleResult<L, C, D> {
        let first = self
            .light
            .read(LdrChannel::First)
            .await
            .map_err(CycleError::Light)?;
        let second = self
            .light
            .read(LdrChannel::Second)
            .await
            .map_err(CycleError::Light)?;
        let pair = SensorPair::new(first, second);

        let climate = self.climate.measure().await.map_err(CycleError::Climate)?;
        let climate = ClimateReading::from_sample(climate, self.config.temperature_unit);

        let derived = DerivedMeasurement::derive(pair, self.config.validity_threshold);

        if self.config.verbose {
            info!(
                "LDR1 {}\tLDR2 {}\tDelta {}\tPercentage Delta {}",
                pair.first,
                pair.second,
                derived.raw_delta,
                derived.percent_delta.as_percent()
            );
        }

        if self.flag.is_set() {
            debug!("Previous pulse still pending, coalescing");
        }
        self.flag.set();

        let sample = Sample {
            pair,
            derived,
            climate,
        };

        self.display
            .update(&Readout::Sample(sample))
            .await
            .map_err(CycleError::Display)?;

        Ok(sample)
    }

    /// Run `cycles` cycles with the reading delay between them, returning how
    /// many completed.
    ///
    /// Failed cycles count towards `cycles`, and are logged when verbose.
    /// Nothing is checked or rendered up front, call [`start`](Self::start)
    /// first if it should be.
    pub async fn run_cycles(&mut self, cycles: usize) -> usize {
        let mut completed = 0;

        for n in 0..cycles {
            if self.attempt().await {
                completed += 1;
            }

            if n + 1 < cycles {
                Timer::after(self.config.reading_delay).await;
            }
        }

        completed
    }

    /// Check the sensors and render the blank readout, then sample until
    /// `shutdown` is requested.
    ///
    /// Only a failing start is reported. Every suspension point also waits on
    /// `shutdown`, so a stop request never waits out a full reading delay.
    pub async fn run(&mut self, shutdown: &Shutdown) -> SetupResult<L, C, D> {
        let started = select(self.start(), shutdown.wait()).await;

        match started {
            Either::First(Err(e)) => {
                match e {
                    SetupError::Light(_) => error!("LDRs unavailable, sampling not started"),
                    SetupError::Climate(_) => error!("Climate sensor unavailable, sampling not started"),
                    SetupError::Display(_) => error!("Display unavailable, sampling not started"),
                }
                return Err(e);
            }
            Either::Second(()) => return Ok(()),
            Either::First(Ok(())) => {}
        }

        info!("Sampling every {}ms", self.config.reading_delay.as_millis());

        while !shutdown.is_requested() {
            if let Either::Second(()) = select(self.attempt(), shutdown.wait()).await {
                break;
            }

            if let Either::Second(()) =
                select(Timer::after(self.config.reading_delay), shutdown.wait()).await
            {
                break;
            }
        }

        info!("Sampling stopped");

        Ok(())
    }

    /// Run one cycle, reporting a failure only when verbose.
    async fn attempt(&mut self) -> bool {
        let failure = match self.cycle().await {
            Ok(_) => return true,
            Err(failure) => failure,
        };

        if self.config.verbose {
            match failure {
                CycleError::Light(_) => warn!("LDR read failed, skipping cycle"),
                CycleError::Climate(_) => warn!("Climate sensor read failed, skipping cycle"),
                CycleError::Display(_) => warn!("Display update failed"),
            }
        }

        false
    }
}
