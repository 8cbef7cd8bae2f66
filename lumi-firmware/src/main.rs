#![no_std]
#![no_main]

mod climate;
mod constants;
mod display;
mod light;

#[cfg(not(feature = "defmt"))]
use panic_halt as _;
use portable_atomic as _;
#[cfg(feature = "defmt")]
use {defmt_rtt as _, panic_probe as _};

use assign_resources::assign_resources;
use embassy_executor::Executor;
use embassy_rp::{
    Peri,
    gpio::{Level, Output},
    multicore::{Stack, spawn_core1},
    peripherals,
};
use embassy_time::Timer;
use lumi_core::{CompletionFlag, Indicator, SamplePipeline, Shutdown};
use lumi_fmt::{error, info, unwrap};
use static_cell::StaticCell;

use crate::{
    climate::Dht11Climate,
    constants::{LUMI_CONFIG, LUMI_SENSOR_SETTLE_MS},
    display::OledPanel,
    light::LdrPair,
};

assign_resources! {
    light: LightResources {
        adc: ADC,
        first: PIN_26,
        second: PIN_27,
    },
    climate: ClimateResources {
        data: PIN_12,
    },
    display: DisplayResources {
        i2c: I2C1,
        sda: PIN_14,
        scl: PIN_15,
    },
    indicator: IndicatorResources {
        led: PIN_25,
    },
}

static mut CORE1_STACK: Stack<4096> = Stack::new();

static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

static COMPLETION: StaticCell<CompletionFlag> = StaticCell::new();
static SHUTDOWN: StaticCell<Shutdown> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    // Shared between the cores, so both must exist before core 1 starts.
    let flag: &'static CompletionFlag = COMPLETION.init(CompletionFlag::new());
    let shutdown: &'static Shutdown = SHUTDOWN.init(Shutdown::new());

    info!("Lumi is go!");

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| {
                unwrap!(spawner.spawn(indicator_task(r.indicator, flag, shutdown)));
            });
        },
    );

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        unwrap!(spawner.spawn(sampling_task(
            r.light, r.climate, r.display, flag, shutdown
        )));
    });
}

#[embassy_executor::task]
async fn indicator_task(
    r: IndicatorResources,
    flag: &'static CompletionFlag,
    shutdown: &'static Shutdown,
) {
    let led = Output::new(r.led, Level::Low);
    let mut indicator = Indicator::new(flag, led, LUMI_CONFIG.indicator_pulse);

    indicator.run(shutdown).await;
}

#[embassy_executor::task]
async fn sampling_task(
    light: LightResources,
    climate: ClimateResources,
    display: DisplayResources,
    flag: &'static CompletionFlag,
    shutdown: &'static Shutdown,
) {
    let display = match OledPanel::new(display) {
        Ok(display) => display,
        Err(_) => {
            error!("Unable to set up the display");
            shutdown.request();
            return;
        }
    };

    let light = LdrPair::new(light);
    let climate = Dht11Climate::new(climate);

    Timer::after_millis(LUMI_SENSOR_SETTLE_MS).await;

    let mut pipeline = SamplePipeline::new(light, climate, display, flag, LUMI_CONFIG);

    // The indicator has nothing left to show once sampling cannot run.
    if pipeline.run(shutdown).await.is_err() {
        shutdown.request();
    }
}
