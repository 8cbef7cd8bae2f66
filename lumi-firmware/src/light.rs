use embassy_rp::{
    adc::{self, Adc, Async, Channel, Config, InterruptHandler},
    bind_interrupts,
    gpio::Pull,
};
use lumi_core::ports::{LdrChannel, LightSensors};

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => InterruptHandler;
});

/// The two LDR voltage dividers on ADC0 and ADC1.
pub struct LdrPair<'d> {
    adc: Adc<'d, Async>,
    first: Channel<'d>,
    second: Channel<'d>,
}

impl LdrPair<'static> {
    pub fn new(r: crate::LightResources) -> Self {
        Self {
            adc: Adc::new(r.adc, Irqs, Config::default()),
            first: Channel::new_pin(r.first, Pull::None),
            second: Channel::new_pin(r.second, Pull::None),
        }
    }
}

impl LightSensors for LdrPair<'_> {
    type Error = adc::Error;

    async fn read(&mut self, channel: LdrChannel) -> Result<u16, adc::Error> {
        let channel = match channel {
            LdrChannel::First => &mut self.first,
            LdrChannel::Second => &mut self.second,
        };

        let raw = self.adc.read(channel).await?;

        Ok(scale_to_u16(raw))
    }
}

/// Stretch a 12-bit conversion over the full 16-bit range, so `0xFFF` reads
/// as `0xFFFF`.
#[inline]
const fn scale_to_u16(raw: u16) -> u16 {
    (raw << 4) | (raw >> 8)
}
