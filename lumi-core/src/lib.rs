//! Core logic of the lumi light sensor board.
//!
//! Two redundant LDRs are sampled on a fixed period by the [`SamplePipeline`],
//! which derives how far the two readings agree and raises a
//! [`CompletionFlag`] for every completed cycle. An [`Indicator`] running as
//! a separate task pulses an LED once per raised flag.
//!
//! Hardware sits behind the traits in [`ports`], so everything here runs on
//! the host as well as on the board.
#![no_std]

mod climate;
mod config;
mod flag;
mod indicator;
mod measure;
mod pipeline;
pub mod ports;
mod readout;

pub use climate::*;
pub use config::*;
pub use flag::*;
pub use indicator::*;
pub use measure::*;
pub use pipeline::*;
pub use readout::*;
