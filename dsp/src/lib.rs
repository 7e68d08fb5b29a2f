//! Fixed-point conditioning of a raw PDM microphone stream.
//!
//! Samples arrive as unsigned 12-bit readings biased around mid-scale. They
//! pass a DC blocker, then a biquad cutting the microphone's out-of-band
//! self-noise, and finally get saturated into signed 16-bit samples ready
//! for USB transfer. Everything runs in integer arithmetic and is meant to
//! be called from the sample-ready interrupt.
//!
//! ```
//! use pdm_mic_dsp::pipeline::FilterPipeline;
//!
//! let mut pipeline = FilterPipeline::new(12);
//! let input = [2048_u16; 32];
//! let mut output = [0_i16; 32];
//! pipeline.process_buffer(&mut output, &input);
//! assert!(output.iter().all(|x| *x == 0));
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod biquad;
pub mod clipper;
pub mod coefficients;
pub mod dc_blocker;
pub mod pipeline;
pub mod reference_dc_blocker;

mod log;
