//! Glue passing captured microphone samples through the filter to the USB
//! transmitter.
//!
//! Both ends are hardware drivers calling back from their interrupts. This
//! crate stays agnostic of them and talks through [`Capture`] and
//! [`Transmit`]:
//!
//! ```text
//!   [ PDM capture ]
//!          |
//!          | (on_samples_ready)
//!          V
//!   [ Microphone {FilterPipeline | TestTone} ] <-----> {Store}
//!          |
//!          | (on_tx_ready)
//!          V
//!   [ USB transmit ]
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]

pub mod configuration;
pub mod microphone;
pub mod save;
pub mod test_tone;

mod log;

pub use configuration::{Configuration, Route};
pub use microphone::{Capture, Microphone, Transmit};
pub use save::{InvalidData, Store};
pub use test_tone::TestTone;
