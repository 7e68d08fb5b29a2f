//! Main interface for the filtering done in the sample-ready callback.
//!
//! The pipeline owns its configuration and state, so independent instances
//! never share anything. Re-initializing the configuration keeps the state
//! running; use [`FilterPipeline::reset`] to start from silence.

use crate::biquad::{Biquad, DelayLine};
use crate::clipper::saturate16;
use crate::coefficients::{Attenuation, Coefficients, FilterConfiguration};
use crate::dc_blocker::{DCBlocker, BIAS, DEFAULT_LEAK_SHIFT};
use crate::log;
use crate::reference_dc_blocker::ReferenceDCBlocker;

const PASSTHROUGH_SHIFT: u32 = 4;

/// Signal path taken by the pipeline, picked at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strategy {
    /// DC blocker followed by the biquad.
    #[default]
    Filtered,
    /// The one-pole reference DC blocker alone.
    Reference,
    /// Centered input scaled up to 16 bits, no filtering.
    Passthrough,
}

/// Snapshot of everything the pipeline carries between samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct State {
    pub accumulator: i64,
    pub delay_line: DelayLine,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterPipeline {
    strategy: Strategy,
    configuration: FilterConfiguration,
    dc_blocker: DCBlocker,
    reference_dc_blocker: ReferenceDCBlocker,
    biquad: Biquad,
}

impl FilterPipeline {
    #[must_use]
    pub fn new(selector: i32) -> Self {
        Self::with_strategy(Strategy::Filtered, selector)
    }

    #[must_use]
    pub fn with_strategy(strategy: Strategy, selector: i32) -> Self {
        let configuration = FilterConfiguration::init(selector);
        Self {
            strategy,
            configuration,
            dc_blocker: DCBlocker::default(),
            reference_dc_blocker: ReferenceDCBlocker::new(),
            biquad: Biquad::new(configuration.coefficients),
        }
    }

    /// Replaces the active configuration as a whole. Unsupported selectors
    /// fall back to the -3 dB profile.
    ///
    /// The accumulator and delay line are left untouched, so the previous
    /// profile's state decays through the new one instead of cutting to
    /// silence.
    pub fn init(&mut self, selector: i32) {
        self.configuration = FilterConfiguration::init(selector);
        self.biquad.set_coefficients(self.configuration.coefficients);
        log::info!(
            "Filter initialized to {} dB",
            self.configuration.attenuation.selector()
        );
    }

    /// Returns all filter state to zero while keeping the configuration.
    pub fn reset(&mut self) {
        self.dc_blocker.reset();
        self.reference_dc_blocker.reset();
        self.biquad.reset();
    }

    /// See [`ReferenceDCBlocker::set_coefficient`]. Only affects the
    /// [`Strategy::Reference`] path.
    pub fn set_reference_coefficient(&mut self, coefficient: i32) {
        self.reference_dc_blocker.set_coefficient(coefficient);
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn configuration(&self) -> FilterConfiguration {
        self.configuration
    }

    #[must_use]
    pub fn attenuation(&self) -> Attenuation {
        self.configuration.attenuation
    }

    #[must_use]
    pub fn coefficients(&self) -> Coefficients {
        self.configuration.coefficients
    }

    #[must_use]
    pub fn state(&self) -> State {
        let accumulator = match self.strategy {
            Strategy::Reference => self.reference_dc_blocker.accumulator(),
            _ => self.dc_blocker.accumulator(),
        };
        State {
            accumulator,
            delay_line: self.biquad.delay_line(),
        }
    }

    pub fn tick(&mut self, x: u16) -> i16 {
        let y = match self.strategy {
            Strategy::Filtered => self
                .biquad
                .tick(self.dc_blocker.tick(x, DEFAULT_LEAK_SHIFT)),
            Strategy::Reference => self.reference_dc_blocker.tick(x),
            Strategy::Passthrough => (i64::from(x) - BIAS) << PASSTHROUGH_SHIFT,
        };
        saturate16(y)
    }

    /// Filters `input` into `output`, continuing from the state left by the
    /// previous call. Processes as many samples as the shorter of the two
    /// buffers holds.
    pub fn process_buffer(&mut self, output: &mut [i16], input: &[u16]) {
        for (y, x) in output.iter_mut().zip(input) {
            *y = self.tick(*x);
        }
    }

    /// Filters exactly `count` samples.
    ///
    /// # Panics
    ///
    /// Both buffers must hold at least `count` samples, otherwise this
    /// panics.
    pub fn process_buffer_n(&mut self, output: &mut [i16], input: &[u16], count: usize) {
        self.process_buffer(&mut output[..count], &input[..count]);
    }
}
