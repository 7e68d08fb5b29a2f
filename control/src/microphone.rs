//! Wiring of the capture and transmit callbacks around the filter.

use pdm_mic_dsp::dc_blocker::MID_SCALE;
use pdm_mic_dsp::pipeline::FilterPipeline;

use crate::configuration::{Configuration, Route};
use crate::log;
use crate::save::Store;
use crate::test_tone::TestTone;

/// Source of raw biased samples, e.g. the PDM microphone driver.
pub trait Capture {
    /// Fills the buffer with the latest samples and returns how many were
    /// written.
    fn read(&mut self, buffer: &mut [u16]) -> usize;
}

/// Sink of the conditioned samples, e.g. the USB audio class.
pub trait Transmit {
    fn write(&mut self, buffer: &[i16]);
}

/// Holds one block of `N` samples between the capture and the transmit
/// notifications.
///
/// Both notifications must be called from the same context, they are never
/// expected to preempt each other.
#[derive(Debug)]
pub struct Microphone<const N: usize> {
    configuration: Configuration,
    pipeline: FilterPipeline,
    test_tone: TestTone,
    sample_buffer: [u16; N],
    out_buffer: [i16; N],
}

impl<const N: usize> Microphone<N> {
    #[must_use]
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            pipeline: pipeline(configuration),
            test_tone: TestTone::default(),
            sample_buffer: [MID_SCALE; N],
            out_buffer: [0; N],
        }
    }

    /// Starts from a configuration saved in flash. A blob that does not
    /// pass validation, e.g. erased flash, falls back to the defaults.
    #[must_use]
    pub fn from_saved(bytes: [u8; Store::SIZE]) -> Self {
        if let Ok(store) = Store::from_bytes(bytes) {
            Self::new(store.configuration())
        } else {
            log::info!("Saved configuration is invalid, using defaults");
            Self::default()
        }
    }

    /// Captures the current configuration for saving.
    #[must_use]
    pub fn store(&self, version: u32) -> Store {
        Store::new(self.configuration, version)
    }

    #[must_use]
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    #[must_use]
    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    /// Applies a new configuration.
    ///
    /// Changing the attenuation keeps the filter state running. Changing the
    /// strategy starts a new pipeline from silence.
    pub fn set_configuration(&mut self, configuration: Configuration) {
        if configuration.strategy == self.pipeline.strategy() {
            self.pipeline.init(configuration.attenuation.selector());
        } else {
            self.pipeline = pipeline(configuration);
        }
        self.configuration = configuration;
        log::info!("Configuration changed: {}", configuration);
    }

    /// Clears the filter state.
    pub fn reset(&mut self) {
        self.pipeline.reset();
    }

    /// Pulls a block from the capture driver. Short reads are padded with
    /// silence.
    pub fn on_samples_ready(&mut self, capture: &mut impl Capture) {
        let read = capture.read(&mut self.sample_buffer).min(N);
        self.sample_buffer[read..].fill(MID_SCALE);
    }

    /// Produces the outgoing block and hands it to the transmitter.
    pub fn on_tx_ready(&mut self, transmit: &mut impl Transmit) {
        match self.configuration.route {
            Route::Filter => self
                .pipeline
                .process_buffer(&mut self.out_buffer, &self.sample_buffer),
            Route::TestTone => self.test_tone.populate(&mut self.out_buffer),
        }
        transmit.write(&self.out_buffer);
    }
}

impl<const N: usize> Default for Microphone<N> {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

fn pipeline(configuration: Configuration) -> FilterPipeline {
    FilterPipeline::with_strategy(
        configuration.strategy,
        configuration.attenuation.selector(),
    )
}
