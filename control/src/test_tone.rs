//! Square wave replacing the microphone signal when checking the USB path.
//!
//! Every block also carries a ramp restarting at its first sample, so both
//! the continuity across blocks and the block boundaries can be seen on the
//! host. The ramp sits on top of a zero-centered square, the wave is not
//! offset to unsigned mid-scale.

pub const DEFAULT_PERIOD_BITS: u32 = 3;
pub const DEFAULT_AMPLITUDE: i16 = 0x500;
pub const DEFAULT_RAMP_STEP: i16 = 3;

const RAMP_MASK: usize = 0xFF;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestTone {
    phase: u32,
    period_bits: u32,
    amplitude: i16,
    ramp_step: i16,
}

impl Default for TestTone {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_BITS, DEFAULT_AMPLITUDE, DEFAULT_RAMP_STEP)
    }
}

impl TestTone {
    /// The square flips every `1 << period_bits` samples. The ramp grows by
    /// `ramp_step` per sample, wrapping every 256 samples of a block.
    ///
    /// # Panics
    ///
    /// Period must fit into the 32-bit phase counter.
    #[must_use]
    pub fn new(period_bits: u32, amplitude: i16, ramp_step: i16) -> Self {
        assert!(period_bits < 32);
        Self {
            phase: 0,
            period_bits,
            amplitude,
            ramp_step,
        }
    }

    /// Next sample of the square alone.
    pub fn tick(&mut self) -> i16 {
        let high = self.phase & (1 << self.period_bits) != 0;
        self.phase = self.phase.wrapping_add(1);
        if high {
            self.amplitude
        } else {
            -self.amplitude
        }
    }

    /// Continues the square from where the previous block ended and adds
    /// the ramp from the start of this block.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub fn populate(&mut self, buffer: &mut [i16]) {
        for (i, y) in buffer.iter_mut().enumerate() {
            let ramp = self.ramp_step.wrapping_mul((i & RAMP_MASK) as i16);
            *y = self.tick().saturating_add(ramp);
        }
    }
}
