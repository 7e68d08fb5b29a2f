//! DC component blocking filter.
//!
//! A leaky integrator follows the bias of the incoming signal and gets
//! subtracted from every sample. The integrator keeps [`FRACBITS`] fraction
//! bits so the whole stage stays in integers inside the capture interrupt.

/// Mid-scale of the raw 12-bit microphone sample, silence.
pub const MID_SCALE: u16 = 2048;

pub const BIAS: i64 = MID_SCALE as i64;

/// Fraction bits of the integrator.
pub const FRACBITS: u32 = 28;

/// Leak of 1/16 per sample. Lower shift moves the cutoff up.
pub const DEFAULT_LEAK_SHIFT: u32 = 4;

const INPUT_BITS: u32 = 12;
const OUTPUT_BITS: u32 = 16;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DCBlocker {
    accumulator: i64,
}

impl DCBlocker {
    /// Takes a raw biased sample and returns it centered, widened to the
    /// 16-bit output scale. The result is not clamped.
    pub fn tick(&mut self, x: u16, leak_shift: u32) -> i64 {
        let centered = i64::from(x) - BIAS;
        let wide = centered << (FRACBITS - INPUT_BITS);
        let y = wide - self.accumulator;
        self.accumulator += y >> leak_shift;
        y >> (FRACBITS - OUTPUT_BITS)
    }

    #[must_use]
    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}
