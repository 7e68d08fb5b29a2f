//! Simplest possible DC blocker, kept as a reference for the production one.
//!
//! The smaller the coefficient, the more low frequency energy passes
//! through.

use crate::dc_blocker::BIAS;

pub const DEFAULT_COEFFICIENT: i32 = 32;
pub const COEFFICIENT_RANGE: (i32, i32) = (3, 8000);

const INPUT_SHIFT: u32 = 4;
const ACCUMULATOR_SHIFT: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceDCBlocker {
    accumulator: i64,
    coefficient: i32,
}

impl Default for ReferenceDCBlocker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceDCBlocker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulator: 0,
            coefficient: DEFAULT_COEFFICIENT,
        }
    }

    /// Out of range coefficients are silently clamped.
    pub fn set_coefficient(&mut self, coefficient: i32) -> &mut Self {
        self.coefficient = coefficient.clamp(COEFFICIENT_RANGE.0, COEFFICIENT_RANGE.1);
        self
    }

    #[must_use]
    pub fn coefficient(&self) -> i32 {
        self.coefficient
    }

    #[must_use]
    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    pub fn tick(&mut self, x: u16) -> i64 {
        let x = (i64::from(x) - BIAS) << INPUT_SHIFT;
        let y = x - (self.accumulator >> ACCUMULATOR_SHIFT);
        self.accumulator += y * i64::from(self.coefficient);
        y
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(coefficient: i32) -> usize {
        let mut dc_blocker = ReferenceDCBlocker::new();
        dc_blocker.set_coefficient(coefficient);
        (0..100_000)
            .map(|_| dc_blocker.tick(4095))
            .position(|y| y.abs() <= 1)
            .unwrap()
    }

    #[test]
    fn given_coefficient_out_of_range_it_gets_clamped() {
        let mut dc_blocker = ReferenceDCBlocker::new();
        assert_eq!(dc_blocker.coefficient(), DEFAULT_COEFFICIENT);

        assert_eq!(dc_blocker.set_coefficient(0).coefficient(), 3);
        assert_eq!(dc_blocker.set_coefficient(-100).coefficient(), 3);
        assert_eq!(dc_blocker.set_coefficient(9000).coefficient(), 8000);
        assert_eq!(dc_blocker.set_coefficient(3).coefficient(), 3);
        assert_eq!(dc_blocker.set_coefficient(8000).coefficient(), 8000);
        assert_eq!(dc_blocker.set_coefficient(100).coefficient(), 100);
    }

    #[test]
    fn given_offset_input_it_passes_the_first_sample_scaled() {
        let mut dc_blocker = ReferenceDCBlocker::new();
        assert_eq!(dc_blocker.tick(2148), 1600);
        assert_eq!(dc_blocker.accumulator(), 1600 * 32);
    }

    #[test]
    fn given_constant_offset_the_output_converges_to_zero() {
        for x in [0, 3000, 4095] {
            let mut dc_blocker = ReferenceDCBlocker::new();
            for _ in 0..8192 {
                dc_blocker.tick(x);
            }
            assert!(dc_blocker.tick(x).abs() <= 1);
        }
    }

    #[test]
    fn given_higher_coefficient_it_settles_faster() {
        assert!(settle(8000) < settle(DEFAULT_COEFFICIENT));
        assert!(settle(DEFAULT_COEFFICIENT) < settle(3));
    }

    #[test]
    fn reset_keeps_the_coefficient() {
        let mut dc_blocker = ReferenceDCBlocker::new();
        dc_blocker.set_coefficient(500);
        dc_blocker.tick(0);
        dc_blocker.reset();
        assert_eq!(dc_blocker.accumulator(), 0);
        assert_eq!(dc_blocker.coefficient(), 500);
    }
}
