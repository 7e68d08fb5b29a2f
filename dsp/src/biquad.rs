//! Second-order recursive filter suppressing the microphone self-noise.
//!
//! Runs the direct-form recurrence in fixed point:
//!
//! ```text
//! y = (b0 * x + b1 * (x1 - y1) + b2 * x2 - a2 * y2) >> COEFFBITS
//! ```
//!
//! The fused `b1 * (x1 - y1)` term stands for `b1 * x1 - a1 * y1` and is
//! valid only because every profile in [`crate::coefficients`] has
//! `a1 == b1` with the feedback written as subtracted, as above. With the
//! feedback written as added the same relation reads `a1 == -b1`. The final
//! shift truncates. The small bias it introduces is
//! part of the expected response.

use crate::coefficients::{Coefficients, COEFFBITS};

/// Previous two inputs and outputs. Outputs are kept before saturation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayLine {
    pub x1: i64,
    pub x2: i64,
    pub y1: i64,
    pub y2: i64,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Biquad {
    a2: i64,
    b0: i64,
    b1: i64,
    b2: i64,
    delay_line: DelayLine,
}

impl Biquad {
    #[must_use]
    pub fn new(coefficients: Coefficients) -> Self {
        let mut biquad = Self {
            a2: 0,
            b0: 0,
            b1: 0,
            b2: 0,
            delay_line: DelayLine::default(),
        };
        biquad.set_coefficients(coefficients);
        biquad
    }

    /// Swaps the coefficients while keeping the delay line intact.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) -> &mut Self {
        self.a2 = i64::from(coefficients.a2);
        self.b0 = i64::from(coefficients.b0);
        self.b1 = i64::from(coefficients.b1);
        self.b2 = i64::from(coefficients.b2);
        self
    }

    #[must_use]
    pub fn delay_line(&self) -> DelayLine {
        self.delay_line
    }

    pub fn reset(&mut self) {
        self.delay_line = DelayLine::default();
    }

    pub fn tick(&mut self, x: i64) -> i64 {
        let DelayLine { x1, x2, y1, y2 } = self.delay_line;
        let y = (self.b0 * x + self.b1 * (x1 - y1) + self.b2 * x2 - self.a2 * y2) >> COEFFBITS;
        self.delay_line = DelayLine {
            x1: x,
            x2: x1,
            y1: y,
            y2: y1,
        };
        y
    }
}
