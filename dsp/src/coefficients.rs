//! Precomputed biquad profiles and their fixed-point representation.
//!
//! The profiles were designed in the analog domain and are kept as literal
//! values, they are never recomputed at runtime. Each one is selected by the
//! approximate attenuation in dB of the emulated analog response.
//!
//! All profiles tie the first feedback coefficient to `b1`. Written as
//! `y = b0 * x + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2` they have
//! `a1 == b1`, which lets the biquad fold `b1 * x1 - a1 * y1` into a single
//! `b1 * (x1 - y1)` multiply. With the feedback written as added, the same
//! relation reads `a1 == -b1`. A profile added here without that relation
//! would silently produce a wrong filter.

/// Fraction bits of the fixed-point coefficients.
pub const COEFFBITS: u32 = 13;

/// Scale of a coefficient equal to 1.0.
pub const FSCALE: i32 = 1 << COEFFBITS;

/// Selects one of the precomputed filter profiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attenuation {
    #[default]
    Minus3dB,
    Minus6dB,
    Minus9dB,
    Minus12dB,
    Minus32dB,
}

impl Attenuation {
    pub const ALL: [Self; 5] = [
        Self::Minus3dB,
        Self::Minus6dB,
        Self::Minus9dB,
        Self::Minus12dB,
        Self::Minus32dB,
    ];

    #[must_use]
    pub fn selector(self) -> i32 {
        match self {
            Self::Minus3dB => 3,
            Self::Minus6dB => 6,
            Self::Minus9dB => 9,
            Self::Minus12dB => 12,
            Self::Minus32dB => 32,
        }
    }

    #[allow(clippy::excessive_precision)]
    #[must_use]
    pub fn profile(self) -> Profile {
        // a1 == b1 in every row, feedback subtracted.
        match self {
            Self::Minus3dB => Profile {
                a2: 0.944_718_92,
                b0: 0.991_927_46,
                b1: -1.796_686_01,
                b2: 0.952_791_46,
            },
            Self::Minus6dB => Profile {
                a2: 0.934_638_86,
                b0: 0.983_698_52,
                b1: -1.787_373_25,
                b2: 0.950_940_35,
            },
            Self::Minus9dB => Profile {
                a2: 0.922_793_76,
                b0: 0.975_093_78,
                b1: -1.776_429_80,
                b2: 0.947_699_98,
            },
            Self::Minus12dB => Profile {
                a2: 0.723_227_86,
                b0: 0.910_715_16,
                b1: -1.592_054_95,
                b2: 0.812_512_70,
            },
            // Zeros sit on the unit circle, this is a proper notch.
            Self::Minus32dB => Profile {
                a2: 0.984_180_98,
                b0: 0.992_090_49,
                b1: -1.833_144_19,
                b2: 0.992_090_49,
            },
        }
    }
}

/// Unrecognized selectors fall back to the -3 dB profile.
impl From<i32> for Attenuation {
    fn from(selector: i32) -> Self {
        match selector {
            6 => Self::Minus6dB,
            9 => Self::Minus9dB,
            12 => Self::Minus12dB,
            32 => Self::Minus32dB,
            _ => Self::Minus3dB,
        }
    }
}

/// Coefficients in the design domain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Profile {
    pub a2: f32,
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
}

impl Profile {
    #[must_use]
    pub fn to_fixed(self) -> Coefficients {
        Coefficients {
            a2: to_fixed(self.a2),
            b0: to_fixed(self.b0),
            b1: to_fixed(self.b1),
            b2: to_fixed(self.b2),
        }
    }
}

/// Coefficients scaled by [`FSCALE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coefficients {
    pub a2: i32,
    pub b0: i32,
    pub b1: i32,
    pub b2: i32,
}

impl From<Attenuation> for Coefficients {
    fn from(attenuation: Attenuation) -> Self {
        attenuation.profile().to_fixed()
    }
}

/// The active profile, kept in both domains. It is only ever replaced as a
/// whole.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterConfiguration {
    pub attenuation: Attenuation,
    pub profile: Profile,
    pub coefficients: Coefficients,
}

impl FilterConfiguration {
    #[must_use]
    pub fn init(selector: i32) -> Self {
        Self::from(Attenuation::from(selector))
    }
}

impl From<Attenuation> for FilterConfiguration {
    fn from(attenuation: Attenuation) -> Self {
        let profile = attenuation.profile();
        Self {
            attenuation,
            profile,
            coefficients: profile.to_fixed(),
        }
    }
}

impl Default for FilterConfiguration {
    fn default() -> Self {
        Self::from(Attenuation::default())
    }
}

// The cast truncates toward zero, it must not be rounded. The frequency
// response depends on these exact integers.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
fn to_fixed(x: f32) -> i32 {
    (FSCALE as f32 * x) as i32
}
