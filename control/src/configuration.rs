//! Settings of the microphone that may be changed and persisted.

use pdm_mic_dsp::coefficients::Attenuation;
use pdm_mic_dsp::pipeline::Strategy;

use crate::save::InvalidData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub attenuation: Attenuation,
    pub strategy: Strategy,
    pub route: Route,
}

/// What gets written to the transmitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Captured samples passed through the filter pipeline.
    #[default]
    Filter,
    /// Square wave, useful to check the USB side without a microphone.
    TestTone,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            // Cuts the self-noise of the bare PDM microphone best.
            attenuation: Attenuation::Minus12dB,
            strategy: Strategy::Filtered,
            route: Route::Filter,
        }
    }
}

impl Configuration {
    pub const SIZE: usize = 3;

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let strategy = match self.strategy {
            Strategy::Filtered => 0,
            Strategy::Reference => 1,
            Strategy::Passthrough => 2,
        };
        let route = match self.route {
            Route::Filter => 0,
            Route::TestTone => 1,
        };
        [self.attenuation.selector() as u8, strategy, route]
    }

    /// # Errors
    ///
    /// This fails with `InvalidData` when the strategy or route is unknown.
    /// Unknown attenuation falls back to the default profile instead.
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Result<Self, InvalidData> {
        let attenuation = Attenuation::from(i32::from(bytes[0]));
        let strategy = match bytes[1] {
            0 => Strategy::Filtered,
            1 => Strategy::Reference,
            2 => Strategy::Passthrough,
            _ => return Err(InvalidData),
        };
        let route = match bytes[2] {
            0 => Route::Filter,
            1 => Route::TestTone,
            _ => return Err(InvalidData),
        };
        Ok(Self {
            attenuation,
            strategy,
            route,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_filters_with_minus_12_db() {
        let configuration = Configuration::default();
        assert_eq!(configuration.attenuation, Attenuation::Minus12dB);
        assert_eq!(configuration.strategy, Strategy::Filtered);
        assert_eq!(configuration.route, Route::Filter);
    }

    #[test]
    fn given_configuration_when_encoded_it_is_decoded_back() {
        for attenuation in Attenuation::ALL {
            let configuration = Configuration {
                attenuation,
                strategy: Strategy::Reference,
                route: Route::TestTone,
            };
            let decoded = Configuration::from_bytes(configuration.to_bytes()).ok().unwrap();
            assert_eq!(decoded, configuration);
        }
    }

    #[test]
    fn given_unknown_attenuation_byte_it_falls_back_to_minus_3_db() {
        let configuration = Configuration::from_bytes([77, 0, 0]).ok().unwrap();
        assert_eq!(configuration.attenuation, Attenuation::Minus3dB);
    }

    #[test]
    fn given_unknown_strategy_or_route_it_fails() {
        assert!(Configuration::from_bytes([12, 3, 0]).is_err());
        assert!(Configuration::from_bytes([12, 0, 2]).is_err());
    }
}
