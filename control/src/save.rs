//! Serialization of the configuration into a blob for flash.
//!
//! The blob carries a firmware version, a token and a CRC so a corrupted
//! or outdated save is never applied.

use crc::{Crc, CRC_16_USB};

use crate::configuration::Configuration;

// This constant is used to invalidate data when needed
const TOKEN: u16 = 1;
const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_USB);

pub struct InvalidData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    version: u32,
    configuration: Configuration,
}

const VERSION_RANGE: (usize, usize) = (0, 4);
const TOKEN_RANGE: (usize, usize) = (4, 6);
const PAYLOAD_RANGE: (usize, usize) = (6, 6 + Configuration::SIZE);
const CRC_RANGE: (usize, usize) = (PAYLOAD_RANGE.1, PAYLOAD_RANGE.1 + 2);

impl Store {
    pub const SIZE: usize = CRC_RANGE.1;

    #[must_use]
    pub fn new(configuration: Configuration, version: u32) -> Self {
        Self {
            version,
            configuration,
        }
    }

    /// # Errors
    ///
    /// This fails with `InvalidData` when recovered save does not carry the
    /// expected token, does not pass CRC check or holds an unknown variant.
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Result<Self, InvalidData> {
        let token = u16::from_le_bytes([bytes[TOKEN_RANGE.0], bytes[TOKEN_RANGE.0 + 1]]);
        if token != TOKEN {
            return Err(InvalidData);
        }

        let crc = u16::from_le_bytes([bytes[CRC_RANGE.0], bytes[CRC_RANGE.0 + 1]]);
        if crc != CRC.checksum(&bytes[..CRC_RANGE.0]) {
            return Err(InvalidData);
        }

        let mut version = [0; 4];
        version.copy_from_slice(&bytes[VERSION_RANGE.0..VERSION_RANGE.1]);
        let mut payload = [0; Configuration::SIZE];
        payload.copy_from_slice(&bytes[PAYLOAD_RANGE.0..PAYLOAD_RANGE.1]);

        Ok(Self {
            version: u32::from_le_bytes(version),
            configuration: Configuration::from_bytes(payload)?,
        })
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let mut bytes = [0; Self::SIZE];
        bytes[VERSION_RANGE.0..VERSION_RANGE.1].copy_from_slice(&self.version.to_le_bytes());
        bytes[TOKEN_RANGE.0..TOKEN_RANGE.1].copy_from_slice(&TOKEN.to_le_bytes());
        bytes[PAYLOAD_RANGE.0..PAYLOAD_RANGE.1].copy_from_slice(&self.configuration.to_bytes());
        let crc = CRC.checksum(&bytes[..CRC_RANGE.0]);
        bytes[CRC_RANGE.0..CRC_RANGE.1].copy_from_slice(&crc.to_le_bytes());
        bytes
    }

    #[must_use]
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Route;
    use pdm_mic_dsp::coefficients::Attenuation;
    use pdm_mic_dsp::pipeline::Strategy;

    fn configuration() -> Configuration {
        Configuration {
            attenuation: Attenuation::Minus32dB,
            strategy: Strategy::Passthrough,
            route: Route::TestTone,
        }
    }

    #[test]
    fn get_configuration_from_store() {
        let store = Store::new(configuration(), 0);
        assert_eq!(store.configuration(), configuration());
    }

    #[test]
    fn get_version_from_store() {
        let store = Store::new(Configuration::default(), 10);
        assert_eq!(store.version(), 10);
    }

    #[test]
    fn initialize_store_from_bytes() {
        let store_a = Store::new(configuration(), 7);
        let store_b = Store::from_bytes(store_a.to_bytes()).ok().unwrap();
        assert_eq!(store_a, store_b);
    }

    #[test]
    fn given_any_flipped_bit_the_store_is_rejected() {
        let bytes = Store::new(configuration(), 0x0102_0304).to_bytes();
        for i in 0..Store::SIZE {
            for bit in 0..8 {
                let mut corrupted = bytes;
                corrupted[i] ^= 1 << bit;
                assert!(Store::from_bytes(corrupted).is_err());
            }
        }
    }

    #[test]
    fn given_erased_flash_the_store_is_rejected() {
        assert!(Store::from_bytes([0xFF; Store::SIZE]).is_err());
        assert!(Store::from_bytes([0x00; Store::SIZE]).is_err());
    }

    #[test]
    fn given_foreign_token_the_store_is_rejected() {
        let mut bytes = Store::new(configuration(), 0).to_bytes();
        bytes[TOKEN_RANGE.0] = 2;
        let crc = CRC.checksum(&bytes[..CRC_RANGE.0]);
        bytes[CRC_RANGE.0..CRC_RANGE.1].copy_from_slice(&crc.to_le_bytes());
        assert!(Store::from_bytes(bytes).is_err());
    }
}
