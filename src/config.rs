//! Configuration primitives for the ADXL345 decoder.

use crate::registers::{MAX_ADDRESS, REG_ORIENT};

/// User-facing configuration for the transaction decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Combine `DATAx0`/`DATAx1` bursts into a single 16-bit record.
    pub pair_axis_data: bool,
    /// Last register visited by an auto-incrementing burst before it wraps to `0x01`.
    pub last_register: u8,
}

impl DecoderConfig {
    /// Begins building a [`DecoderConfig`] using the builder pattern.
    pub fn new() -> DecoderConfigBuilder {
        DecoderConfigBuilder::new()
    }

    /// Checks whether this configuration can drive a decoder.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.last_register == 0 || self.last_register > MAX_ADDRESS {
            return Err(ConfigError::WrapBoundaryOutOfRange);
        }

        Ok(())
    }
}

/// Builder for [`DecoderConfig`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct DecoderConfigBuilder {
    config: DecoderConfig,
}

impl DecoderConfigBuilder {
    /// Creates a new builder seeded with [`DecoderConfig::default()`].
    pub fn new() -> Self {
        Self {
            config: DecoderConfig::default(),
        }
    }

    /// Enables or disables axis data pairing.
    pub fn pair_axis_data(mut self, enabled: bool) -> Self {
        self.config.pair_axis_data = enabled;
        self
    }

    /// Overrides the burst wraparound boundary.
    pub fn last_register(mut self, address: u8) -> Self {
        self.config.last_register = address;
        self
    }

    /// Finalizes the builder and returns the [`DecoderConfig`].
    pub fn build(self) -> DecoderConfig {
        self.config
    }
}

impl Default for DecoderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            pair_axis_data: false,
            last_register: REG_ORIENT,
        }
    }
}

/// Validation errors generated while verifying a [`DecoderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The wrap boundary is zero or outside the 6-bit address space.
    WrapBoundaryOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wraps_after_last_documented_register() {
        let config = DecoderConfig::default();
        assert_eq!(config.last_register, 0x3C);
        assert!(!config.pair_axis_data);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builder_overrides_fields() {
        let config = DecoderConfig::new()
            .pair_axis_data(true)
            .last_register(0x39)
            .build();

        assert!(config.pair_axis_data);
        assert_eq!(config.last_register, 0x39);
    }

    #[test]
    fn validate_rejects_boundary_outside_address_space() {
        let zero = DecoderConfig::new().last_register(0).build();
        let too_high = DecoderConfig::new().last_register(0x40).build();

        assert_eq!(zero.validate(), Err(ConfigError::WrapBoundaryOutOfRange));
        assert_eq!(too_high.validate(), Err(ConfigError::WrapBoundaryOutOfRange));
        assert_eq!(DecoderConfig::new().last_register(0x3F).build().validate(), Ok(()));
    }
}
