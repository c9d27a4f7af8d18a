//! Error handling primitives for the ADXL345 decoder.

/// Crate-wide result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Reasons a single event produced no record, or a degraded one.
///
/// None of these are fatal: the decoder stays usable for the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The channel carrying the expected byte was empty for this event.
    MissingByte,
    /// A byte result arrived while no chip-select session was open.
    NoSession,
    /// The bitfield layout of the register at `address` is inconsistent.
    MalformedLayout {
        /// Register whose layout failed to render.
        address: u8,
    },
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl From<crate::config::ConfigError> for Error {
    fn from(_: crate::config::ConfigError) -> Self {
        Self::InvalidConfig
    }
}
