//! Strongly typed field enumerations for the ADXL345 SPI command byte.
//!
//! These enums map directly to the control bits of the first byte of every
//! SPI transaction and are used by [`Command`](crate::registers::Command),
//! the [`Decoder`](crate::decoder::Decoder) session state and the decoded
//! [`Record`](crate::event::Record) labels.
//!
//! # Examples
//!
//! ```rust
//! use adxl345_hla::params::{BurstMode, Direction};
//!
//! assert_eq!(Direction::Read.label(), "Read");
//! assert_eq!(BurstMode::Multiple.label(), "Multiple Bytes");
//! ```

use core::fmt;

use modular_bitfield::prelude::Specifier;

/// Transfer direction encoded in bit 7 of the command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Direction {
    /// Host writes the addressed register(s).
    Write = 0,
    /// Host reads the addressed register(s).
    Read = 1,
}

impl Direction {
    /// Returns the label used in decoded records.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Write => "Write",
            Self::Read => "Read",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Multi-byte (burst) flag encoded in bit 6 of the command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum BurstMode {
    /// Every data byte addresses the same register.
    Single = 0,
    /// The register address auto-increments after each data byte.
    Multiple = 1,
}

impl BurstMode {
    /// Returns the label prefix used in decoded records.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Byte",
            Self::Multiple => "Multiple Bytes",
        }
    }

    /// Returns `true` when the address advances between data bytes.
    pub const fn auto_increments(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

impl fmt::Display for BurstMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
