//! Host-facing event and record types.
//!
//! The host frames chip-select edges and byte transfers; this module only
//! carries them. Timestamps are opaque and copied into the records as-is.

use core::fmt;

use crate::params::{BurstMode, Direction};
use crate::registers::{Quantity, RegisterName};
use crate::render::{Items, Joined};

/// What happened on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Chip select asserted.
    Enable,
    /// One byte exchanged; either channel may be empty.
    Result {
        /// Byte sent from host to device.
        mosi: Option<u8>,
        /// Byte sent from device to host.
        miso: Option<u8>,
    },
    /// Chip select released.
    Disable,
}

/// One framing event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event<T> {
    /// Event kind and payload.
    pub kind: EventKind,
    /// Event start time.
    pub start: T,
    /// Event end time.
    pub end: T,
}

impl<T> Event<T> {
    /// Chip-select assertion.
    pub const fn enable(start: T, end: T) -> Self {
        Self {
            kind: EventKind::Enable,
            start,
            end,
        }
    }

    /// Chip-select release.
    pub const fn disable(start: T, end: T) -> Self {
        Self {
            kind: EventKind::Disable,
            start,
            end,
        }
    }

    /// Byte transfer; only the first byte of each channel is used.
    pub fn result(start: T, end: T, mosi: &[u8], miso: &[u8]) -> Self {
        Self {
            kind: EventKind::Result {
                mosi: mosi.first().copied(),
                miso: miso.first().copied(),
            },
            start,
            end,
        }
    }
}

/// Decoded meaning of one data byte, or of a paired 16-bit sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// Plain hex.
    Raw(u8),
    /// Bitfield with the flags and fields that are set.
    Fields {
        /// Raw byte.
        raw: u8,
        /// Rendered items, possibly empty.
        items: Items,
    },
    /// Linear scaled value.
    Scaled {
        /// Raw byte.
        raw: u8,
        /// Scaled value.
        value: Quantity,
    },
    /// Low and high register combined into one 16-bit sample.
    Word(u16),
    /// The descriptor could not be applied; shown as hex.
    Undecodable(u8),
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => write!(f, "0x{:02X}", raw),
            Self::Fields { raw, items } if items.is_empty() => write!(f, "0x{:02X}", raw),
            Self::Fields { raw, items } => write!(f, "0x{:02X} {}", raw, Joined(items)),
            Self::Scaled { raw, value } => write!(f, "0x{:02X} {}", raw, value),
            Self::Word(word) => write!(f, "0x{:04X} ({})", word, *word as i16),
            Self::Undecodable(raw) => write!(f, "0x{:02X} Fail decode", raw),
        }
    }
}

/// Register label of a record: burst prefix and register name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Label {
    /// Burst mode of the session.
    pub burst: BurstMode,
    /// Name of the register the session started at.
    pub register: RegisterName,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.burst, self.register)
    }
}

/// One decoded data byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    /// Register label.
    pub label: Label,
    /// Transfer direction.
    pub direction: Direction,
    /// Register the byte was read from or written to.
    pub address: u8,
    /// Decoded value.
    pub description: Description,
    /// Start time of the address byte.
    pub start: T,
    /// End time of the current byte.
    pub end: T,
}

impl<T> fmt::Display for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} : {}", self.direction, self.label, self.description)
    }
}
