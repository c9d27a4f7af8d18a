//! Register map definitions for the ADXL345 accelerometer family.
//!
//! The table covers the ADXL345 map plus the `TAP_SIGN`/`ORIENT_*`
//! registers only present on the ADXL344 and ADXL346. Layouts are listed
//! most significant bit first, the way the datasheet draws them.
#![allow(unused_parens)]

use core::fmt;

use modular_bitfield::prelude::*;

use crate::params::{BurstMode, Direction};

/// Highest address reachable with the 6-bit address field.
pub const MAX_ADDRESS: u8 = 0x3F;

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `THRESH_TAP`.
pub const REG_THRESH_TAP: u8 = 0x1D;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `DUR`.
pub const REG_DUR: u8 = 0x21;
/// Register address of `Latent`.
pub const REG_LATENT: u8 = 0x22;
/// Register address of `Window`.
pub const REG_WINDOW: u8 = 0x23;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `THRESH_FF`.
pub const REG_THRESH_FF: u8 = 0x28;
/// Register address of `TIME_FF`.
pub const REG_TIME_FF: u8 = 0x29;
/// Register address of `TAP_AXES`.
pub const REG_TAP_AXES: u8 = 0x2A;
/// Register address of `ACT_TAP_STATUS`.
pub const REG_ACT_TAP_STATUS: u8 = 0x2B;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAX1`.
pub const REG_DATAX1: u8 = 0x33;
/// Register address of `DATAY0`.
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAY1`.
pub const REG_DATAY1: u8 = 0x35;
/// Register address of `DATAZ0`.
pub const REG_DATAZ0: u8 = 0x36;
/// Register address of `DATAZ1`.
pub const REG_DATAZ1: u8 = 0x37;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;
/// Register address of `FIFO_STATUS`.
pub const REG_FIFO_STATUS: u8 = 0x39;
/// Register address of `TAP_SIGN` (ADXL344/ADXL346 only).
pub const REG_TAP_SIGN: u8 = 0x3A;
/// Register address of `ORIENT_CONF` (ADXL344/ADXL346 only).
pub const REG_ORIENT_CONF: u8 = 0x3B;
/// Register address of `ORIENT` (ADXL344/ADXL346 only).
pub const REG_ORIENT: u8 = 0x3C;

/// Bitfield representation of the SPI command byte that opens every transaction.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    // Register address (bits 5:0).
    pub address: B6,
    // Multi-byte flag (bit 6).
    pub burst: BurstMode,
    // Read/write flag (bit 7).
    pub direction: Direction,
}

impl Command {
    /// Builds the command byte addressing `register`.
    pub fn encode(register: u8, direction: Direction, burst: BurstMode) -> u8 {
        Command::new()
            .with_address(register & MAX_ADDRESS)
            .with_burst(burst)
            .with_direction(direction)
            .into()
    }
}

impl From<u8> for Command {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Command> for u8 {
    fn from(value: Command) -> Self {
        value.into_bytes()[0]
    }
}

/// Meaning of a single bit inside a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bit {
    /// Reserved bit, never shown.
    Reserved,
    /// Standalone flag, shown by name when set.
    Flag(&'static str),
    /// One bit of a multi-bit numeric field; `bit` is its weight inside the field.
    Field {
        /// Field name shared by all bits of the field.
        name: &'static str,
        /// Bit index inside the field, `0` being the least significant.
        bit: u8,
    },
}

/// Per-bit meaning of a register, index 0 being bit 7 of the byte.
pub type Layout = [Bit; 8];

/// Linear conversion from a raw register value to a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scale {
    /// Multiplier expressed in thousandths (`62.5` is stored as `62_500`).
    pub thousandths: u32,
    /// Physical unit appended to the scaled value.
    pub unit: &'static str,
}

impl Scale {
    /// Applies the multiplier to a raw register value.
    pub const fn apply(self, raw: u8) -> Quantity {
        Quantity {
            thousandths: raw as u32 * self.thousandths,
            unit: self.unit,
        }
    }
}

/// A scaled register value, kept in thousandths to stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quantity {
    /// Value multiplied by 1000.
    pub thousandths: u32,
    /// Physical unit.
    pub unit: &'static str,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.thousandths / 1000;
        let mut frac = self.thousandths % 1000;
        if frac == 0 {
            return write!(f, "{} {}", whole, self.unit);
        }

        let mut width = 3;
        while frac % 10 == 0 {
            frac /= 10;
            width -= 1;
        }
        write!(f, "{}.{:0width$} {}", whole, frac, self.unit, width = width)
    }
}

/// How the value of a register is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interpretation {
    /// Shown as plain hex.
    Raw,
    /// Decoded bit by bit.
    Bitfield(&'static Layout),
    /// Multiplied into a physical quantity.
    Scale(Scale),
}

/// Role of a register inside a multi-register quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pairing {
    /// Stand-alone 8-bit register.
    Single,
    /// Least significant byte of a little-endian 16-bit quantity.
    LowByte,
}

/// Name of a register, synthesized from the address when undocumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterName {
    /// Datasheet name.
    Known(&'static str),
    /// Undocumented address, shown as `0xNN`.
    Unknown(u8),
}

impl RegisterName {
    /// Returns the datasheet name, if any.
    pub const fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Known(name) => Some(*name),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for RegisterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(name) => f.write_str(name),
            Self::Unknown(address) => write!(f, "0x{:02X}", address),
        }
    }
}

/// Static description of one register address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Descriptor {
    /// Register address.
    pub address: u8,
    /// Register name.
    pub name: RegisterName,
    /// Value interpretation.
    pub interpretation: Interpretation,
    /// Multi-register role.
    pub pairing: Pairing,
}

impl Descriptor {
    const fn raw(address: u8, name: &'static str) -> Self {
        Self {
            address,
            name: RegisterName::Known(name),
            interpretation: Interpretation::Raw,
            pairing: Pairing::Single,
        }
    }

    const fn bits(address: u8, name: &'static str, layout: &'static Layout) -> Self {
        Self {
            interpretation: Interpretation::Bitfield(layout),
            ..Self::raw(address, name)
        }
    }

    const fn scaled(address: u8, name: &'static str, thousandths: u32, unit: &'static str) -> Self {
        Self {
            interpretation: Interpretation::Scale(Scale { thousandths, unit }),
            ..Self::raw(address, name)
        }
    }

    const fn low_byte(self) -> Self {
        Self {
            pairing: Pairing::LowByte,
            ..self
        }
    }

    /// Descriptor used for addresses missing from the register map.
    pub const fn unknown(address: u8) -> Self {
        Self {
            address,
            name: RegisterName::Unknown(address),
            interpretation: Interpretation::Raw,
            pairing: Pairing::Single,
        }
    }
}

const RSVD: Bit = Bit::Reserved;

const fn flag(name: &'static str) -> Bit {
    Bit::Flag(name)
}

const fn field(name: &'static str, bit: u8) -> Bit {
    Bit::Field { name, bit }
}

const ACT_INACT_CTL_LAYOUT: Layout = [
    flag("ACT AC/~DC"),
    flag("ACT_X ena"),
    flag("ACT_Y ena"),
    flag("ACT_Z ena"),
    flag("INACT AC/~DC"),
    flag("INACT_X ena"),
    flag("INACT_Y ena"),
    flag("INACT_Z ena"),
];

const TAP_AXES_LAYOUT: Layout = [
    RSVD,
    RSVD,
    RSVD,
    RSVD,
    flag("Suppress"),
    flag("TAP_X Ena"),
    flag("TAP_Y Ena"),
    flag("TAP_Z Ena"),
];

const ACT_TAP_STATUS_LAYOUT: Layout = [
    RSVD,
    flag("ACT_X"),
    flag("ACT_Y"),
    flag("ACT_Z"),
    flag("Asleep"),
    flag("TAP_X"),
    flag("TAP_Y"),
    flag("TAP_Z"),
];

const BW_RATE_LAYOUT: Layout = [
    RSVD,
    RSVD,
    RSVD,
    flag("LOW_POWER"),
    field("Rate", 3),
    field("Rate", 2),
    field("Rate", 1),
    field("Rate", 0),
];

const POWER_CTL_LAYOUT: Layout = [
    RSVD,
    RSVD,
    flag("Link"),
    flag("AUTO SLEEP"),
    flag("Measure"),
    flag("Sleep"),
    field("Wakeup mode", 1),
    field("Wakeup mode", 0),
];

// Shared by INT_ENABLE, INT_MAP and INT_SOURCE.
const INTERRUPT_LAYOUT: Layout = [
    flag("DATA_READY"),
    flag("SINGLE TAP"),
    flag("DOUBLE TAP"),
    flag("Activity"),
    flag("Inactivity"),
    flag("FREE_FALL"),
    flag("Watermark"),
    flag("Overrun"),
];

const DATA_FORMAT_LAYOUT: Layout = [
    flag("SELF_TEST"),
    flag("SPI 3 Wire Mode"),
    flag("Interrupt Invert"),
    RSVD,
    flag("Full Resolution"),
    flag("Justify Left"),
    field("Range", 1),
    field("Range", 0),
];

const FIFO_CTL_LAYOUT: Layout = [
    field("FIFO_MODE", 1),
    field("FIFO_MODE", 0),
    flag("Trigger"),
    field("Samples", 4),
    field("Samples", 3),
    field("Samples", 2),
    field("Samples", 1),
    field("Samples", 0),
];

const FIFO_STATUS_LAYOUT: Layout = [
    flag("FIFO_Trigger"),
    RSVD,
    field("Entries", 5),
    field("Entries", 4),
    field("Entries", 3),
    field("Entries", 2),
    field("Entries", 1),
    field("Entries", 0),
];

/// Every documented register, sorted by address.
pub static REGISTERS: [Descriptor; 33] = [
    Descriptor::raw(REG_DEVID, "DEVID"),
    Descriptor::scaled(REG_THRESH_TAP, "THRESH_TAP", 62_500, "mg"),
    Descriptor::scaled(REG_OFSX, "OFSX", 15_600, "mg"),
    Descriptor::scaled(REG_OFSY, "OFSY", 15_600, "mg"),
    Descriptor::scaled(REG_OFSZ, "OFSZ", 15_600, "mg"),
    Descriptor::scaled(REG_DUR, "DUR", 625_000, "uS"),
    Descriptor::scaled(REG_LATENT, "Latent", 1_250, "mS"),
    Descriptor::scaled(REG_WINDOW, "Window", 1_250, "mS"),
    Descriptor::scaled(REG_THRESH_ACT, "THRESH_ACT", 62_500, "mg"),
    Descriptor::scaled(REG_THRESH_INACT, "THRESH_INACT", 62_500, "mg"),
    Descriptor::scaled(REG_TIME_INACT, "TIME_INACT", 1_000, "S"),
    Descriptor::bits(REG_ACT_INACT_CTL, "ACT_INACT_CTL", &ACT_INACT_CTL_LAYOUT),
    Descriptor::scaled(REG_THRESH_FF, "THRESH_FF", 62_500, "mg"),
    Descriptor::scaled(REG_TIME_FF, "TIME_FF", 5_000, "mS"),
    Descriptor::bits(REG_TAP_AXES, "TAP_AXES", &TAP_AXES_LAYOUT),
    Descriptor::bits(REG_ACT_TAP_STATUS, "ACT_TAP_STATUS", &ACT_TAP_STATUS_LAYOUT),
    Descriptor::bits(REG_BW_RATE, "BW_RATE", &BW_RATE_LAYOUT),
    Descriptor::bits(REG_POWER_CTL, "POWER_CTL", &POWER_CTL_LAYOUT),
    Descriptor::bits(REG_INT_ENABLE, "INT_ENABLE", &INTERRUPT_LAYOUT),
    Descriptor::bits(REG_INT_MAP, "INT_MAP", &INTERRUPT_LAYOUT),
    Descriptor::bits(REG_INT_SOURCE, "INT_SOURCE", &INTERRUPT_LAYOUT),
    Descriptor::bits(REG_DATA_FORMAT, "DATA_FORMAT", &DATA_FORMAT_LAYOUT),
    Descriptor::raw(REG_DATAX0, "DATAX0").low_byte(),
    Descriptor::raw(REG_DATAX1, "DATAX1"),
    Descriptor::raw(REG_DATAY0, "DATAY0").low_byte(),
    Descriptor::raw(REG_DATAY1, "DATAY1"),
    Descriptor::raw(REG_DATAZ0, "DATAZ0").low_byte(),
    Descriptor::raw(REG_DATAZ1, "DATAZ1"),
    Descriptor::bits(REG_FIFO_CTL, "FIFO_CTL", &FIFO_CTL_LAYOUT),
    Descriptor::bits(REG_FIFO_STATUS, "FIFO_STATUS", &FIFO_STATUS_LAYOUT),
    Descriptor::raw(REG_TAP_SIGN, "TAP_SIGN"),
    Descriptor::raw(REG_ORIENT_CONF, "ORIENT_CONF"),
    Descriptor::raw(REG_ORIENT, "ORIENT"),
];

/// Returns the descriptor for `address`, or a raw hex one when undocumented.
pub fn lookup(address: u8) -> Descriptor {
    match REGISTERS.binary_search_by_key(&address, |descriptor| descriptor.address) {
        Ok(index) => REGISTERS[index],
        Err(_) => Descriptor::unknown(address),
    }
}
