//! Bit-level rendering of register values.
//!
//! A [`Layout`] is walked from bit 7 down to bit 0. Set flags are reported
//! by name. Bits belonging to a numeric field are accumulated and the field
//! is reported once its bit 0 has been visited, unless the accumulated value
//! is zero.

use core::fmt;

use crate::registers::{Bit, Layout};

/// One entry of a rendered register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Item {
    /// A set flag.
    Flag(&'static str),
    /// A non-zero numeric field.
    Number {
        /// Field name.
        name: &'static str,
        /// Assembled field value.
        value: u8,
    },
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(name) => f.write_str(name),
            Self::Number { name, value } => write!(f, "{}: {}", name, value),
        }
    }
}

/// Rendered items of one byte; a byte yields at most one item per bit.
pub type Items = heapless::Vec<Item, 8>;

/// The layout cannot be applied to a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MalformedLayout;

/// Applies `layout` to `raw`, most significant bit first.
pub fn render_bitfield(layout: &Layout, raw: u8) -> Result<Items, MalformedLayout> {
    let mut items = Items::new();
    let mut open: Option<&'static str> = None;
    let mut number = 0u8;

    for (index, bit) in layout.iter().enumerate() {
        let set = (raw >> (7 - index)) & 0b1 == 0b1;

        match *bit {
            Bit::Reserved => {}
            Bit::Flag(name) => {
                if open.is_some() {
                    return Err(MalformedLayout);
                }
                if set {
                    items.push(Item::Flag(name)).map_err(|_| MalformedLayout)?;
                }
            }
            Bit::Field { name, bit } => {
                if bit > 7 || open.is_some_and(|current| current != name) {
                    return Err(MalformedLayout);
                }
                if set {
                    number |= 1 << bit;
                }

                if bit == 0 {
                    if number != 0 {
                        items
                            .push(Item::Number { name, value: number })
                            .map_err(|_| MalformedLayout)?;
                    }
                    number = 0;
                    open = None;
                } else {
                    open = Some(name);
                }
            }
        }
    }

    if open.is_some() {
        return Err(MalformedLayout);
    }

    Ok(items)
}

/// Displays items joined with ` | `.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'a>(pub &'a [Item]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
