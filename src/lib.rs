#![no_std]
#![doc = include_str!("../README.md")]

mod error;

pub mod config;
pub mod decoder;
pub mod event;
pub mod interface;
mod log;
pub mod params;
pub mod registers;
pub mod render;

pub use crate::config::DecoderConfig;
pub use crate::decoder::{Decoder, Phase};
pub use crate::error::{Error, Result};
pub use crate::event::{Description, Event, EventKind, Record};
pub use crate::interface::spi::SpiTap;
pub use crate::registers::lookup;
