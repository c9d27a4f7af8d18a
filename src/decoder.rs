//! Transaction decoder for ADXL345 SPI captures.
//!
//! Every chip-select session starts with a command byte on MOSI carrying the
//! register address, the read/write flag and the multi-byte flag. Each
//! following byte is a data byte for the current register address; in
//! multi-byte mode the address auto-increments after every data byte and
//! wraps to `0x01` once it passes [`DecoderConfig::last_register`].
//!
//! Records are labelled with the register the session *started* at, while
//! the value itself is interpreted with the descriptor of the register the
//! byte actually belongs to.

use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use crate::event::{Description, Event, EventKind, Label, Record};
use crate::log::{debug, trace};
use crate::params::{BurstMode, Direction};
use crate::registers::{self, Command, Descriptor, Interpretation, Pairing};
use crate::render::render_bitfield;

/// Coarse decoder state, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No chip-select session is open.
    Idle,
    /// A session is open and the command byte is expected next.
    AwaitingAddress,
    /// The command byte was seen; data bytes are being decoded.
    Streaming,
}

/// State of one chip-select session after its command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session<T> {
    base_address: u8,
    direction: Direction,
    burst: BurstMode,
    next_address: u8,
    byte_position: u16,
    /// Address and value of a held low byte.
    pending_low_byte: Option<(u8, u8)>,
    anchor: T,
}

impl<T: Copy> Session<T> {
    fn open(command: Command, anchor: T) -> Self {
        let base_address = command.address();
        Self {
            base_address,
            direction: command.direction(),
            burst: command.burst(),
            next_address: base_address,
            byte_position: 0,
            pending_low_byte: None,
            anchor,
        }
    }

    /// Register addressed by the command byte.
    pub const fn base_address(&self) -> u8 {
        self.base_address
    }

    /// Transfer direction of the session.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Burst mode of the session.
    pub const fn burst(&self) -> BurstMode {
        self.burst
    }

    /// Register the next data byte belongs to.
    pub const fn next_address(&self) -> u8 {
        self.next_address
    }

    /// Number of data bytes accepted so far.
    pub const fn byte_position(&self) -> u16 {
        self.byte_position
    }

    /// Low byte held back while waiting for its high byte.
    pub const fn pending_low_byte(&self) -> Option<u8> {
        match self.pending_low_byte {
            Some((_, low)) => Some(low),
            None => None,
        }
    }

    /// Start time of the command byte.
    pub const fn anchor(&self) -> T {
        self.anchor
    }

    fn accept(
        &mut self,
        config: &DecoderConfig,
        end: T,
        mosi: Option<u8>,
        miso: Option<u8>,
    ) -> Result<Option<Record<T>>> {
        let byte = match self.direction {
            Direction::Write => mosi,
            Direction::Read => miso,
        }
        .ok_or(Error::MissingByte)?;

        let address = self.next_address;
        self.byte_position = self.byte_position.saturating_add(1);
        if self.burst.auto_increments() {
            self.next_address = next_in_burst(address, config.last_register);
        }

        let descriptor = registers::lookup(address);
        let description = if config.pair_axis_data && self.burst.auto_increments() {
            match (descriptor.pairing, self.pending_low_byte.take()) {
                (Pairing::Single, Some((low_address, low))) if address == low_address + 1 => {
                    Description::Word(u16::from_le_bytes([low, byte]))
                }
                (pairing, stale) => {
                    if let Some((low_address, low)) = stale {
                        debug!("low byte {} of register {} dropped", low, low_address);
                    }
                    if pairing == Pairing::LowByte {
                        self.pending_low_byte = Some((address, byte));
                        return Ok(None);
                    }
                    describe_lossy(&descriptor, byte)
                }
            }
        } else {
            describe_lossy(&descriptor, byte)
        };

        Ok(Some(Record {
            label: Label {
                burst: self.burst,
                register: registers::lookup(self.base_address).name,
            },
            direction: self.direction,
            address,
            description,
            start: self.anchor,
            end,
        }))
    }
}

enum State<T> {
    Idle,
    AwaitingAddress,
    Streaming(Session<T>),
}

/// Stateful decoder turning framing events into [`Record`]s.
pub struct Decoder<T> {
    config: DecoderConfig,
    state: State<T>,
}

impl<T> Default for Decoder<T> {
    fn default() -> Self {
        Self {
            config: DecoderConfig::default(),
            state: State::Idle,
        }
    }
}

impl<T: Copy> Decoder<T> {
    /// Creates an idle decoder after validating `config`.
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: State::Idle,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::AwaitingAddress => Phase::AwaitingAddress,
            State::Streaming(_) => Phase::Streaming,
        }
    }

    /// Returns the open session once its command byte has been decoded.
    pub fn session(&self) -> Option<&Session<T>> {
        match &self.state {
            State::Streaming(session) => Some(session),
            _ => None,
        }
    }

    /// Drops any open session.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Processes one event.
    ///
    /// Returns `Ok(None)` for events that only move the state machine, and
    /// an error when a byte result had to be dropped. The decoder stays
    /// usable after any error.
    pub fn decode(&mut self, event: &Event<T>) -> Result<Option<Record<T>>> {
        match event.kind {
            EventKind::Enable => {
                if let Some(low) = self.session().and_then(Session::pending_low_byte) {
                    debug!("unpaired low byte {} dropped", low);
                }
                self.state = State::AwaitingAddress;
                Ok(None)
            }
            EventKind::Disable => {
                self.state = State::Idle;
                Ok(None)
            }
            EventKind::Result { mosi, miso } => self.decode_byte(event, mosi, miso),
        }
    }

    /// Processes one event, discarding the reason when nothing is produced.
    pub fn feed(&mut self, event: &Event<T>) -> Option<Record<T>> {
        match self.decode(event) {
            Ok(record) => record,
            Err(err) => {
                trace!("event dropped: {}", err);
                None
            }
        }
    }

    fn decode_byte(
        &mut self,
        event: &Event<T>,
        mosi: Option<u8>,
        miso: Option<u8>,
    ) -> Result<Option<Record<T>>> {
        match self.state {
            State::Idle => Err(Error::NoSession),
            State::AwaitingAddress => {
                let command = Command::from(mosi.ok_or(Error::MissingByte)?);
                let session = Session::open(command, event.start);
                trace!(
                    "session {} {} at register {}",
                    session.direction,
                    session.burst,
                    session.base_address
                );
                self.state = State::Streaming(session);
                Ok(None)
            }
            State::Streaming(ref mut session) => session.accept(&self.config, event.end, mosi, miso),
        }
    }
}

/// Interprets `raw` with `descriptor`.
pub fn describe(descriptor: &Descriptor, raw: u8) -> Result<Description> {
    let description = match descriptor.interpretation {
        Interpretation::Raw => Description::Raw(raw),
        Interpretation::Scale(scale) => Description::Scaled {
            raw,
            value: scale.apply(raw),
        },
        Interpretation::Bitfield(layout) => {
            let items = render_bitfield(layout, raw).map_err(|_| Error::MalformedLayout {
                address: descriptor.address,
            })?;
            Description::Fields { raw, items }
        }
    };
    Ok(description)
}

fn describe_lossy(descriptor: &Descriptor, raw: u8) -> Description {
    describe(descriptor, raw).unwrap_or_else(|err| {
        debug!("register {} degraded to hex: {}", descriptor.address, err);
        Description::Undecodable(raw)
    })
}

fn next_in_burst(address: u8, last_register: u8) -> u8 {
    if address >= last_register {
        0x01
    } else {
        address + 1
    }
}
