//! SPI tap built on top of `embedded-hal` `SpiDevice`.
//!
//! [`SpiTap`] sits between a driver and its SPI device. Every transaction is
//! forwarded unchanged; once it completed, the bytes that went over the wire
//! are replayed through a [`Decoder`] as one chip-select session. Event times
//! are the running byte index of the tap.
//!
//! `TransferInPlace` buffers are overwritten by the device, so their outgoing
//! bytes are copied before forwarding, up to [`IN_PLACE_CAPACITY`] bytes per
//! transaction. Bytes past that limit replay without a MOSI value.

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
use heapless::Vec;

use super::RecordSink;
use crate::decoder::Decoder;
use crate::event::Event;
use crate::log::debug;

/// Outgoing bytes of in-place transfers kept per transaction.
pub const IN_PLACE_CAPACITY: usize = 64;

type Outgoing = Vec<u8, IN_PLACE_CAPACITY>;

fn outgoing(operations: &[Operation<'_, u8>]) -> Outgoing {
    let mut sent = Outgoing::new();
    for operation in operations {
        if let Operation::TransferInPlace(buf) = operation {
            for &byte in buf.iter() {
                if sent.push(byte).is_err() {
                    debug!("in-place transfer exceeds {} bytes", IN_PLACE_CAPACITY);
                    return sent;
                }
            }
        }
    }
    sent
}

/// SPI device wrapper decoding ADXL345 traffic as it passes.
pub struct SpiTap<SPI, S> {
    spi: SPI,
    decoder: Decoder<u32>,
    sink: S,
    clock: u32,
}

impl<SPI, S> SpiTap<SPI, S> {
    /// Wraps `spi`, sending decoded records to `sink`.
    pub fn new(spi: SPI, decoder: Decoder<u32>, sink: S) -> Self {
        Self {
            spi,
            decoder,
            sink,
            clock: 0,
        }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Provides access to the record sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Provides access to the decoder.
    pub fn decoder(&self) -> &Decoder<u32> {
        &self.decoder
    }

    /// Consumes the tap and returns the owned SPI device and sink.
    pub fn release(self) -> (SPI, S) {
        (self.spi, self.sink)
    }
}

impl<SPI, S> SpiTap<SPI, S>
where
    S: RecordSink<u32>,
{
    fn edge(&mut self, event: Event<u32>) {
        if let Some(record) = self.decoder.feed(&event) {
            self.sink.record(record);
        }
    }

    fn byte(&mut self, mosi: Option<u8>, miso: Option<u8>) {
        let start = self.clock;
        self.clock = self.clock.wrapping_add(1);
        let event = Event::result(
            start,
            self.clock,
            mosi.as_slice(),
            miso.as_slice(),
        );
        self.edge(event);
    }

    fn replay(&mut self, operations: &[Operation<'_, u8>], sent: &[u8]) {
        let mut sent = sent.iter().copied();
        self.edge(Event::enable(self.clock, self.clock));

        for operation in operations {
            match operation {
                Operation::Write(data) => {
                    for &byte in data.iter() {
                        self.byte(Some(byte), None);
                    }
                }
                Operation::Read(buf) => {
                    for &byte in buf.iter() {
                        self.byte(None, Some(byte));
                    }
                }
                Operation::Transfer(read, write) => {
                    for index in 0..read.len().max(write.len()) {
                        self.byte(write.get(index).copied(), read.get(index).copied());
                    }
                }
                Operation::TransferInPlace(buf) => {
                    for &byte in buf.iter() {
                        self.byte(sent.next(), Some(byte));
                    }
                }
                Operation::DelayNs(_) => {}
            }
        }

        self.edge(Event::disable(self.clock, self.clock));
    }
}

impl<SPI, S> ErrorType for SpiTap<SPI, S>
where
    SPI: ErrorType,
{
    type Error = SPI::Error;
}

impl<SPI, S> SpiDevice for SpiTap<SPI, S>
where
    SPI: SpiDevice,
    S: RecordSink<u32>,
{
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let sent = outgoing(operations);
        self.spi.transaction(operations)?;
        self.replay(operations, &sent);
        Ok(())
    }
}
