//! Bus-side integration for the ADXL345 decoder.

pub mod spi;

use crate::event::Record;
use crate::log::debug;

/// Destination for records produced while tapping a bus.
pub trait RecordSink<T> {
    /// Receives one decoded record.
    fn record(&mut self, record: Record<T>);
}

impl<T, F> RecordSink<T> for F
where
    F: FnMut(Record<T>),
{
    fn record(&mut self, record: Record<T>) {
        self(record)
    }
}

impl<T, const N: usize> RecordSink<T> for heapless::Vec<Record<T>, N> {
    /// Records arriving once the vector is full are dropped.
    fn record(&mut self, record: Record<T>) {
        if let Err(record) = self.push(record) {
            debug!("sink full, record at register {} dropped", record.address);
        }
    }
}
