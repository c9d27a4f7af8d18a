use adxl345_hla::registers::{self, RegisterName};
use adxl345_hla::{Decoder, Error, Event, Phase, Record};

/// Replays `bytes` as one chip-select session, 10 time units per byte.
fn session(events: &mut Vec<Event<u64>>, t: &mut u64, bytes: &[(Option<u8>, Option<u8>)]) {
    events.push(Event::enable(*t, *t));
    for (mosi, miso) in bytes {
        events.push(Event::result(*t, *t + 10, mosi.as_slice(), miso.as_slice()));
        *t += 10;
    }
    events.push(Event::disable(*t, *t));
}

fn w(byte: u8) -> (Option<u8>, Option<u8>) {
    (Some(byte), None)
}

fn r(byte: u8) -> (Option<u8>, Option<u8>) {
    (Some(0x00), Some(byte))
}

fn decode_all(events: &[Event<u64>]) -> Vec<Record<u64>> {
    let mut decoder = Decoder::default();
    events.iter().filter_map(|event| decoder.feed(event)).collect()
}

#[test]
fn typical_initialisation_capture() {
    let mut events = Vec::new();
    let mut t = 0;
    // DEVID check.
    session(&mut events, &mut t, &[w(0x80), r(0xE5)]);
    // DATA_FORMAT: full resolution, +-16 g.
    session(&mut events, &mut t, &[w(0x31), w(0x0B)]);
    // BW_RATE: 100 Hz.
    session(&mut events, &mut t, &[w(0x2C), w(0x0A)]);
    // Tap threshold rolling into the X offset.
    session(&mut events, &mut t, &[w(0x5D), w(0x30), w(0x10)]);
    // INT_ENABLE: data ready and watermark.
    session(&mut events, &mut t, &[w(0x2E), w(0x82)]);
    // POWER_CTL: measure.
    session(&mut events, &mut t, &[w(0x2D), w(0x08)]);
    // FIFO_STATUS poll.
    session(&mut events, &mut t, &[w(0xB9), r(0x90)]);

    let lines: Vec<String> = decode_all(&events).iter().map(|r| r.to_string()).collect();
    assert_eq!(
        lines,
        [
            "Read Single Byte DEVID : 0xE5",
            "Write Single Byte DATA_FORMAT : 0x0B Full Resolution | Range: 3",
            "Write Single Byte BW_RATE : 0x0A Rate: 10",
            "Write Multiple Bytes THRESH_TAP : 0x30 3000 mg",
            "Write Multiple Bytes THRESH_TAP : 0x10 249.6 mg",
            "Write Single Byte INT_ENABLE : 0x82 DATA_READY | Watermark",
            "Write Single Byte POWER_CTL : 0x08 Measure",
            "Read Single Byte FIFO_STATUS : 0x90 FIFO_Trigger | Entries: 16",
        ]
    );
}

#[test]
fn offsets_and_timing_scale_exactly() {
    let mut events = Vec::new();
    let mut t = 0;
    session(&mut events, &mut t, &[w(0x5E), w(0x03), w(0x01), w(0x02), w(0x01), w(0x03)]);

    let lines: Vec<String> = decode_all(&events).iter().map(|r| r.to_string()).collect();
    assert_eq!(
        lines,
        [
            "Write Multiple Bytes OFSX : 0x03 46.8 mg",
            "Write Multiple Bytes OFSX : 0x01 15.6 mg",
            "Write Multiple Bytes OFSX : 0x02 31.2 mg",
            "Write Multiple Bytes OFSX : 0x01 625 uS",
            "Write Multiple Bytes OFSX : 0x03 3.75 mS",
        ]
    );
}

#[test]
fn records_are_anchored_to_the_address_byte() {
    let mut events = Vec::new();
    let mut t = 100;
    session(&mut events, &mut t, &[w(0xF2), r(1), r(2), r(3), r(4), r(5), r(6)]);

    let records = decode_all(&events);
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.start == 100));
    let ends: Vec<u64> = records.iter().map(|r| r.end).collect();
    assert_eq!(ends, [120, 130, 140, 150, 160, 170]);
    let addresses: Vec<u8> = records.iter().map(|r| r.address).collect();
    assert_eq!(addresses, [0x32, 0x33, 0x34, 0x35, 0x36, 0x37]);
}

#[test]
fn truncated_transfer_does_not_derail_following_sessions() {
    let mut events = Vec::new();
    let mut t = 0;
    session(&mut events, &mut t, &[w(0xF2), (Some(0x00), None), r(0x44)]);
    session(&mut events, &mut t, &[(None, Some(0x2D))]);
    session(&mut events, &mut t, &[w(0x3F), w(0x12)]);

    let mut decoder = Decoder::default();
    let outcomes: Vec<_> = events.iter().map(|event| decoder.decode(event)).collect();
    assert!(outcomes.contains(&Err(Error::MissingByte)));
    assert_eq!(decoder.phase(), Phase::Idle);

    let records: Vec<Record<u64>> = outcomes.into_iter().filter_map(|o| o.ok().flatten()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].address, 0x32);
    assert_eq!(records[0].to_string(), "Read Multiple Bytes DATAX0 : 0x44");
    assert_eq!(records[1].label.register, RegisterName::Unknown(0x3F));
    assert_eq!(records[1].to_string(), "Write Single Byte 0x3F : 0x12");
}

#[test]
fn lookup_covers_reserved_gap() {
    for address in 0x01..0x1D {
        assert_eq!(registers::lookup(address).name, RegisterName::Unknown(address));
    }
    assert_eq!(registers::lookup(0x1D).name.as_str(), Some("THRESH_TAP"));
    assert_eq!(registers::lookup(0x3C).name.as_str(), Some("ORIENT"));
    assert_eq!(registers::lookup(0x3D).name.to_string(), "0x3D");
}
