use adxl345_hla::params::{BurstMode, Direction};
use adxl345_hla::registers::{Command, REG_DATAX0, REG_DATAX1, REG_POWER_CTL};
use adxl345_hla::{Decoder, DecoderConfig, Description, Record, SpiTap};
use embedded_hal::spi::{Operation, SpiDevice};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

fn write_register<SPI: SpiDevice>(spi: &mut SPI, register: u8, value: u8) -> Result<(), SPI::Error> {
    let command = [Command::encode(register, Direction::Write, BurstMode::Single)];
    spi.transaction(&mut [Operation::Write(&command), Operation::Write(&[value])])
}

fn read_many<SPI: SpiDevice>(spi: &mut SPI, register: u8, buf: &mut [u8]) -> Result<(), SPI::Error> {
    let burst = if buf.len() > 1 {
        BurstMode::Multiple
    } else {
        BurstMode::Single
    };
    let command = [Command::encode(register, Direction::Read, burst)];
    spi.transaction(&mut [Operation::Write(&command), Operation::Read(buf)])
}

#[test]
fn tap_decodes_driver_traffic() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x2D]),
        SpiTransaction::write_vec(vec![0x08]),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0xF2]),
        SpiTransaction::read_vec(vec![0x38, 0xFF, 0x0A, 0x00, 0x04, 0x01]),
        SpiTransaction::transaction_end(),
    ];
    let mut spi = SpiMock::new(&expectations);

    let config = DecoderConfig::new().pair_axis_data(true).build();
    let decoder = Decoder::new(config).unwrap();
    let mut records: Vec<Record<u32>> = Vec::new();
    let mut tap = SpiTap::new(spi.clone(), decoder, |r: Record<u32>| records.push(r));

    write_register(&mut tap, REG_POWER_CTL, 0x08).unwrap();
    let mut axes = [0u8; 6];
    read_many(&mut tap, REG_DATAX0, &mut axes).unwrap();
    drop(tap);
    spi.done();

    assert_eq!(axes, [0x38, 0xFF, 0x0A, 0x00, 0x04, 0x01]);

    let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        lines,
        [
            "Write Single Byte POWER_CTL : 0x08 Measure",
            "Read Multiple Bytes DATAX0 : 0xFF38 (-200)",
            "Read Multiple Bytes DATAX0 : 0x000A (10)",
            "Read Multiple Bytes DATAX0 : 0x0104 (260)",
        ]
    );

    assert_eq!((records[0].start, records[0].end), (0, 2));
    assert_eq!(records[1].address, REG_DATAX1);
    assert_eq!(records[1].description, Description::Word(0xFF38));
    assert!(records[1..].iter().all(|r| r.start == 2));
    assert_eq!(records[3].end, 9);
}

#[test]
fn tap_without_pairing_reports_every_byte() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0xF2]),
        SpiTransaction::read_vec(vec![0x01, 0x02]),
        SpiTransaction::transaction_end(),
    ];
    let mut spi = SpiMock::new(&expectations);

    let sink: heapless::Vec<Record<u32>, 8> = heapless::Vec::new();
    let mut tap = SpiTap::new(spi.clone(), Decoder::default(), sink);

    let mut axis = [0u8; 2];
    read_many(&mut tap, REG_DATAX0, &mut axis).unwrap();
    let (_, sink) = tap.release();
    spi.done();

    let addresses: Vec<u8> = sink.iter().map(|r| r.address).collect();
    assert_eq!(addresses, [REG_DATAX0, REG_DATAX1]);
    assert_eq!(sink[1].to_string(), "Read Multiple Bytes DATAX0 : 0x02");
}
