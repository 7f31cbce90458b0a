//! Unit tests for SPI transaction framing

use crate::common::{CALIB_HT, CALIB_TP, Frame, MockDelay, MockSpi, mock_spi::MockSpiError};
use device_driver::RegisterInterface;
use spi_sensors::{
    Bme680Config, Bme680Driver, ImuConfig, Lsm9ds1Driver, RegisterAccess, SpiInterface,
};

#[test]
fn test_read_sets_read_flag() {
    let spi = MockSpi::new();
    spi.queue_response(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let mut interface = SpiInterface::new(spi.clone());

    let mut buf = [0u8; 8];
    interface.read_register(0x1F, 64, &mut buf).unwrap();

    assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(
        spi.transactions(),
        vec![vec![Frame::Write(vec![0x9F]), Frame::Read(8)]]
    );
}

#[test]
fn test_write_clears_read_flag() {
    let spi = MockSpi::new();
    let mut interface = SpiInterface::new(spi.clone());

    interface.write_register(0xE0, 8, &[0xB6]).unwrap();
    interface.write_register(0x74, 8, &[0xB5]).unwrap();

    assert_eq!(
        spi.transactions(),
        vec![
            vec![Frame::Write(vec![0x60]), Frame::Write(vec![0xB6])],
            vec![Frame::Write(vec![0x74]), Frame::Write(vec![0xB5])],
        ]
    );
}

#[test]
fn test_multi_byte_write_single_transaction() {
    let spi = MockSpi::new();
    let mut interface = SpiInterface::new(spi.clone());

    interface.write_bytes(0x10, &[0x60, 0x00, 0x00]).unwrap();

    assert_eq!(
        spi.transactions(),
        vec![vec![
            Frame::Write(vec![0x10]),
            Frame::Write(vec![0x60, 0x00, 0x00])
        ]]
    );
}

#[test]
fn test_typed_reads() {
    let spi = MockSpi::new();
    let mut interface = SpiInterface::new(spi.clone());

    spi.queue_response(&[0x49, 0x8E]);
    assert_eq!(interface.read_u16_le(0x8E).unwrap(), 36425);

    spi.queue_response(&[0x50, 0xD7]);
    assert_eq!(interface.read_i16_le(0x90).unwrap(), -10416);

    spi.queue_response(&[0x9C]);
    assert_eq!(interface.read_i8(0xE8).unwrap(), -100);

    spi.queue_response(&[0x80]);
    assert_eq!(interface.read_i8(0xE8).unwrap(), 128);

    spi.queue_response(&[0x61]);
    assert_eq!(interface.read_u8(0xD0).unwrap(), 0x61);

    assert!(
        spi.transactions()
            .iter()
            .all(|t| matches!(&t[0], Frame::Write(addr) if addr.len() == 1 && addr[0] & 0x80 != 0))
    );
}

#[test]
fn test_bus_error_propagates() {
    let spi = MockSpi::new();
    let mut interface = SpiInterface::new(spi.clone());

    spi.fail_next();
    assert_eq!(interface.read_u8(0xD0), Err(MockSpiError));
    assert_eq!(interface.read_u8(0xD0), Ok(0));
}

#[test]
fn test_bme680_whoami_over_spi() {
    let spi = MockSpi::new();
    spi.queue_response(&[0x61]);
    let mut driver = Bme680Driver::new(SpiInterface::new(spi.clone()));

    assert_eq!(driver.whoami().unwrap(), 0x61);
    assert_eq!(
        spi.transactions(),
        vec![
            // Page 0 selected before the first access
            vec![Frame::Write(vec![0x73]), Frame::Write(vec![0x00])],
            vec![Frame::Write(vec![0xD0]), Frame::Read(1)],
        ]
    );
}

#[test]
fn test_bme680_begin_and_query_over_spi() {
    let spi = MockSpi::new();
    spi.queue_response(&CALIB_TP);
    spi.queue_response(&CALIB_HT);
    let mut driver = Bme680Driver::new(SpiInterface::new(spi.clone()));

    driver
        .begin(&mut MockDelay::default(), Bme680Config::default())
        .unwrap();
    assert_eq!(driver.calibration().unwrap().par_t1, 26832);

    let transactions = spi.transactions();
    let first_bytes: Vec<u8> = transactions
        .iter()
        .map(|t| match &t[0] {
            Frame::Write(bytes) => bytes[0],
            Frame::Read(_) => panic!("transaction must start with the address"),
        })
        .collect();
    assert_eq!(
        first_bytes,
        vec![0x73, 0x60, 0x73, 0x72, 0x74, 0x75, 0x71, 0x73, 0x8A, 0xE1, 0x73, 0x74]
    );
    assert_eq!(transactions[2][1], Frame::Write(vec![0x10]));
    assert_eq!(transactions[8][1], Frame::Read(23));
    assert_eq!(transactions[9][1], Frame::Read(10));

    spi.queue_response(&[0x60, 0x7E, 0xE0, 0x7A, 0x44, 0x30, 0x55, 0xF0]);
    let measurement = driver.query(false, false).unwrap();
    assert_eq!(measurement.raw.pressure, 395_246);

    let transactions = spi.transactions();
    assert_eq!(
        transactions.last().unwrap(),
        &vec![Frame::Write(vec![0x9F]), Frame::Read(8)]
    );
}

#[test]
fn test_lsm9ds1_over_spi() {
    let spi = MockSpi::new();
    let mut driver = Lsm9ds1Driver::new(SpiInterface::new(spi.clone()));

    driver.begin(ImuConfig::default()).unwrap();
    let writes: Vec<_> = spi
        .transactions()
        .iter()
        .map(|t| (t[0].clone(), t[1].clone()))
        .collect();
    assert_eq!(writes.len(), 7);
    assert_eq!(
        writes[6],
        (Frame::Write(vec![0x22]), Frame::Write(vec![0x44]))
    );

    driver.query(false).unwrap();
    let transactions = spi.transactions();
    assert_eq!(
        transactions[7..],
        [
            vec![Frame::Write(vec![0x95]), Frame::Read(9)],
            vec![Frame::Write(vec![0xA8]), Frame::Read(6)],
        ]
    );
}
