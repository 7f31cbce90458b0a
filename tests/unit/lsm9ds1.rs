//! Unit tests for the LSM9DS1 accelerometer/gyroscope driver

use crate::common::{create_lsm9ds1_driver, create_started_lsm9ds1_driver};
use spi_sensors::{AccelData, Error, Feature, GyroData, ImuConfig, ImuSample, Selection};

fn load_sample(interface: &crate::common::MockInterface) {
    interface.set_registers(
        0x15,
        &[
            0x38, 0xFF, // temperature -200
            0x07, // status: accel, gyro and temperature data available
            0x64, 0x00, // gyro x 100
            0x9C, 0xFF, // gyro y -100
            0x00, 0x80, // gyro z -32768
        ],
    );
    interface.set_registers(
        0x28,
        &[
            0x00, 0x40, // accel x 16384
            0xFF, 0xFF, // accel y -1
            0x01, 0x00, // accel z 1
        ],
    );
}

#[test]
fn test_begin_default_register_sequence() {
    let (mut driver, interface) = create_lsm9ds1_driver();

    driver.begin(ImuConfig::default()).unwrap();

    assert_eq!(
        interface.writes(),
        vec![
            (0x10, 0x60), // CTRL_REG1_G: 119 Hz, 245 dps
            (0x11, 0x00), // CTRL_REG2_G
            (0x12, 0x00), // CTRL_REG3_G
            (0x1F, 0x38), // CTRL_REG5_XL: x/y/z enabled
            (0x1E, 0x38), // CTRL_REG4: x/y/z enabled
            (0x20, 0x60), // CTRL_REG6_XL: 119 Hz, 2 g
            (0x22, 0x44), // CTRL_REG8: BDU, IF_ADD_INC
        ]
    );
}

#[test]
fn test_begin_custom_selection() {
    let (mut driver, interface) = create_lsm9ds1_driver();
    let config = ImuConfig {
        gyro_odr: Selection::ByValue(952.0),
        gyro_full_scale: Selection::ByValue(2000.0),
        accel_odr: Selection::ByIndex(1),
        accel_full_scale: Selection::ByValue(16.0),
    };

    driver.begin(config).unwrap();

    let writes = interface.writes();
    assert_eq!(writes[0], (0x10, 0xD8));
    assert_eq!(writes[5], (0x20, 0x28));

    let resolved = driver.config().unwrap();
    assert_eq!(resolved.gyro_odr_hz(), Some(952.0));
    assert_eq!(resolved.gyro_full_scale_dps(), Some(2000.0));
    assert_eq!(resolved.accel_odr_hz(), Some(10.0));
    assert_eq!(resolved.accel_full_scale_g(), Some(16.0));
}

#[test]
fn test_begin_writes_reserved_index_as_code() {
    let (mut driver, interface) = create_lsm9ds1_driver();
    let config = ImuConfig {
        gyro_odr: Selection::ByIndex(7),
        gyro_full_scale: Selection::ByIndex(2),
        accel_odr: Selection::ByIndex(7),
        ..ImuConfig::default()
    };

    driver.begin(config).unwrap();

    let writes = interface.writes();
    assert_eq!(writes[0], (0x10, 0xF0));
    assert_eq!(writes[5], (0x20, 0xE0));

    let resolved = driver.config().unwrap();
    assert_eq!(resolved.gyro_odr_code(), 7);
    assert_eq!(resolved.gyro_full_scale_code(), 2);
    assert_eq!(resolved.gyro_odr_hz(), None);
    assert_eq!(resolved.gyro_full_scale_dps(), None);
    assert_eq!(resolved.accel_odr_hz(), None);
}

#[test]
fn test_begin_rejects_unlisted_value() {
    let (mut driver, interface) = create_lsm9ds1_driver();
    let config = ImuConfig {
        accel_odr: Selection::ByValue(100.0),
        ..ImuConfig::default()
    };

    assert!(matches!(driver.begin(config), Err(Error::InvalidConfig)));
    assert!(interface.is_untouched());
}

#[test]
fn test_begin_rejects_index_out_of_range() {
    let (mut driver, interface) = create_lsm9ds1_driver();
    let config = ImuConfig {
        accel_odr: Selection::ByIndex(8),
        ..ImuConfig::default()
    };

    assert!(matches!(driver.begin(config), Err(Error::InvalidConfig)));
    assert!(interface.is_untouched());
}

#[test]
fn test_query() {
    let (mut driver, interface) = create_started_lsm9ds1_driver();
    load_sample(&interface);

    let sample = driver.query(false).unwrap();

    assert_eq!(
        sample,
        ImuSample {
            status: 0x07,
            temperature: -200,
            gyro: GyroData {
                x: 100,
                y: -100,
                z: -32768
            },
            accel: AccelData { x: 16384, y: -1, z: 1 },
        }
    );
    assert_eq!(interface.read_count(), 15);
}

#[test]
fn test_query_calibrated_unsupported() {
    let (mut driver, interface) = create_started_lsm9ds1_driver();

    let result = driver.query(true);

    assert!(matches!(
        result,
        Err(Error::Unsupported(Feature::ImuCalibration))
    ));
    assert!(interface.is_untouched());
}

#[test]
fn test_single_quantity_reads() {
    let (mut driver, interface) = create_started_lsm9ds1_driver();
    load_sample(&interface);

    assert_eq!(driver.read_status().unwrap(), 0x07);
    assert_eq!(driver.read_temperature().unwrap(), -200);
    assert_eq!(
        driver.read_gyro().unwrap(),
        GyroData {
            x: 100,
            y: -100,
            z: -32768
        }
    );
    assert_eq!(
        driver.read_accel().unwrap(),
        AccelData { x: 16384, y: -1, z: 1 }
    );
}

#[test]
fn test_read_status_flags() {
    let (mut driver, interface) = create_started_lsm9ds1_driver();

    interface.set_register(0x17, 0x42);
    assert_eq!(driver.read_status().unwrap(), 0x42);
    interface.set_register(0x17, 0x00);
    assert_eq!(driver.read_status().unwrap(), 0x00);

    // Bit 7 is reported as read, same as the status byte of a full query
    load_sample(&interface);
    interface.set_register(0x17, 0xC5);
    assert_eq!(driver.read_status().unwrap(), 0xC5);
    assert_eq!(driver.query(false).unwrap().status, 0xC5);
}

#[test]
fn test_verify_who_am_i() {
    let (mut driver, interface) = create_lsm9ds1_driver();
    assert_eq!(driver.whoami().unwrap(), 0x68);
    driver.verify().unwrap();

    interface.set_register(0x0F, 0x3D);
    assert!(matches!(driver.verify(), Err(Error::InvalidDevice(0x3D))));
}

#[test]
fn test_query_without_begin() {
    let (mut driver, interface) = create_lsm9ds1_driver();
    load_sample(&interface);

    assert_eq!(driver.query(false).unwrap().temperature, -200);
}
