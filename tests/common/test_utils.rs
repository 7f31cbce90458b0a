//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use spi_sensors::{Bme680Config, Bme680Driver, ImuConfig, Lsm9ds1Driver};

/// Mock delay implementation for testing
///
/// Records every requested delay instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    /// Requested delays in ms, in order
    pub delays_ms: Vec<u32>,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // No-op for testing
    }

    fn delay_us(&mut self, _us: u32) {
        // No-op for testing
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Temperature/pressure calibration block (0x8A-0xA0) of the reference sensor
pub const CALIB_TP: [u8; 23] = [
    0x4A, 0x67, // par_t2 = 26442
    0x03, // par_t3 = 3
    0x00, //
    0x49, 0x8E, // par_p1 = 36425
    0x50, 0xD7, // par_p2 = -10416
    0x58, // par_p3 = 88
    0x00, //
    0x1D, 0x1C, // par_p4 = 7197
    0x50, 0xFF, // par_p5 = -176
    0x30, // par_p7 = 48
    0x1E, // par_p6 = 30
    0x00, 0x00, //
    0xA6, 0xF4, // par_p8 = -2906
    0xF4, 0xF6, // par_p9 = -2316
    0x1E, // par_p10 = 30
];

/// Humidity/temperature calibration block (0xE1-0xEA) of the reference sensor
pub const CALIB_HT: [u8; 10] = [
    0x3E, 0xE0, 0x31, // par_h2 = 1006, par_h1 = 784
    0x00, // par_h3 = 0
    0x2D, // par_h4 = 45
    0x14, // par_h5 = 20
    0x78, // par_h6 = 120
    0x9C, // par_h7 = -100
    0xD0, 0x68, // par_t1 = 26832
];

/// Data block (0x1F-0x26) of one reference measurement
///
/// Unpacks to pressure 395246, temperature 500803, humidity 22000.
pub const SAMPLE_DATA: [u8; 8] = [0x60, 0x7E, 0xE0, 0x7A, 0x44, 0x30, 0x55, 0xF0];

/// Mock BME680 loaded with the reference calibration and sample
pub fn bme680_mock() -> MockInterface {
    let interface = MockInterface::bme680();
    interface.set_registers(0x8A, &CALIB_TP);
    interface.set_registers(0xE1, &CALIB_HT);
    interface.set_registers(0x1F, &SAMPLE_DATA);
    interface
}

/// Create a BME680 driver on a mock
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_bme680_driver() -> (Bme680Driver<MockInterface>, MockInterface) {
    let interface = bme680_mock();
    let interface_clone = interface.clone();
    (Bme680Driver::new(interface), interface_clone)
}

/// Create a BME680 driver on a mock and run `begin()` with the default
/// configuration; the operations log is cleared afterwards
pub fn create_started_bme680_driver() -> (Bme680Driver<MockInterface>, MockInterface) {
    let (mut driver, interface) = create_bme680_driver();
    driver
        .begin(&mut MockDelay::default(), Bme680Config::default())
        .expect("begin on mock failed");
    interface.clear_operations();
    (driver, interface)
}

/// Create an LSM9DS1 driver on a mock
pub fn create_lsm9ds1_driver() -> (Lsm9ds1Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::lsm9ds1();
    let interface_clone = interface.clone();
    (Lsm9ds1Driver::new(interface), interface_clone)
}

/// Create an LSM9DS1 driver on a mock and run `begin()` with the default
/// configuration; the operations log is cleared afterwards
pub fn create_started_lsm9ds1_driver() -> (Lsm9ds1Driver<MockInterface>, MockInterface) {
    let (mut driver, interface) = create_lsm9ds1_driver();
    driver
        .begin(ImuConfig::default())
        .expect("begin on mock failed");
    interface.clear_operations();
    (driver, interface)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
