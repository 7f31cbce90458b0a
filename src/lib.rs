#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod bits;
pub mod device;
pub mod interface;
pub mod paging;
pub mod registers;
pub mod select;
pub mod sensors;

// Re-export main types
pub use device::{Bme680Driver, Lsm9ds1Driver, MeasurementState};
pub use interface::{RegisterAccess, SpiInterface};
pub use paging::PagedInterface;
pub use select::ChipSelect;
pub use sensors::{
    AccelData, Bme680Config, CalibrationCoefficients, CompensatedSample, GyroData, ImuConfig,
    ImuSample, Measurement, Oversampling, RawSample, ResolvedImuConfig, Selection,
};

/// Expected value of the BME680 `chip_id` register (0xD0)
pub const BME680_CHIP_ID: u8 = 0x61;

/// Expected value of the LSM9DS1 accelerometer/gyroscope `WHO_AM_I` register (0x0F)
pub const LSM9DS1_AG_WHO_AM_I: u8 = 0x68;

/// SPI register page of the BME680
///
/// The BME680 exposes 256 registers through a 7-bit SPI address. Bit 4 of
/// register 0x73 selects which half the address refers to. Page 0 holds
/// 0x80-0xFF (calibration, chip ID, reset) and page 1 holds 0x00-0x7F
/// (control, status and data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Page 0 - registers 0x80 to 0xFF
    Page0 = 0,
    /// Page 1 - registers 0x00 to 0x7F
    Page1 = 1,
}

impl Page {
    /// Page that holds the given 8-bit register address
    #[must_use]
    pub const fn for_address(address: u8) -> Self {
        if address >= 0x80 { Self::Page0 } else { Self::Page1 }
    }
}

/// Features the drivers deliberately do not provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feature {
    /// BME680 gas (heater plate) measurement
    GasSensing,
    /// Conversion of LSM9DS1 raw samples to physical units
    ImuCalibration,
}

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Unexpected chip ID (contains the actual value read)
    InvalidDevice(u8),
    /// Configuration value outside the set the hardware accepts
    InvalidConfig,
    /// Requested a feature this driver does not implement
    Unsupported(Feature),
    /// Operation needs `begin()` to have completed first
    NotInitialized,
    /// Sensor did not report new data within the allowed number of polls
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
