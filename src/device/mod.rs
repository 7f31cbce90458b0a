//! High-level drivers for the BME680 and the LSM9DS1 accelerometer/gyroscope
//!
//! Both drivers sit on top of a `device-driver` [`RegisterInterface`]
//! (normally [`crate::SpiInterface`]) and own it for their whole lifetime.
//!
//! [`RegisterInterface`]: device_driver::RegisterInterface

pub mod bme680;
pub mod lsm9ds1;

pub use bme680::Bme680Driver;
pub use lsm9ds1::Lsm9ds1Driver;

/// Measurement cycle state of the BME680 driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementState {
    /// `begin()` has not completed
    #[default]
    Uninitialized,
    /// Control registers programmed and calibration cached, nothing triggered
    Configured,
    /// A forced measurement has been triggered
    MeasurementPending,
    /// The sensor reported new data
    MeasurementReady,
}
