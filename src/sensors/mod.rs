//! Sensor data types, configuration and conversion math
//!
//! - [`environmental`]: BME680 oversampling, calibration coefficients and the
//!   temperature/pressure/humidity compensation formulas
//! - [`inertial`]: LSM9DS1 data-rate/full-scale tables and raw sample types
//!
//! Bus operations are performed through the drivers in [`crate::device`].

pub mod environmental;
pub mod inertial;

// Re-export main types
pub use environmental::{
    Bme680Config, CalibrationCoefficients, CompensatedSample, Measurement, Oversampling,
    RawSample,
};
pub use inertial::{
    AccelData, GyroData, ImuConfig, ImuSample, ResolvedImuConfig, Selection,
};
