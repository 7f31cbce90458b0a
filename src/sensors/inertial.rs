//! LSM9DS1 accelerometer/gyroscope types and configuration
//!
//! Data rate and full-scale settings are chosen from fixed per-quantity
//! tables. A setting can be given either as the physical value listed in the
//! table or as the table index (which is also the register code).

use crate::{Error, bits};

/// Gyroscope output data rates in Hz, indexed by `ODR_G` code (last code reserved)
pub const GYRO_ODR_HZ: [Option<f32>; 8] = [
    Some(0.0),
    Some(14.9),
    Some(59.5),
    Some(119.0),
    Some(238.0),
    Some(476.0),
    Some(952.0),
    None,
];

/// Gyroscope full-scale ranges in °/s, indexed by `FS_G` code (code 2 reserved)
pub const GYRO_FULL_SCALE_DPS: [Option<f32>; 4] = [Some(245.0), Some(500.0), None, Some(2000.0)];

/// Accelerometer output data rates in Hz, indexed by `ODR_XL` code (last code reserved)
pub const ACCEL_ODR_HZ: [Option<f32>; 8] = [
    Some(0.0),
    Some(10.0),
    Some(50.0),
    Some(119.0),
    Some(238.0),
    Some(476.0),
    Some(952.0),
    None,
];

/// Accelerometer full-scale ranges in g, indexed by `FS_XL` code
pub const ACCEL_FULL_SCALE_G: [Option<f32>; 4] = [Some(2.0), Some(16.0), Some(4.0), Some(8.0)];

/// A table setting given by physical value or by table index
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selection {
    /// Physical value; must equal a table entry exactly
    ByValue(f32),
    /// Table index (register code)
    ByIndex(u8),
}

impl Selection {
    /// Resolve against a table, returning the table index
    ///
    /// Any index inside the table is accepted as a raw register code,
    /// reserved slots included. A value only matches a listed entry.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn resolve(self, table: &[Option<f32>]) -> Option<u8> {
        match self {
            Self::ByIndex(index) => (usize::from(index) < table.len()).then_some(index),
            Self::ByValue(value) => table
                .iter()
                .position(|entry| *entry == Some(value))
                .and_then(|index| u8::try_from(index).ok()),
        }
    }
}

/// Accelerometer/gyroscope configuration as requested by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuConfig {
    /// Gyroscope output data rate ([`GYRO_ODR_HZ`])
    pub gyro_odr: Selection,
    /// Gyroscope full scale ([`GYRO_FULL_SCALE_DPS`])
    pub gyro_full_scale: Selection,
    /// Accelerometer output data rate ([`ACCEL_ODR_HZ`])
    pub accel_odr: Selection,
    /// Accelerometer full scale ([`ACCEL_FULL_SCALE_G`])
    pub accel_full_scale: Selection,
}

impl Default for ImuConfig {
    fn default() -> Self {
        Self {
            gyro_odr: Selection::ByValue(119.0),
            gyro_full_scale: Selection::ByIndex(0),
            accel_odr: Selection::ByIndex(3),
            accel_full_scale: Selection::ByIndex(0),
        }
    }
}

impl ImuConfig {
    /// Resolve all four selections to register codes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a value matches no table entry or an index
    /// lies outside its table.
    pub fn resolve<E>(&self) -> Result<ResolvedImuConfig, Error<E>> {
        let resolve = |selection: Selection, table: &[Option<f32>]| {
            selection.resolve(table).ok_or(Error::InvalidConfig)
        };

        Ok(ResolvedImuConfig {
            gyro_odr: resolve(self.gyro_odr, &GYRO_ODR_HZ)?,
            gyro_full_scale: resolve(self.gyro_full_scale, &GYRO_FULL_SCALE_DPS)?,
            accel_odr: resolve(self.accel_odr, &ACCEL_ODR_HZ)?,
            accel_full_scale: resolve(self.accel_full_scale, &ACCEL_FULL_SCALE_G)?,
        })
    }
}

/// Accelerometer/gyroscope configuration resolved to register codes
///
/// Only obtainable from [`ImuConfig::resolve`], so every code is inside its
/// table. A code given by index may still name a reserved slot, whose
/// physical value is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResolvedImuConfig {
    gyro_odr: u8,
    gyro_full_scale: u8,
    accel_odr: u8,
    accel_full_scale: u8,
}

fn table_value(table: &[Option<f32>], index: u8) -> Option<f32> {
    table.get(usize::from(index)).copied().flatten()
}

impl ResolvedImuConfig {
    /// Gyroscope `ODR_G` code
    #[must_use]
    pub const fn gyro_odr_code(&self) -> u8 {
        self.gyro_odr
    }

    /// Gyroscope `FS_G` code
    #[must_use]
    pub const fn gyro_full_scale_code(&self) -> u8 {
        self.gyro_full_scale
    }

    /// Accelerometer `ODR_XL` code
    #[must_use]
    pub const fn accel_odr_code(&self) -> u8 {
        self.accel_odr
    }

    /// Accelerometer `FS_XL` code
    #[must_use]
    pub const fn accel_full_scale_code(&self) -> u8 {
        self.accel_full_scale
    }

    /// Gyroscope output data rate in Hz, `None` for a reserved code
    #[must_use]
    pub fn gyro_odr_hz(&self) -> Option<f32> {
        table_value(&GYRO_ODR_HZ, self.gyro_odr)
    }

    /// Gyroscope full scale in °/s
    #[must_use]
    pub fn gyro_full_scale_dps(&self) -> Option<f32> {
        table_value(&GYRO_FULL_SCALE_DPS, self.gyro_full_scale)
    }

    /// Accelerometer output data rate in Hz
    #[must_use]
    pub fn accel_odr_hz(&self) -> Option<f32> {
        table_value(&ACCEL_ODR_HZ, self.accel_odr)
    }

    /// Accelerometer full scale in g
    #[must_use]
    pub fn accel_full_scale_g(&self) -> Option<f32> {
        table_value(&ACCEL_FULL_SCALE_G, self.accel_full_scale)
    }
}

/// Accelerometer data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode X/Y/Z stored low byte first, starting at `offset`
    #[must_use]
    pub fn from_le_bytes(buf: &[u8], offset: usize) -> Self {
        Self {
            x: bits::i16_le(buf, offset),
            y: bits::i16_le(buf, offset + 2),
            z: bits::i16_le(buf, offset + 4),
        }
    }
}

/// Gyroscope data (raw 16-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroData {
    /// X-axis rotation (raw)
    pub x: i16,
    /// Y-axis rotation (raw)
    pub y: i16,
    /// Z-axis rotation (raw)
    pub z: i16,
}

impl GyroData {
    /// Decode X/Y/Z stored low byte first, starting at `offset`
    #[must_use]
    pub fn from_le_bytes(buf: &[u8], offset: usize) -> Self {
        Self {
            x: bits::i16_le(buf, offset),
            y: bits::i16_le(buf, offset + 2),
            z: bits::i16_le(buf, offset + 4),
        }
    }
}

/// One raw accelerometer/gyroscope reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    /// `STATUS_REG` (0x17) at the time of the read
    pub status: u8,
    /// Onboard temperature (raw)
    pub temperature: i16,
    /// Angular rate (raw)
    pub gyro: GyroData,
    /// Acceleration (raw)
    pub accel: AccelData,
}
