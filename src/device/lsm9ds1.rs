//! LSM9DS1 accelerometer/gyroscope driver
//!
//! Covers the accelerometer/gyroscope die only. Samples are returned raw;
//! converting them to physical units is not provided.

use crate::interface::RegisterAccess;
use crate::registers::lsm9ds1::{
    ACCEL_START, AXES_LEN, GYRO_START, Lsm9ds1Ag as RegisterDevice, STATUS_REG, TEMP_GYRO_LEN,
    TEMP_GYRO_START,
};
use crate::sensors::{AccelData, GyroData, ImuConfig, ImuSample, ResolvedImuConfig};
use crate::{Error, Feature, LSM9DS1_AG_WHO_AM_I};
use device_driver::RegisterInterface;

/// Driver for the accelerometer/gyroscope of one LSM9DS1
pub struct Lsm9ds1Driver<I> {
    device: RegisterDevice<I>,
    config: Option<ResolvedImuConfig>,
}

impl<I> Lsm9ds1Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver instance
    ///
    /// No bus traffic happens until [`begin`](Self::begin).
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            config: None,
        }
    }

    /// Configure data rates and full scales and enable all axes
    ///
    /// Leaves the gyroscope filters and interrupts at their defaults and sets
    /// block data update with address auto-increment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` without touching the bus if a value matches no
    /// table entry or an index lies outside its table, or the bus error if any
    /// transfer fails.
    pub fn begin(&mut self, config: ImuConfig) -> Result<(), Error<I::Error>> {
        let resolved = config.resolve()?;

        self.device.gyro_control().write(|w| {
            w.set_odr_g(resolved.gyro_odr_code());
            w.set_fs_g(resolved.gyro_full_scale_code());
            w.set_bw_g(0);
        })?;
        self.device.gyro_output().write(|_| {})?;
        self.device.gyro_high_pass().write(|_| {})?;
        self.device.accel_axes().write(|w| {
            w.set_xen_xl(true);
            w.set_yen_xl(true);
            w.set_zen_xl(true);
            w.set_dec(0);
        })?;
        self.device.gyro_axes().write(|w| {
            w.set_xen_g(true);
            w.set_yen_g(true);
            w.set_zen_g(true);
        })?;
        self.device.accel_control().write(|w| {
            w.set_odr_xl(resolved.accel_odr_code());
            w.set_fs_xl(resolved.accel_full_scale_code());
            w.set_bw_scal_odr(false);
            w.set_bw_xl(0);
        })?;
        self.device.interface_control().write(|w| {
            w.set_boot(false);
            w.set_bdu(true);
            w.set_h_lactive(false);
            w.set_pp_od(false);
            w.set_sim(false);
            w.set_if_add_inc(true);
            w.set_ble(false);
            w.set_sw_reset(false);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "LSM9DS1 gyro odr={}Hz fs={}dps, accel odr={}Hz fs={}g",
            resolved.gyro_odr_hz(),
            resolved.gyro_full_scale_dps(),
            resolved.accel_odr_hz(),
            resolved.accel_full_scale_g()
        );

        self.config = Some(resolved);
        Ok(())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x68 for the LSM9DS1 accelerometer/gyroscope.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn whoami(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.who_am_i().read()?.who_am_i())
    }

    /// Check that the device answers with the LSM9DS1 accelerometer/gyroscope ID
    ///
    /// # Errors
    ///
    /// Returns `InvalidDevice` with the value read if it is not 0x68.
    pub fn verify(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.whoami()?;
        if id != LSM9DS1_AG_WHO_AM_I {
            return Err(Error::InvalidDevice(id));
        }
        Ok(())
    }

    /// Read temperature, status, gyroscope and accelerometer in two bursts
    ///
    /// # Errors
    ///
    /// Returns `Unsupported(ImuCalibration)` without touching the bus when
    /// `cal` is set, or the bus error.
    pub fn query(&mut self, cal: bool) -> Result<ImuSample, Error<I::Error>> {
        if cal {
            return Err(Error::Unsupported(Feature::ImuCalibration));
        }

        // OUT_TEMP_L/H, STATUS_REG, OUT_X_L_G .. OUT_Z_H_G
        let mut block = [0u8; TEMP_GYRO_LEN];
        self.device.interface.read_bytes(TEMP_GYRO_START, &mut block)?;

        let mut accel = [0u8; AXES_LEN];
        self.device.interface.read_bytes(ACCEL_START, &mut accel)?;

        Ok(ImuSample {
            temperature: i16::from_le_bytes([block[0], block[1]]),
            status: block[2],
            gyro: GyroData::from_le_bytes(&block, 3),
            accel: AccelData::from_le_bytes(&accel, 0),
        })
    }

    /// Read `STATUS_REG` (0x17)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_status(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.interface.read_u8(STATUS_REG)?)
    }

    /// Read the raw temperature
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<i16, Error<I::Error>> {
        Ok(self.device.interface.read_i16_le(TEMP_GYRO_START)?)
    }

    /// Read gyroscope data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<GyroData, Error<I::Error>> {
        let mut buffer = [0u8; AXES_LEN];
        self.device.interface.read_bytes(GYRO_START, &mut buffer)?;
        Ok(GyroData::from_le_bytes(&buffer, 0))
    }

    /// Read accelerometer data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<AccelData, Error<I::Error>> {
        let mut buffer = [0u8; AXES_LEN];
        self.device.interface.read_bytes(ACCEL_START, &mut buffer)?;
        Ok(AccelData::from_le_bytes(&buffer, 0))
    }

    /// Configuration applied by the last successful [`begin`](Self::begin)
    pub const fn config(&self) -> Option<&ResolvedImuConfig> {
        self.config.as_ref()
    }

    /// Release the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}
