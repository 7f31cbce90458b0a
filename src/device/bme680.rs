//! BME680 environmental sensor driver
//!
//! Temperature, pressure and humidity in forced mode. Every measurement is
//! triggered explicitly with [`Bme680Driver::kickoff`] (or by re-arming inside
//! [`Bme680Driver::query`]); the sensor returns to sleep on its own afterwards.

use super::MeasurementState;
use crate::interface::RegisterAccess;
use crate::paging::PagedInterface;
use crate::registers::bme680::{
    Bme680 as RegisterDevice, CALIB_HT_LEN, CALIB_HT_START, CALIB_TP_LEN, CALIB_TP_START,
    DATA_LEN, DATA_START, MODE_FORCED, MODE_SLEEP, SOFT_RESET_COMMAND,
};
use crate::sensors::{Bme680Config, CalibrationCoefficients, Measurement, Oversampling, RawSample};
use crate::{BME680_CHIP_ID, Error, Feature, Page};
use device_driver::RegisterInterface;

/// Time the BME680 needs after a soft reset before it accepts commands
const RESET_SETTLE_MS: u32 = 10;

/// Driver for one BME680
pub struct Bme680Driver<I> {
    device: RegisterDevice<PagedInterface<I>>,
    config: Bme680Config,
    calibration: Option<CalibrationCoefficients>,
    state: MeasurementState,
}

impl<I> Bme680Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver instance
    ///
    /// No bus traffic happens until [`begin`](Self::begin).
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(PagedInterface::new(interface)),
            config: Bme680Config::default(),
            calibration: None,
            state: MeasurementState::Uninitialized,
        }
    }

    /// Reset and configure the sensor, read its calibration and trigger the
    /// first measurement
    ///
    /// Programs humidity, temperature and pressure oversampling, turns the IIR
    /// filter, SPI 3-wire mode and the gas heater off, then caches the 17
    /// calibration coefficients.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported(GasSensing)` without touching the bus if gas
    /// oversampling is not `Skipped`, or the bus error if any transfer fails.
    pub fn begin<D>(&mut self, delay: &mut D, config: Bme680Config) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if config.gas != Oversampling::Skipped {
            return Err(Error::Unsupported(Feature::GasSensing));
        }

        self.state = MeasurementState::Uninitialized;
        self.calibration = None;

        // Page bit state is unknown after power-up or a previous session
        self.device.interface.set_page(Page::Page0, true)?;

        self.device.soft_reset().write(|w| {
            w.set_reset(SOFT_RESET_COMMAND);
        })?;
        delay.delay_ms(RESET_SETTLE_MS);

        self.device.ctrl_hum().write(|w| {
            w.set_osrs_h(config.humidity.code());
        })?;
        self.device.ctrl_meas().write(|w| {
            w.set_osrs_t(config.temperature.code());
            w.set_osrs_p(config.pressure.code());
            w.set_mode(MODE_SLEEP);
        })?;
        self.device.filter_config().write(|w| {
            w.set_filter(0);
            w.set_spi_three_wire(false);
        })?;
        self.device.ctrl_gas().write(|w| {
            w.set_run_gas(false);
            w.set_nb_conv(0);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "BME680 ctrl_hum osrs_h={} ctrl_meas osrs_t={} osrs_p={}",
            config.humidity.code(),
            config.temperature.code(),
            config.pressure.code()
        );

        let calibration = self.read_calibration()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("BME680 calibration: {:?}", calibration);

        self.config = config;
        self.calibration = Some(calibration);
        self.state = MeasurementState::Configured;

        self.kickoff()
    }

    /// Read both calibration blocks and decode the coefficients
    fn read_calibration(&mut self) -> Result<CalibrationCoefficients, Error<I::Error>> {
        let mut tp = [0u8; CALIB_TP_LEN];
        let mut ht = [0u8; CALIB_HT_LEN];
        self.device.interface.read_bytes(CALIB_TP_START, &mut tp)?;
        self.device.interface.read_bytes(CALIB_HT_START, &mut ht)?;
        Ok(CalibrationCoefficients::from_blocks(&tp, &ht))
    }

    /// Read the `chip_id` register
    ///
    /// Should return 0x61 for a BME680.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn whoami(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.chip_id().read()?.chip_id())
    }

    /// Check that the device answers with the BME680 chip ID
    ///
    /// # Errors
    ///
    /// Returns `InvalidDevice` with the value read if it is not 0x61.
    pub fn verify(&mut self) -> Result<(), Error<I::Error>> {
        let id = self.whoami()?;
        if id != BME680_CHIP_ID {
            return Err(Error::InvalidDevice(id));
        }
        Ok(())
    }

    /// Trigger one forced-mode measurement
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before [`begin`](Self::begin), or the bus error.
    pub fn kickoff(&mut self) -> Result<(), Error<I::Error>> {
        if self.calibration.is_none() {
            return Err(Error::NotInitialized);
        }

        let config = self.config;
        self.device.ctrl_meas().write(|w| {
            w.set_osrs_t(config.temperature.code());
            w.set_osrs_p(config.pressure.code());
            w.set_mode(MODE_FORCED);
        })?;

        self.state = MeasurementState::MeasurementPending;
        Ok(())
    }

    /// Wait until the sensor reports new data
    ///
    /// Sleeps `poll_interval_ms`, then checks `new_data`, until it is set.
    /// Returns how many checks came back negative before the positive one.
    /// There is no upper bound; see [`wait_ready_timeout`](Self::wait_ready_timeout).
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before [`begin`](Self::begin), or the bus error.
    pub fn wait_ready<D>(
        &mut self,
        delay: &mut D,
        poll_interval_ms: u32,
    ) -> Result<u32, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.poll_ready(delay, poll_interval_ms, None)
    }

    /// Wait until the sensor reports new data, giving up after `max_retries`
    /// negative checks
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when the retries are exhausted, `NotInitialized`
    /// before [`begin`](Self::begin), or the bus error.
    pub fn wait_ready_timeout<D>(
        &mut self,
        delay: &mut D,
        poll_interval_ms: u32,
        max_retries: u32,
    ) -> Result<u32, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.poll_ready(delay, poll_interval_ms, Some(max_retries))
    }

    fn poll_ready<D>(
        &mut self,
        delay: &mut D,
        poll_interval_ms: u32,
        max_retries: Option<u32>,
    ) -> Result<u32, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if self.calibration.is_none() {
            return Err(Error::NotInitialized);
        }

        let mut retries = 0u32;
        loop {
            delay.delay_ms(poll_interval_ms);
            if self.device.meas_status().read()?.new_data() {
                break;
            }

            if max_retries.is_some_and(|max| retries >= max) {
                #[cfg(feature = "defmt")]
                defmt::warn!("BME680 no new data after {} polls", retries + 1);

                return Err(Error::Timeout);
            }
            retries = retries.saturating_add(1);
        }

        self.state = MeasurementState::MeasurementReady;
        Ok(retries)
    }

    /// Read the latest measurement
    ///
    /// Reads the pressure, temperature and humidity registers in one burst.
    /// With `rekick` the next forced measurement is triggered before
    /// returning. With `apply_calibration` the raw values are compensated.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before [`begin`](Self::begin), or the bus error.
    pub fn query(
        &mut self,
        rekick: bool,
        apply_calibration: bool,
    ) -> Result<Measurement, Error<I::Error>> {
        let calibration = self.calibration.ok_or(Error::NotInitialized)?;

        let mut buf = [0u8; DATA_LEN];
        self.device.interface.read_bytes(DATA_START, &mut buf)?;
        let raw = RawSample::from_bytes(&buf);

        if rekick {
            self.kickoff()?;
        }

        let compensated = apply_calibration.then(|| calibration.compensate(raw));

        Ok(Measurement { raw, compensated })
    }

    /// Calibration coefficients read by [`begin`](Self::begin)
    pub const fn calibration(&self) -> Option<&CalibrationCoefficients> {
        self.calibration.as_ref()
    }

    /// Configuration applied by the last successful [`begin`](Self::begin)
    pub const fn config(&self) -> &Bme680Config {
        &self.config
    }

    /// Measurement cycle state
    pub const fn state(&self) -> MeasurementState {
        self.state
    }

    /// Release the underlying interface
    pub fn release(self) -> I {
        self.device.interface.release()
    }
}
