//! BME680 pressure, temperature and humidity types
//!
//! The compensation formulas are the floating-point versions published by
//! Bosch for the BME680/BME688 (`calc_temperature`, `calc_pressure`,
//! `calc_humidity`). They are evaluated in `f64` with the reference order of
//! operations, so results are reproducible bit for bit.

use crate::registers::bme680::{CALIB_HT_LEN, CALIB_TP_LEN, DATA_LEN};
use crate::{Error, bits};

/// Oversampling setting of one measurement channel
///
/// The register code `n` selects `2^(n-1)` samples per measurement; code 0
/// skips the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Channel disabled, output holds 0x8000
    Skipped = 0,
    /// 1 sample
    X1 = 1,
    /// 2 samples
    X2 = 2,
    /// 4 samples
    X4 = 3,
    /// 8 samples
    X8 = 4,
    /// 16 samples
    #[default]
    X16 = 5,
}

impl Oversampling {
    /// Number of samples averaged per measurement (0 when skipped)
    #[must_use]
    pub const fn factor(self) -> u8 {
        match self {
            Self::Skipped => 0,
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }

    /// Register code for this setting
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Setting for a register code, `None` for codes above 5
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Skipped),
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            3 => Some(Self::X4),
            4 => Some(Self::X8),
            5 => Some(Self::X16),
            _ => None,
        }
    }
}

/// BME680 measurement configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bme680Config {
    /// Temperature oversampling
    pub temperature: Oversampling,
    /// Pressure oversampling
    pub pressure: Oversampling,
    /// Humidity oversampling
    pub humidity: Oversampling,
    /// Gas measurement; only `Skipped` is supported
    pub gas: Oversampling,
}

impl Default for Bme680Config {
    fn default() -> Self {
        Self {
            temperature: Oversampling::X16,
            pressure: Oversampling::X16,
            humidity: Oversampling::X16,
            gas: Oversampling::Skipped,
        }
    }
}

impl Bme680Config {
    /// Build a configuration from raw register codes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any code is above 5.
    pub fn from_codes<E>(
        temperature: u8,
        pressure: u8,
        humidity: u8,
        gas: u8,
    ) -> Result<Self, Error<E>> {
        let resolve = |code| Oversampling::from_code(code).ok_or(Error::InvalidConfig);
        Ok(Self {
            temperature: resolve(temperature)?,
            pressure: resolve(pressure)?,
            humidity: resolve(humidity)?,
            gas: resolve(gas)?,
        })
    }
}

/// Factory calibration coefficients of one BME680
///
/// Signed 8-bit coefficients are stored as `i16`, see [`bits::i8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub struct CalibrationCoefficients {
    pub par_t1: u16,
    pub par_t2: i16,
    pub par_t3: i16,
    pub par_p1: u16,
    pub par_p2: i16,
    pub par_p3: i16,
    pub par_p4: i16,
    pub par_p5: i16,
    pub par_p6: i16,
    pub par_p7: i16,
    pub par_p8: i16,
    pub par_p9: i16,
    pub par_p10: u8,
    pub par_h1: u16,
    pub par_h2: u16,
    pub par_h3: i16,
    pub par_h4: i16,
    pub par_h5: i16,
    pub par_h6: u8,
    pub par_h7: i16,
}

impl CalibrationCoefficients {
    /// Decode coefficients from the two calibration memory blocks
    ///
    /// `tp` holds registers 0x8A-0xA0 and `ht` holds registers 0xE1-0xEA.
    #[must_use]
    pub fn from_blocks(tp: &[u8; CALIB_TP_LEN], ht: &[u8; CALIB_HT_LEN]) -> Self {
        // 0xE1-0xE3 pack the two 12-bit humidity coefficients, sharing 0xE2
        let par_h1 = u16::from(ht[1] & 0x0F) | (u16::from(ht[2]) << 4);
        let par_h2 = (u16::from(ht[1] & 0xF0) >> 4) | (u16::from(ht[0]) << 4);

        Self {
            par_t1: bits::u16_le(ht, 8),
            par_t2: bits::i16_le(tp, 0),
            par_t3: bits::i8(tp, 2),
            par_p1: bits::u16_le(tp, 4),
            par_p2: bits::i16_le(tp, 6),
            par_p3: bits::i8(tp, 8),
            par_p4: bits::i16_le(tp, 10),
            par_p5: bits::i16_le(tp, 12),
            par_p6: bits::i8(tp, 15),
            par_p7: bits::i8(tp, 14),
            par_p8: bits::i16_le(tp, 18),
            par_p9: bits::i16_le(tp, 20),
            par_p10: tp[22],
            par_h1,
            par_h2,
            par_h3: bits::i8(ht, 3),
            par_h4: bits::i8(ht, 4),
            par_h5: bits::i8(ht, 5),
            par_h6: ht[6],
            par_h7: bits::i8(ht, 7),
        }
    }

    /// Compensated temperature in °C, and `t_fine` for the other channels
    #[must_use]
    pub fn compensate_temperature(&self, raw: u32) -> (f64, f64) {
        let raw = f64::from(raw);
        let t1 = f64::from(self.par_t1);

        let var1 = ((raw / 16384.0) - (t1 / 1024.0)) * f64::from(self.par_t2);
        let var2 = (((raw / 131_072.0) - (t1 / 8192.0)) * ((raw / 131_072.0) - (t1 / 8192.0)))
            * (f64::from(self.par_t3) * 16.0);

        let t_fine = var1 + var2;
        (t_fine / 5120.0, t_fine)
    }

    /// Compensated pressure in Pa
    ///
    /// Returns 0.0 when the divisor of the main term truncates to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn compensate_pressure(&self, raw: u32, t_fine: f64) -> f64 {
        let mut var1 = (t_fine / 2.0) - 64000.0;
        let mut var2 = var1 * var1 * (f64::from(self.par_p6) / 131_072.0);
        var2 += var1 * f64::from(self.par_p5) * 2.0;
        var2 = (var2 / 4.0) + (f64::from(self.par_p4) * 65536.0);
        var1 = (((f64::from(self.par_p3) * var1 * var1) / 16384.0) + (f64::from(self.par_p2) * var1))
            / 524_288.0;
        var1 = (1.0 + (var1 / 32768.0)) * f64::from(self.par_p1);

        if var1 as i64 == 0 {
            return 0.0;
        }

        let mut pressure = 1_048_576.0 - f64::from(raw);
        pressure = ((pressure - (var2 / 4096.0)) * 6250.0) / var1;
        var1 = (f64::from(self.par_p9) * pressure * pressure) / 2_147_483_648.0;
        var2 = pressure * (f64::from(self.par_p8) / 32768.0);
        let var3 = (pressure / 256.0)
            * (pressure / 256.0)
            * (pressure / 256.0)
            * (f64::from(self.par_p10) / 131_072.0);

        pressure + (var1 + var2 + var3 + (f64::from(self.par_p7) * 128.0)) / 16.0
    }

    /// Compensated relative humidity in %, clamped to 0..=100
    #[must_use]
    pub fn compensate_humidity(&self, raw: u32, temperature: f64) -> f64 {
        let t = temperature;
        let var1 = f64::from(raw)
            - ((f64::from(self.par_h1) * 16.0) + ((f64::from(self.par_h3) / 2.0) * t));
        let var2 = var1
            * ((f64::from(self.par_h2) / 262_144.0)
                * (1.0
                    + ((f64::from(self.par_h4) / 16384.0) * t)
                    + ((f64::from(self.par_h5) / 1_048_576.0) * t * t)));
        let var3 = f64::from(self.par_h6) / 16384.0;
        let var4 = f64::from(self.par_h7) / 2_097_152.0;

        let humidity = var2 + ((var3 + (var4 * t)) * var2 * var2);
        humidity.clamp(0.0, 100.0)
    }

    /// Compensate all three channels of a raw sample
    ///
    /// Each channel is also evaluated at raw + 1; the difference is the size of
    /// one raw count at this operating point.
    #[must_use]
    pub fn compensate(&self, raw: RawSample) -> CompensatedSample {
        let (temperature, t_fine) = self.compensate_temperature(raw.temperature);
        let d_temperature = self.compensate_temperature(raw.temperature + 1).0 - temperature;

        let pressure = self.compensate_pressure(raw.pressure, t_fine);
        let d_pressure = self.compensate_pressure(raw.pressure + 1, t_fine) - pressure;

        let humidity_raw = u32::from(raw.humidity);
        let humidity = self.compensate_humidity(humidity_raw, temperature);
        let d_humidity = self.compensate_humidity(humidity_raw + 1, temperature) - humidity;

        CompensatedSample {
            temperature,
            d_temperature,
            t_fine,
            pressure,
            d_pressure,
            humidity,
            d_humidity,
        }
    }
}

/// Uncompensated ADC output of one measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// 20-bit pressure
    pub pressure: u32,
    /// 20-bit temperature
    pub temperature: u32,
    /// 16-bit humidity
    pub humidity: u16,
}

impl RawSample {
    /// Unpack the data block starting at `press_msb` (0x1F)
    #[must_use]
    pub fn from_bytes(buf: &[u8; DATA_LEN]) -> Self {
        let unpack20 = |msb: u8, lsb: u8, xlsb: u8| {
            (u32::from(msb) << 12) | (u32::from(lsb) << 4) | (u32::from(xlsb) >> 4)
        };

        Self {
            pressure: unpack20(buf[0], buf[1], buf[2]),
            temperature: unpack20(buf[3], buf[4], buf[5]),
            humidity: bits::u16_be(buf, 6),
        }
    }
}

/// Compensated measurement in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedSample {
    /// Temperature in °C
    pub temperature: f64,
    /// Temperature change for one raw count, °C
    pub d_temperature: f64,
    /// Fine temperature shared with the pressure and humidity formulas
    pub t_fine: f64,
    /// Pressure in Pa
    pub pressure: f64,
    /// Pressure change for one raw count, Pa
    pub d_pressure: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Humidity change for one raw count, %
    pub d_humidity: f64,
}

/// Result of one BME680 query
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Raw ADC values
    pub raw: RawSample,
    /// Physical values, `None` when calibration was not applied
    pub compensated: Option<CompensatedSample>,
}

impl Measurement {
    /// Size of one raw count as `(pressure, temperature, humidity)`
    ///
    /// Without compensation every channel reports 1.0 (one count per count).
    #[must_use]
    pub fn sensitivity(&self) -> (f64, f64, f64) {
        self.compensated.map_or((1.0, 1.0, 1.0), |c| {
            (c.d_pressure, c.d_temperature, c.d_humidity)
        })
    }
}
