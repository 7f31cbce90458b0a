//! Read the BME680 and the LSM9DS1 accelerometer/gyroscope behind the
//! chip-select decoder, alternating between them

use linux_embedded_hal::Delay;
use spi_sensors::{Bme680Config, Bme680Driver, ImuConfig, Lsm9ds1Driver, SpiInterface};
use spi_sensors_linux_demos::{
    BME680_ADDRESS, DemoError, LSM9DS1_AG_ADDRESS, init_logging, open_decoder, open_spi,
};
use tracing::info;

/// Delay between BME680 readiness checks
const POLL_INTERVAL_MS: u32 = 10;

fn main() -> Result<(), DemoError> {
    init_logging();

    let mut delay = Delay;
    let mut decoder = open_decoder()?;

    // Both drivers talk through the same CE0; the decoder decides who listens
    decoder.set_address(BME680_ADDRESS)?;
    let mut bme = Bme680Driver::new(SpiInterface::new(open_spi()?));
    info!("BME680 chip ID 0x{:02x} (expected 0x61)", bme.whoami()?);
    bme.begin(&mut delay, Bme680Config::default())?;

    decoder.set_address(LSM9DS1_AG_ADDRESS)?;
    let mut imu = Lsm9ds1Driver::new(SpiInterface::new(open_spi()?));
    info!("LSM9DS1 A/G chip ID 0x{:02x} (expected 0x68)", imu.whoami()?);
    imu.begin(ImuConfig::default())?;

    loop {
        decoder.set_address(BME680_ADDRESS)?;
        let polls = bme.wait_ready(&mut delay, POLL_INTERVAL_MS)?;
        let measurement = bme.query(true, true)?;
        if let Some(c) = measurement.compensated {
            info!(
                polls,
                "P: {:.1} Pa (d {:.4e})  T: {:.4} degC (d {:.4e})  h: {:.3} % (d {:.4e})",
                c.pressure,
                c.d_pressure,
                c.temperature,
                c.d_temperature,
                c.humidity,
                c.d_humidity
            );
        }

        decoder.set_address(LSM9DS1_AG_ADDRESS)?;
        let sample = imu.query(false)?;
        info!(
            "status: 0b{:08b} T: {:6} gx: {:6} gy: {:6} gz: {:6} ax: {:6} ay: {:6} az: {:6}",
            sample.status,
            sample.temperature,
            sample.gyro.x,
            sample.gyro.y,
            sample.gyro.z,
            sample.accel.x,
            sample.accel.y,
            sample.accel.z
        );
    }
}
