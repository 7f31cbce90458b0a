//! Stream raw LSM9DS1 accelerometer/gyroscope samples from SPI0 CE0

use spi_sensors::{ImuConfig, Lsm9ds1Driver, SpiInterface};
use spi_sensors_linux_demos::{DemoError, init_logging, open_spi};
use tracing::info;

fn main() -> Result<(), DemoError> {
    init_logging();

    let mut imu = Lsm9ds1Driver::new(SpiInterface::new(open_spi()?));
    info!("LSM9DS1 A/G chip ID 0x{:02x} (expected 0x68)", imu.whoami()?);
    imu.begin(ImuConfig::default())?;

    loop {
        let sample = imu.query(false)?;
        info!(
            "status: 0b{:08b} T: 0x{:04x} gx: 0x{:04x} gy: 0x{:04x} gz: 0x{:04x} ax: 0x{:04x} ay: 0x{:04x} az: 0x{:04x}",
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
