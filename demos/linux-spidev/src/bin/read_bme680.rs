//! Poll a BME680 on SPI0 CE0 and log every measurement

use linux_embedded_hal::Delay;
use spi_sensors::{Bme680Config, Bme680Driver, SpiInterface};
use spi_sensors_linux_demos::{DemoError, init_logging, open_spi};
use tracing::{info, warn};

/// Delay between readiness checks
const POLL_INTERVAL_MS: u32 = 10;

fn main() -> Result<(), DemoError> {
    init_logging();

    let mut delay = Delay;
    let mut bme = Bme680Driver::new(SpiInterface::new(open_spi()?));

    let chip_id = bme.whoami()?;
    info!("BME680 chip ID 0x{chip_id:02x} (expected 0x61)");
    if let Err(e) = bme.verify() {
        warn!("unexpected chip ID, continuing anyway: {e:?}");
    }

    bme.begin(&mut delay, Bme680Config::default())?;

    loop {
        let polls = bme.wait_ready(&mut delay, POLL_INTERVAL_MS)?;
        let measurement = bme.query(true, true)?;
        let raw = measurement.raw;

        match measurement.compensated {
            Some(c) => info!(
                polls,
                "P: raw {:6}, {:.1} Pa, d {:.4e} Pa  T: raw {:6}, {:.4} degC, d {:.4e} degC  h: raw {:6}, {:.3} %, d {:.4e} %",
                raw.pressure,
                c.pressure,
                c.d_pressure,
                raw.temperature,
                c.temperature,
                c.d_temperature,
                raw.humidity,
                c.humidity,
                c.d_humidity
            ),
            None => info!(
                polls,
                "P: raw {:6}  T: raw {:6}  h: raw {:6}",
                raw.pressure,
                raw.temperature,
                raw.humidity
            ),
        }
    }
}
