//! Shared setup for the Raspberry Pi demo programs
//!
//! Both sensors hang off SPI0 CE0. On the combined board CE0 is routed
//! through a 74x138 decoder whose address lines are GPIO 17, 27 and 22.

use linux_embedded_hal::gpio_cdev::{self, Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, SpidevDevice};
use spi_sensors::ChipSelect;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// SPI device node (bus 0, chip select 0)
pub const SPI_DEVICE: &str = "/dev/spidev0.0";

/// SPI clock; one of the rates the Pi SPI divider can produce exactly
pub const SPI_SPEED_HZ: u32 = 3_900_000;

/// GPIO character device
pub const GPIO_CHIP: &str = "/dev/gpiochip0";

/// Decoder address lines A0, A1, A2 (BCM numbering)
pub const DECODER_LINES: [u32; 3] = [22, 27, 17];

/// Decoder address of the BME680
pub const BME680_ADDRESS: u8 = 2;

/// Decoder address of the LSM9DS1 accelerometer/gyroscope
pub const LSM9DS1_AG_ADDRESS: u8 = 0;

/// Chip-select decoder on Linux GPIO lines
pub type Decoder = ChipSelect<CdevPin, CdevPin, CdevPin>;

/// Demo errors
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPIO error: {0}")]
    Gpio(#[from] gpio_cdev::errors::Error),

    #[error("SPI error: {0}")]
    Spi(String),

    #[error("Sensor error: {0}")]
    Sensor(String),
}

impl<E: core::fmt::Debug> From<spi_sensors::Error<E>> for DemoError {
    fn from(error: spi_sensors::Error<E>) -> Self {
        Self::Sensor(format!("{error:?}"))
    }
}

/// Install the `tracing` subscriber (`RUST_LOG` overrides the default level)
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}

/// Open and configure the SPI device (mode 0, 8-bit words)
pub fn open_spi() -> Result<SpidevDevice, DemoError> {
    let mut spi =
        SpidevDevice::open(SPI_DEVICE).map_err(|e| DemoError::Spi(format!("{SPI_DEVICE}: {e:?}")))?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(SPI_SPEED_HZ)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build();
    spi.0.configure(&options)?;
    Ok(spi)
}

/// Request the decoder address lines and drive them all high
pub fn open_decoder() -> Result<Decoder, DemoError> {
    let mut chip = Chip::new(GPIO_CHIP)?;
    let mut line = |offset: u32| -> Result<CdevPin, DemoError> {
        let handle = chip
            .get_line(offset)?
            .request(LineRequestFlags::OUTPUT, 1, "spi-sensors")?;
        Ok(CdevPin::new(handle)?)
    };

    let mut decoder = ChipSelect::new(
        line(DECODER_LINES[0])?,
        line(DECODER_LINES[1])?,
        line(DECODER_LINES[2])?,
    );
    decoder.init()?;
    Ok(decoder)
}
