//! Bus interface implementations
//!
//! This module provides the SPI implementation of the `device-driver`
//! [`RegisterInterface`] trait, using the register protocol shared by most
//! SPI sensors:
//!
//! - one transaction per chip-select assertion
//! - the first byte carries the read flag (bit 7) and a 7-bit register address
//! - the following bytes are register data, auto-incremented by the sensor
//!
//! It also provides [`RegisterAccess`], typed register helpers available on
//! every register interface.

use crate::bits;
use device_driver::RegisterInterface;
use embedded_hal::spi::{Operation, SpiDevice};

/// SPI interface for sensors speaking the read-flag-in-bit-7 protocol
///
/// Every register access is one SPI transaction: the address byte goes out
/// first, with bit 7 set for reads and cleared for writes, followed by the
/// data bytes in the same transaction. Burst reads and writes rely on the
/// sensor auto-incrementing the address.
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) pin automatically. If several sensors share one bus,
/// give each its own `SpiDevice`, for example with `embedded-hal-bus`:
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> RegisterInterface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        // For SPI reads, set MSB to 1
        let read_address = address | 0x80;

        let mut operations = [
            Operation::Write(&[read_address]),
            Operation::Read(read_data),
        ];

        self.spi.transaction(&mut operations)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        // For SPI writes, MSB must be 0
        let write_address = address & 0x7F;

        let mut operations = [
            Operation::Write(&[write_address]),
            Operation::Write(write_data),
        ];

        self.spi.transaction(&mut operations)
    }
}

/// Typed register reads and writes on top of any 8-bit-addressed interface
///
/// Multi-byte reads rely on the sensor auto-incrementing the register address.
pub trait RegisterAccess: RegisterInterface<AddressType = u8> {
    /// Read `buf.len()` consecutive registers starting at `address`
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn read_bytes(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let size_bits = u32::try_from(buf.len() * 8).unwrap_or(u32::MAX);
        self.read_register(address, size_bits, buf)
    }

    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn read_u8(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_bytes(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Read an unsigned 16-bit value stored low byte first
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn read_u16_le(&mut self, address: u8) -> Result<u16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_bytes(address, &mut buf)?;
        Ok(bits::u16_le(&buf, 0))
    }

    /// Read a signed 16-bit value stored low byte first
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn read_i16_le(&mut self, address: u8) -> Result<i16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_bytes(address, &mut buf)?;
        Ok(bits::i16_le(&buf, 0))
    }

    /// Read a signed 8-bit calibration value (see [`bits::i8`])
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn read_i8(&mut self, address: u8) -> Result<i16, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_bytes(address, &mut buf)?;
        Ok(bits::i8(&buf, 0))
    }

    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn write_u8(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.write_bytes(address, &[value])
    }

    /// Write consecutive registers starting at `address`
    ///
    /// # Errors
    ///
    /// Returns the interface error if the transfer fails.
    fn write_bytes(&mut self, address: u8, values: &[u8]) -> Result<(), Self::Error> {
        let size_bits = u32::try_from(values.len() * 8).unwrap_or(u32::MAX);
        self.write_register(address, size_bits, values)
    }
}

impl<T> RegisterAccess for T where T: RegisterInterface<AddressType = u8> {}
