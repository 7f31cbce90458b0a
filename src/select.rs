//! Chip-select address decoder
//!
//! Boards with more SPI sensors than chip-select lines route three GPIOs into
//! a 3-to-8 line decoder (74x138 style). Each address drives exactly one
//! decoder output low, which selects the sensor wired to it.
//!
//! The decoder is driven by the bus owner before handing the bus to a driver:
//!
//! ```ignore
//! let mut select = ChipSelect::new(a0, a1, a2);
//! select.init()?;
//! select.set_address(BME680_ADDRESS)?;
//! let measurement = bme680.query(true, true)?;
//! ```

use crate::Error;
use embedded_hal::digital::{OutputPin, PinState};

/// Highest address a 3-line decoder accepts
pub const MAX_ADDRESS: u8 = 7;

/// Three address lines of a chip-select decoder
pub struct ChipSelect<A0, A1, A2> {
    a0: A0,
    a1: A1,
    a2: A2,
    address: Option<u8>,
}

impl<A0, A1, A2, E> ChipSelect<A0, A1, A2>
where
    A0: OutputPin<Error = E>,
    A1: OutputPin<Error = E>,
    A2: OutputPin<Error = E>,
{
    /// Take ownership of the address lines (least significant first)
    ///
    /// The lines are not driven until [`init`](Self::init).
    pub const fn new(a0: A0, a1: A1, a2: A2) -> Self {
        Self {
            a0,
            a1,
            a2,
            address: None,
        }
    }

    /// Drive all address lines high (address 7)
    ///
    /// # Errors
    ///
    /// Returns the pin error if a line cannot be driven.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.set_address(MAX_ADDRESS)
    }

    /// Drive the address lines to `address`
    ///
    /// Line *n* is high exactly when bit *n* of `address` is set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for addresses above 7 without driving any line,
    /// or the pin error. After a pin error the lines may be partially updated
    /// and [`address`](Self::address) reports `None`.
    pub fn set_address(&mut self, address: u8) -> Result<(), Error<E>> {
        if address > MAX_ADDRESS {
            return Err(Error::InvalidConfig);
        }

        let line = |bit: u8| PinState::from(address & (1 << bit) != 0);

        self.address = None;
        self.a0.set_state(line(0))?;
        self.a1.set_state(line(1))?;
        self.a2.set_state(line(2))?;
        self.address = Some(address);

        #[cfg(feature = "defmt")]
        defmt::trace!("chip-select address {}", address);

        Ok(())
    }

    /// Address last driven onto the lines, `None` before [`init`](Self::init)
    pub const fn address(&self) -> Option<u8> {
        self.address
    }

    /// Release the address lines
    pub fn release(self) -> (A0, A1, A2) {
        (self.a0, self.a1, self.a2)
    }
}
