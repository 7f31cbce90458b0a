//! Paged register access for the BME680 SPI interface
//!
//! Over SPI the BME680 only sees 7 address bits. Register 0x73 bit 4
//! (`spi_mem_page`) chooses which half of the 8-bit register map those bits
//! refer to. [`PagedInterface`] wraps a [`RegisterInterface`] and takes care of
//! that bit, so drivers address registers by their full 8-bit address.

use crate::Page;
use device_driver::RegisterInterface;

/// Register holding the `spi_mem_page` bit (present at the same slot on both pages)
pub const PAGE_SELECT_REGISTER: u8 = 0x73;

/// Position of the page bit inside [`PAGE_SELECT_REGISTER`]
const PAGE_BIT_SHIFT: u8 = 4;

/// Register interface decorator that tracks the BME680 register page
///
/// Before each access the target page is derived from the address. A
/// page-select write is sent only when the page differs from the one last
/// selected; the very first access always selects a page.
pub struct PagedInterface<I> {
    inner: I,
    current_page: Option<Page>,
}

impl<I> PagedInterface<I> {
    /// Wrap an interface; the current page is unknown until the first access
    pub const fn new(inner: I) -> Self {
        Self {
            inner,
            current_page: None,
        }
    }

    /// Page selected by the last page-select write, if any
    pub const fn current_page(&self) -> Option<Page> {
        self.current_page
    }

    /// Forget the tracked page, e.g. after the device was power-cycled
    pub fn invalidate(&mut self) {
        self.current_page = None;
    }

    /// Get a mutable reference to the wrapped interface
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }

    /// Consume the decorator and return the wrapped interface
    pub fn release(self) -> I {
        self.inner
    }
}

impl<I> PagedInterface<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Select a register page
    ///
    /// Writes the page-select register only if `page` differs from the
    /// tracked page, or unconditionally when `force` is set.
    ///
    /// # Errors
    ///
    /// Returns the interface error if the page-select write fails. The
    /// tracked page is left unchanged in that case.
    pub fn set_page(&mut self, page: Page, force: bool) -> Result<(), I::Error> {
        if force || self.current_page != Some(page) {
            #[cfg(feature = "defmt")]
            defmt::trace!("register page {:?} -> {:?}", self.current_page, page);

            self.inner
                .write_register(PAGE_SELECT_REGISTER, 8, &[(page as u8) << PAGE_BIT_SHIFT])?;
            self.current_page = Some(page);
        }
        Ok(())
    }
}

impl<I> RegisterInterface for PagedInterface<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    type Error = I::Error;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.set_page(Page::for_address(address), false)?;
        self.inner.read_register(address, size_bits, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        self.set_page(Page::for_address(address), false)?;
        self.inner.write_register(address, size_bits, write_data)
    }
}
