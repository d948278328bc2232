//! DMA controller abstraction
//!
//! SPI transmit can optionally be offloaded to DMA. The controller has to
//! be initialised and opened before the SPI bus that uses it.

/// DMA controller
pub trait Dma {
    /// Error type for DMA operations
    type Error: core::fmt::Debug;

    /// Initialise the DMA controller
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Open the DMA controller for use by peripherals
    fn open(&mut self) -> Result<(), Self::Error>;
}

/// Placeholder for boards without a DMA controller
///
/// Both operations succeed without doing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDma;

impl Dma for NoDma {
    type Error = core::convert::Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn open(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
