//! `embedded-hal` adapters
//!
//! Lets the transfer driver run on any HAL that implements the
//! `embedded-hal` 1.0 blocking SPI bus. Such a bus is already configured
//! when it is handed over, so it serves exactly one [`SpiBusId`] and
//! bus initialisation does nothing.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi;

use ledwire_hal::{SpiAttributes, SpiBus, SpiBusId, SpiExtraAttributes, Timeout};

/// Errors from [`EhSpiBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EhSpiError<E> {
    /// Write addressed to a bus this adapter does not own
    WrongBus(SpiBusId),
    /// Underlying SPI error
    Spi(E),
}

/// Single-bus [`SpiBus`] on top of an `embedded-hal` SPI bus
pub struct EhSpiBus<S> {
    spi: S,
    bus: SpiBusId,
}

impl<S: spi::SpiBus<u8>> EhSpiBus<S> {
    /// Wrap `spi` as bus number `bus`
    pub fn new(spi: S, bus: SpiBusId) -> Self {
        Self { spi, bus }
    }

    /// Bus number this adapter answers to
    pub fn bus(&self) -> SpiBusId {
        self.bus
    }

    /// Give the wrapped bus back
    pub fn release(self) -> S {
        self.spi
    }

    fn check(&self, bus: SpiBusId) -> Result<(), EhSpiError<S::Error>> {
        if bus == self.bus {
            Ok(())
        } else {
            Err(EhSpiError::WrongBus(bus))
        }
    }
}

impl<S: spi::SpiBus<u8>> SpiBus for EhSpiBus<S> {
    type Error = EhSpiError<S::Error>;

    fn init(
        &mut self,
        bus: SpiBusId,
        _attributes: &SpiAttributes,
        _extra: &SpiExtraAttributes,
    ) -> Result<(), Self::Error> {
        // Clock and mode were fixed when the HAL bus was built
        self.check(bus)
    }

    fn write(&mut self, bus: SpiBusId, data: &[u8], _timeout: Timeout) -> Result<(), Self::Error> {
        self.check(bus)?;
        self.spi.write(data).map_err(EhSpiError::Spi)?;
        self.spi.flush().map_err(EhSpiError::Spi)
    }
}

/// Delay that returns immediately
///
/// For drivers configured without retry backoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::vec::Vec;
    use embedded_hal::spi::{ErrorKind, ErrorType};
    use ledwire_core::config::SpiSettings;

    use crate::transfer::bus::master_attributes;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockSpiError;

    impl spi::Error for MockSpiError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Default)]
    struct MockHalSpi {
        written: Vec<u8>,
        flushes: usize,
        fail: bool,
    }

    impl ErrorType for MockHalSpi {
        type Error = MockSpiError;
    }

    impl spi::SpiBus<u8> for MockHalSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), MockSpiError> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), MockSpiError> {
            if self.fail {
                return Err(MockSpiError);
            }
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), MockSpiError> {
            read.fill(0);
            self.write(write)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), MockSpiError> {
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), MockSpiError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_write_then_flush() {
        let mut bus = EhSpiBus::new(MockHalSpi::default(), SpiBusId(1));

        bus.write(SpiBusId(1), &[0x88, 0xCC], Timeout::Forever)
            .unwrap();
        bus.write(SpiBusId(1), &[0xC8], Timeout::Millis(5)).unwrap();

        let spi = bus.release();
        assert_eq!(spi.written, [0x88, 0xCC, 0xC8]);
        assert_eq!(spi.flushes, 2);
    }

    #[test]
    fn test_wrong_bus_rejected() {
        let mut bus = EhSpiBus::new(MockHalSpi::default(), SpiBusId(0));
        let attrs = master_attributes(&SpiSettings::default());

        assert_eq!(
            bus.init(SpiBusId(2), &attrs, &SpiExtraAttributes::default()),
            Err(EhSpiError::WrongBus(SpiBusId(2)))
        );
        assert_eq!(
            bus.write(SpiBusId(2), &[0x00], Timeout::Forever),
            Err(EhSpiError::WrongBus(SpiBusId(2)))
        );
        assert!(bus.release().written.is_empty());
    }

    #[test]
    fn test_init_is_noop() {
        let mut bus = EhSpiBus::new(MockHalSpi::default(), SpiBusId(0));
        let attrs = master_attributes(&SpiSettings::default());

        assert_eq!(
            bus.init(SpiBusId(0), &attrs, &SpiExtraAttributes { tx_use_dma: true }),
            Ok(())
        );
        let spi = bus.release();
        assert!(spi.written.is_empty());
        assert_eq!(spi.flushes, 0);
    }

    #[test]
    fn test_spi_error_passed_through() {
        let spi = MockHalSpi {
            fail: true,
            ..MockHalSpi::default()
        };
        let mut bus = EhSpiBus::new(spi, SpiBusId(0));

        assert_eq!(
            bus.write(SpiBusId(0), &[0x88], Timeout::Forever),
            Err(EhSpiError::Spi(MockSpiError))
        );
        // No flush after a failed write
        assert_eq!(bus.release().flushes, 0);
    }

    #[test]
    fn test_no_delay() {
        let mut delay = NoDelay;
        delay.delay_us(1_000);
        delay.delay_ms(5);
    }
}
