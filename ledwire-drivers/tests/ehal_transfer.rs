//! Transfer driver on top of an `embedded-hal` SPI bus

use core::convert::Infallible;

use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus as HalSpiBus};
use ledwire_core::config::MAX_CONFIG_SIZE;
use ledwire_core::{Grb, RetryPolicy, TransferConfig, TransferDescriptor};
use ledwire_drivers::embedded::{EhSpiBus, NoDelay};
use ledwire_drivers::{TransferDriver, TransferOutcome, RESET_PREAMBLE};
use ledwire_hal::{Direction, Gpio, Level, NoDma, PinFunction, PinId, PinMux, SpiBusId};

#[derive(Debug)]
struct Flaky;

impl embedded_hal::spi::Error for Flaky {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Overrun
    }
}

/// Captures every accepted write; the first `fail_frames` large writes fail
#[derive(Default)]
struct CaptureSpi {
    writes: Vec<Vec<u8>>,
    fail_frames: usize,
}

impl ErrorType for CaptureSpi {
    type Error = Flaky;
}

impl HalSpiBus<u8> for CaptureSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Flaky> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Flaky> {
        if words != RESET_PREAMBLE.as_slice() && self.fail_frames > 0 {
            self.fail_frames -= 1;
            return Err(Flaky);
        }
        self.writes.push(words.to_vec());
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Flaky> {
        self.write(write)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Flaky> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Flaky> {
        Ok(())
    }
}

#[derive(Default)]
struct Pins {
    functions: Vec<(PinId, PinFunction)>,
}

impl PinMux for Pins {
    type Error = Infallible;

    fn set_pin_function(&mut self, pin: PinId, function: PinFunction) -> Result<(), Infallible> {
        self.functions.push((pin, function));
        Ok(())
    }
}

#[derive(Default)]
struct Levels {
    direction: Option<Direction>,
    level: Option<Level>,
}

impl Gpio for Levels {
    type Error = Infallible;

    fn set_direction(&mut self, _pin: PinId, direction: Direction) -> Result<(), Infallible> {
        self.direction = Some(direction);
        Ok(())
    }

    fn set_level(&mut self, _pin: PinId, level: Level) -> Result<(), Infallible> {
        self.level = Some(level);
        Ok(())
    }
}

#[test]
fn frame_reaches_hal_bus() {
    let spi = EhSpiBus::new(CaptureSpi::default(), SpiBusId(2));
    let mut driver = TransferDriver::new(
        spi,
        Pins::default(),
        Levels::default(),
        NoDma,
        NoDelay,
        TransferConfig::default(),
    );

    let pixels = [Grb::new(0xA5, 0x00, 0xFF)];
    let desc = TransferDescriptor::new(SpiBusId(2), PinId(4), &pixels);
    assert_eq!(
        driver.run(Some(&desc)),
        TransferOutcome::Completed { attempts: 1 }
    );

    let (spi, pins, levels, _, _) = driver.release();
    let spi = spi.release();
    assert_eq!(spi.writes.len(), 2);
    assert_eq!(spi.writes[0], RESET_PREAMBLE.to_vec());
    assert_eq!(
        spi.writes[1],
        [0xC8, 0xC8, 0x8C, 0x8C, 0x88, 0x88, 0x88, 0x88, 0xCC, 0xCC, 0xCC, 0xCC]
    );

    assert_eq!(
        pins.functions,
        [(PinId(4), PinFunction::Spi2Txd), (PinId(4), PinFunction::Gpio)]
    );
    assert_eq!(levels.direction, Some(Direction::Output));
    assert_eq!(levels.level, Some(Level::Low));
}

#[test]
fn transient_errors_are_retried() {
    let hal = CaptureSpi {
        fail_frames: 2,
        ..CaptureSpi::default()
    };
    let mut driver = TransferDriver::new(
        EhSpiBus::new(hal, SpiBusId(0)),
        Pins::default(),
        Levels::default(),
        NoDma,
        NoDelay,
        TransferConfig::default(),
    );

    let pixels = [Grb::OFF; 3];
    let desc = TransferDescriptor::new(SpiBusId(0), PinId(1), &pixels);
    assert_eq!(
        driver.run(Some(&desc)),
        TransferOutcome::Completed { attempts: 3 }
    );

    let (spi, pins, ..) = driver.release();
    let spi = spi.release();
    // Three preambles, one accepted frame
    assert_eq!(spi.writes.len(), 4);
    assert_eq!(spi.writes[3], vec![0x88; 36]);
    let routed = pins
        .functions
        .iter()
        .filter(|(_, f)| *f == PinFunction::Spi0Txd)
        .count();
    assert_eq!(routed, 3);
}

#[test]
fn stored_config_limits_retries() {
    let config = TransferConfig {
        trace: true,
        retry: RetryPolicy::limited(2),
        ..TransferConfig::default()
    };
    let mut slot = [0u8; MAX_CONFIG_SIZE];
    let bytes = config.to_bytes(&mut slot).unwrap();
    let loaded = TransferConfig::from_bytes(bytes).unwrap();

    let hal = CaptureSpi {
        fail_frames: usize::MAX,
        ..CaptureSpi::default()
    };
    let mut driver = TransferDriver::new(
        EhSpiBus::new(hal, SpiBusId(1)),
        Pins::default(),
        Levels::default(),
        NoDma,
        NoDelay,
        loaded,
    );

    let pixels = [Grb::OFF];
    let desc = TransferDescriptor::new(SpiBusId(1), PinId(7), &pixels);
    assert_eq!(
        driver.run(Some(&desc)),
        TransferOutcome::GaveUp { attempts: 2 }
    );

    let (spi, pins, levels, _, _) = driver.release();
    // Only the two preambles got through
    assert_eq!(spi.release().writes.len(), 2);
    assert!(!pins.functions.contains(&(PinId(7), PinFunction::Gpio)));
    assert_eq!(levels.level, None);
}
