//! LED frame transfer task
//!
//! Pushes one frame of pixels to the strip:
//!
//! 1. Bring up the SPI bus once (DMA first when enabled)
//! 2. Encode the pixels once
//! 3. Per attempt: route the data pin to the bus, send the reset preamble,
//!    send the frame
//! 4. On success park the data pin as a low GPIO output so the strip keeps
//!    its last frame; on failure go back to 3
//!
//! The default retry policy never gives up. Configuration problems (unknown
//! bus, failed DMA or bus init, failed preamble write) are logged and the
//! loop carries on regardless.

pub mod bus;
pub mod pinmux;

use embedded_hal::delay::DelayNs;
use ledwire_core::config::TransferConfig;
use ledwire_core::encoder;
use ledwire_core::state::{TransferEvent, TransferState};
use ledwire_core::TransferDescriptor;
use ledwire_hal::{Direction, Dma, Gpio, PinFunction, PinId, PinMux, SpiBus, Timeout};

pub use bus::SetupReport;
pub use pinmux::PinMuxError;

/// Length of the reset preamble in bytes
pub const RESET_PREAMBLE_LEN: usize = 80;

/// Idle-low period that resets the strip's latch before a frame
///
/// 640 low bits at 3 MHz is about 213 µs.
pub const RESET_PREAMBLE: [u8; RESET_PREAMBLE_LEN] = [0u8; RESET_PREAMBLE_LEN];

/// How a call to [`TransferDriver::run`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferOutcome {
    /// No descriptor was given; no peripheral was touched
    NoDescriptor,
    /// Frame sent; `attempts` includes the successful one
    Completed { attempts: u32 },
    /// Retry policy ran out before a write succeeded
    GaveUp { attempts: u32 },
}

/// Transfer task driver
///
/// Owns the peripherals it uses for as long as it lives. Transfers on the
/// same bus or pin must be serialized by the caller.
pub struct TransferDriver<B, M, G, D, T> {
    spi: B,
    mux: M,
    gpio: G,
    dma: D,
    delay: T,
    config: TransferConfig,
    state: TransferState,
    setup: SetupReport,
}

impl<B, M, G, D, T> TransferDriver<B, M, G, D, T>
where
    B: SpiBus,
    M: PinMux,
    G: Gpio,
    D: Dma,
    T: DelayNs,
{
    /// Create a driver from its peripherals
    ///
    /// Pass [`ledwire_hal::NoDma`] as `dma` on boards without DMA, and
    /// [`crate::embedded::NoDelay`] as `delay` when no backoff is configured.
    pub fn new(spi: B, mux: M, gpio: G, dma: D, delay: T, config: TransferConfig) -> Self {
        Self {
            spi,
            mux,
            gpio,
            dma,
            delay,
            config,
            state: TransferState::Idle,
            setup: SetupReport::default(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// State reached by the last transfer
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Bring-up result of the last transfer
    pub fn setup_report(&self) -> SetupReport {
        self.setup
    }

    /// Give the peripherals back
    pub fn release(self) -> (B, M, G, D, T) {
        (self.spi, self.mux, self.gpio, self.dma, self.delay)
    }

    /// Run one transfer to completion
    ///
    /// Blocks until the frame is on the wire or the retry policy gives up.
    /// `None` returns immediately without touching any peripheral.
    pub fn run(&mut self, descriptor: Option<&TransferDescriptor<'_>>) -> TransferOutcome {
        let Some(descriptor) = descriptor else {
            #[cfg(feature = "defmt")]
            defmt::info!("transfer task started without descriptor, exiting");
            return TransferOutcome::NoDescriptor;
        };

        self.state = TransferState::Idle;
        self.setup = bus::bring_up(&mut self.spi, &mut self.dma, descriptor.bus, &self.config);
        self.advance(TransferEvent::BusInitialized);

        let frame = encoder::encode(descriptor.pixels());
        if self.config.trace {
            #[cfg(feature = "defmt")]
            defmt::trace!("encoded frame: {:x}", frame.as_slice());
        }

        self.send_loop(descriptor, &frame)
    }

    fn send_loop(&mut self, descriptor: &TransferDescriptor<'_>, frame: &[u8]) -> TransferOutcome {
        let bus = descriptor.bus;
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::info!("spi{} master send start (attempt {})", bus.0, attempts);

            if self.config.trace {
                #[cfg(feature = "defmt")]
                defmt::debug!("spi{} pinmux start", bus.0);
            }
            // Unknown bus or rejected mux is logged inside; send anyway
            let _ = pinmux::route_to_spi(&mut self.mux, descriptor.pin, bus);
            self.advance(TransferEvent::PinMuxApplied);

            // Preamble result is not checked: the frame is always attempted
            if let Err(_e) = self.spi.write(bus, &RESET_PREAMBLE, Timeout::Forever) {
                if self.config.trace {
                    #[cfg(feature = "defmt")]
                    defmt::debug!(
                        "spi{} reset preamble failed: {:?}",
                        bus.0,
                        defmt::Debug2Format(&_e)
                    );
                }
            }
            self.advance(TransferEvent::ResetPreambleSent);

            match self.spi.write(bus, frame, Timeout::Forever) {
                Ok(()) => {
                    self.advance(TransferEvent::DataWritten);
                    #[cfg(feature = "defmt")]
                    defmt::info!("spi{} master send succ", bus.0);
                    self.park_pin(descriptor.pin);
                    return TransferOutcome::Completed { attempts };
                }
                Err(_e) => {
                    self.advance(TransferEvent::DataWriteFailed);
                    if self.config.trace {
                        #[cfg(feature = "defmt")]
                        defmt::debug!(
                            "spi{} master send failed: {:?}",
                            bus.0,
                            defmt::Debug2Format(&_e)
                        );
                    }
                }
            }

            if !self.config.retry.allows_another(attempts) {
                self.advance(TransferEvent::RetriesExhausted);
                #[cfg(feature = "defmt")]
                defmt::warn!("spi{} giving up after {} attempts", bus.0, attempts);
                return TransferOutcome::GaveUp { attempts };
            }

            if self.config.retry.backoff_us > 0 {
                self.delay.delay_us(self.config.retry.backoff_us);
            }
            self.advance(TransferEvent::Retry);
        }
    }

    /// Return the data pin to a low GPIO output
    fn park_pin(&mut self, pin: PinId) {
        if let Err(_e) = self.mux.set_pin_function(pin, PinFunction::Gpio) {
            #[cfg(feature = "defmt")]
            defmt::warn!("pin {} gpio mode failed: {:?}", pin.0, defmt::Debug2Format(&_e));
        }
        if let Err(_e) = self.gpio.set_direction(pin, Direction::Output) {
            #[cfg(feature = "defmt")]
            defmt::warn!("pin {} direction failed: {:?}", pin.0, defmt::Debug2Format(&_e));
        }
        if let Err(_e) = self.gpio.set_low(pin) {
            #[cfg(feature = "defmt")]
            defmt::warn!("pin {} set low failed: {:?}", pin.0, defmt::Debug2Format(&_e));
        }
    }

    fn advance(&mut self, event: TransferEvent) {
        let next = self.state.transition(event);
        if self.config.trace {
            #[cfg(feature = "defmt")]
            defmt::trace!("transfer {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}
