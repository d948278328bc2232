//! Configuration type definitions

use core::num::NonZeroU32;

use ledwire_hal::spi::Mode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default SPI clock in MHz
///
/// Four SPI bits per strip bit at 3 MHz gives a 1.33 µs strip bit period
/// with a 333 ns `0` pulse and a 667 ns `1` pulse.
pub const DEFAULT_FREQUENCY_MHZ: u32 = 3;

/// Default peripheral source clock in Hz
pub const DEFAULT_BUS_CLOCK_HZ: u32 = 32_000_000;

/// SPI timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiSettings {
    /// SCK frequency in MHz
    pub frequency_mhz: u32,
    /// Peripheral source clock in Hz
    pub bus_clock_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            frequency_mhz: DEFAULT_FREQUENCY_MHZ,
            bus_clock_hz: DEFAULT_BUS_CLOCK_HZ,
            mode: Mode::Mode0,
        }
    }
}

/// What to do when a data write fails
///
/// The default retries forever with no delay. On hardware that can fail
/// permanently this spins the task, so a limit or a backoff can be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetryPolicy {
    /// Give up after this many attempts (`None` = never)
    pub max_attempts: Option<NonZeroU32>,
    /// Delay between attempts in microseconds
    pub backoff_us: u32,
}

impl RetryPolicy {
    /// Retry forever without delay
    pub const fn unbounded() -> Self {
        Self {
            max_attempts: None,
            backoff_us: 0,
        }
    }

    /// Stop after `attempts` attempts
    ///
    /// `0` is treated as unbounded.
    pub const fn limited(attempts: u32) -> Self {
        Self {
            max_attempts: NonZeroU32::new(attempts),
            backoff_us: 0,
        }
    }

    /// Wait `backoff_us` between attempts
    pub const fn with_backoff(mut self, backoff_us: u32) -> Self {
        self.backoff_us = backoff_us;
        self
    }

    /// Whether another attempt is allowed after `attempts` have run
    pub fn allows_another(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts < max.get(),
            None => true,
        }
    }
}

/// Transfer task configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransferConfig {
    /// Verbose phase logging and encoded buffer dump
    pub trace: bool,
    /// Feed SPI transmit from DMA
    pub use_dma: bool,
    /// SPI timing
    pub spi: SpiSettings,
    /// Failure handling
    pub retry: RetryPolicy,
}
