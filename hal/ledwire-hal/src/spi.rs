//! SPI bus abstractions
//!
//! Provides the master-side bring-up and blocking write operations the
//! LED transfer task needs. Buses are addressed by number because the
//! data pin's mux function depends on which bus drives it.

/// SPI bus number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBusId(pub u8);

/// Timeout for a blocking bus write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Block until the transport resolves the write
    Forever,
    /// Give up after the given number of milliseconds
    Millis(u32),
}

/// SPI bus master
///
/// Writes block until the peripheral reports completion or an error.
/// There are no partial writes: a write either succeeds as a whole or fails.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error: core::fmt::Debug;

    /// Initialise `bus` with the given attributes
    fn init(
        &mut self,
        bus: SpiBusId,
        attributes: &SpiAttributes,
        extra: &SpiExtraAttributes,
    ) -> Result<(), Self::Error>;

    /// Write `data` on `bus` without reading
    fn write(&mut self, bus: SpiBusId, data: &[u8], timeout: Timeout) -> Result<(), Self::Error>;
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Frame format on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameFormat {
    /// Motorola SPI, single data line
    Standard,
    /// Dual data lines
    Dual,
    /// Quad data lines
    Quad,
}

/// Data frame width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameSize {
    Bits8,
    Bits16,
    Bits32,
}

/// Transfer direction of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    /// Transmit and receive
    TxRx,
    /// Transmit only
    TxOnly,
    /// Receive only
    RxOnly,
}

/// SPI bus attributes applied at initialisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiAttributes {
    /// Run as slave instead of master
    pub is_slave: bool,
    /// Number of slaves on the bus
    pub slave_count: u8,
    /// Peripheral source clock in Hz
    pub bus_clock_hz: u32,
    /// SCK frequency in MHz
    pub frequency_mhz: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
    /// Frame format
    pub frame_format: FrameFormat,
    /// Bits per frame
    pub frame_size: FrameSize,
    /// Transfer direction
    pub transfer_mode: TransferMode,
    /// Toggle slave select between frames
    pub slave_select_toggle: bool,
}

/// Extended attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiExtraAttributes {
    /// Feed the transmit FIFO from DMA
    pub tx_use_dma: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_split() {
        let (pol, pha): (Polarity, Phase) = Mode::Mode0.into();
        assert_eq!(pol, Polarity::IdleLow);
        assert_eq!(pha, Phase::CaptureOnFirstTransition);

        let (pol, pha): (Polarity, Phase) = Mode::Mode3.into();
        assert_eq!(pol, Polarity::IdleHigh);
        assert_eq!(pha, Phase::CaptureOnSecondTransition);
    }
}
