//! Pin multiplexer and GPIO abstractions
//!
//! Pins are addressed by number, the way vendor SDKs expose them. The
//! LED data pin switches between an SPI transmit role while frames are on
//! the wire and a plain GPIO output that parks the line low afterwards.

/// Pin number as understood by the board's pin multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// Function a pin can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFunction {
    /// Plain software-controlled GPIO
    Gpio,
    /// SPI bus 0 transmit data (MOSI)
    Spi0Txd,
    /// SPI bus 1 transmit data (MOSI)
    Spi1Txd,
    /// SPI bus 2 transmit data (MOSI)
    Spi2Txd,
}

/// GPIO direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// GPIO logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Pin multiplexer
///
/// Routes a physical pin to one of its alternate functions.
pub trait PinMux {
    /// Error type for pin-mux operations
    type Error: core::fmt::Debug;

    /// Select the function for `pin`
    fn set_pin_function(&mut self, pin: PinId, function: PinFunction) -> Result<(), Self::Error>;
}

/// GPIO controller
///
/// Only meaningful for pins currently routed to [`PinFunction::Gpio`].
pub trait Gpio {
    /// Error type for GPIO operations
    type Error: core::fmt::Debug;

    /// Set the pin direction
    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), Self::Error>;

    /// Drive an output pin to `level`
    fn set_level(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error>;

    /// Drive an output pin low
    fn set_low(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.set_level(pin, Level::Low)
    }
}
