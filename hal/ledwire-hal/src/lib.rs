//! ledwire Hardware Abstraction Layer
//!
//! This crate defines the peripheral capabilities the LED transfer driver
//! consumes. A chip-specific board support crate implements them on top of
//! its vendor SPI, pin-mux and GPIO drivers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledwire-drivers (transfer task)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board crate (vendor SPI/GPIO/DMA)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - SPI bus bring-up and blocking writes
//! - [`gpio::PinMux`] - Pin function selection
//! - [`gpio::Gpio`] - Digital output direction and level
//! - [`dma::Dma`] - Optional DMA controller for SPI transmit

#![no_std]
#![deny(unsafe_code)]

pub mod dma;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use dma::{Dma, NoDma};
pub use gpio::{Direction, Gpio, Level, PinFunction, PinId, PinMux};
pub use spi::{SpiAttributes, SpiBus, SpiBusId, SpiExtraAttributes, Timeout};
