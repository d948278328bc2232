//! Data pin routing
//!
//! Each SPI bus has its own transmit-data function on the pin mux. Only
//! the three buses in [`BUS_FUNCTIONS`] exist; any other bus number is a
//! configuration error.

use ledwire_hal::{PinFunction, PinId, PinMux, SpiBusId};

/// SPI bus to pin function table
pub const BUS_FUNCTIONS: [(SpiBusId, PinFunction); 3] = [
    (SpiBusId(0), PinFunction::Spi0Txd),
    (SpiBusId(1), PinFunction::Spi1Txd),
    (SpiBusId(2), PinFunction::Spi2Txd),
];

/// Errors from routing the data pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMuxError {
    /// Bus has no entry in [`BUS_FUNCTIONS`]
    UnknownBus(SpiBusId),
    /// Pin mux refused the function
    Rejected,
}

/// Transmit-data function for `bus`
pub fn spi_function(bus: SpiBusId) -> Result<PinFunction, PinMuxError> {
    BUS_FUNCTIONS
        .iter()
        .find(|(id, _)| *id == bus)
        .map(|&(_, function)| function)
        .ok_or(PinMuxError::UnknownBus(bus))
}

/// Route `pin` to the transmit-data function of `bus`
///
/// Failures are logged here; callers decide whether to carry on.
pub fn route_to_spi<M: PinMux>(
    mux: &mut M,
    pin: PinId,
    bus: SpiBusId,
) -> Result<PinFunction, PinMuxError> {
    let function = match spi_function(bus) {
        Ok(function) => function,
        Err(e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("spi bus {} has no pin function", bus.0);
            return Err(e);
        }
    };

    mux.set_pin_function(pin, function).map_err(|_e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("set pin {} mode failed: {:?}", pin.0, defmt::Debug2Format(&_e));
        PinMuxError::Rejected
    })?;

    Ok(function)
}
