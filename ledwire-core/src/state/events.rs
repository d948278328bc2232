//! Transfer events

/// Events that drive transfer state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferEvent {
    /// SPI bus initialisation finished (successfully or not)
    BusInitialized,
    /// Data pin routed to the bus (or routing was attempted)
    PinMuxApplied,
    /// Reset preamble write returned
    ResetPreambleSent,
    /// Encoded frame written successfully
    DataWritten,
    /// Encoded frame write failed
    DataWriteFailed,
    /// Start another attempt after a failed write
    Retry,
    /// Retry policy refused another attempt
    RetriesExhausted,
}
