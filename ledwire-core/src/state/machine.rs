//! State machine definition

use super::events::TransferEvent;

/// Outcome of the data write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendStatus {
    Success,
    Failure,
}

/// Transfer states
///
/// Bus configuration happens once; every attempt re-applies the pin mux,
/// so a retry goes back to [`TransferState::BusConfigured`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferState {
    /// Nothing done yet
    #[default]
    Idle,
    /// SPI bus initialised
    BusConfigured,
    /// Data pin routed to the SPI transmit function
    PinConfigured,
    /// Reset preamble on the wire
    ResetSent,
    /// Encoded frame write returned
    DataSent(SendStatus),
    /// Retry limit reached without a successful write
    Abandoned,
}

impl TransferState {
    /// Check if the transfer is over
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferState::DataSent(SendStatus::Success) | TransferState::Abandoned
        )
    }

    /// Check if the frame made it onto the wire
    pub fn is_complete(&self) -> bool {
        matches!(self, TransferState::DataSent(SendStatus::Success))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: TransferEvent) -> Self {
        use SendStatus::*;
        use TransferEvent::*;
        use TransferState::*;

        match (self, event) {
            (Idle, BusInitialized) => BusConfigured,

            (BusConfigured, PinMuxApplied) => PinConfigured,

            (PinConfigured, ResetPreambleSent) => ResetSent,

            (ResetSent, DataWritten) => DataSent(Success),
            (ResetSent, DataWriteFailed) => DataSent(Failure),

            (DataSent(Failure), Retry) => BusConfigured,
            (DataSent(Failure), RetriesExhausted) => Abandoned,

            // Default: stay in current state
            _ => self,
        }
    }
}
