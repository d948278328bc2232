//! Transfer state machine
//!
//! Tracks one transfer task from bus bring-up to the final data write.
//! Transitions are explicit, finite and deterministic.

pub mod events;
pub mod machine;

pub use events::TransferEvent;
pub use machine::{SendStatus, TransferState};
