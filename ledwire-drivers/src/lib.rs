//! Driver implementations
//!
//! This crate drives a WS2812-style strip from an SPI master:
//!
//! - Transfer task (bus bring-up, pin routing, reset + frame send loop)
//! - Bus to pin-function routing table
//! - Adapters for `embedded-hal` SPI buses and delays

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod embedded;
pub mod transfer;

pub use transfer::{TransferDriver, TransferOutcome, RESET_PREAMBLE, RESET_PREAMBLE_LEN};
