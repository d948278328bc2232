//! Board-agnostic core logic for the ledwire LED strip driver
//!
//! This crate contains everything that does not touch a peripheral:
//!
//! - Pixel model (GRB byte order)
//! - Bit encoder that turns pixels into an SPI pulse stream, and its inverse
//! - Transfer descriptor handed to the transfer task
//! - Transfer configuration and its binary persistence format
//! - Transfer state machine

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod descriptor;
pub mod encoder;
pub mod pixel;
pub mod state;

pub use config::{RetryPolicy, SpiSettings, TransferConfig};
pub use descriptor::{DescriptorError, TransferDescriptor};
pub use encoder::{decode, encode, encode_into, encoded_len, DecodeError, EncodeError};
pub use pixel::Grb;
pub use state::{SendStatus, TransferEvent, TransferState};
