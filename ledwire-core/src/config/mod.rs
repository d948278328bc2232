//! Configuration types
//!
//! Runtime options for the transfer task, replacing build-time switches.
//! Configuration can be stored as postcard binary data.

pub mod stored;
pub mod types;

pub use stored::*;
pub use types::*;
