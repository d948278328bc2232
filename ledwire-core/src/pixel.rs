//! Pixel model
//!
//! The strip latches colour bytes in green, red, blue order. [`Grb`] stores
//! them in that order so a pixel slice is already in wire order.

/// Number of colour bytes per pixel
pub const BYTES_PER_PIXEL: usize = 3;

/// One LED's colour, stored in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct Grb {
    pub green: u8,
    pub red: u8,
    pub blue: u8,
}

impl Grb {
    /// All channels off
    pub const OFF: Grb = Grb::new(0, 0, 0);

    /// Create a pixel from channel values in wire order
    pub const fn new(green: u8, red: u8, blue: u8) -> Self {
        Self { green, red, blue }
    }

    /// Create a pixel from the conventional red, green, blue order
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { green, red, blue }
    }

    /// Channel bytes in the order they go on the wire
    pub const fn as_bytes(&self) -> [u8; BYTES_PER_PIXEL] {
        [self.green, self.red, self.blue]
    }

    /// Rebuild a pixel from wire-order bytes
    pub const fn from_bytes(bytes: [u8; BYTES_PER_PIXEL]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl From<[u8; BYTES_PER_PIXEL]> for Grb {
    fn from(bytes: [u8; BYTES_PER_PIXEL]) -> Self {
        Self::from_bytes(bytes)
    }
}
