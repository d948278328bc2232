//! Transfer descriptor
//!
//! Everything the transfer task needs to push one frame: which bus and pin
//! to use and which pixels to send.

use ledwire_hal::{PinId, SpiBusId};

use crate::encoder::encoded_len;
use crate::pixel::Grb;

/// Errors when building a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    /// Requested pixel count is larger than the pixel slice
    CountExceedsPixels,
}

/// One frame's worth of work for the transfer task
///
/// Borrowed by the task for the duration of the transfer and not retained
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferDescriptor<'a> {
    /// SPI bus that clocks the data out
    pub bus: SpiBusId,
    /// Strip data pin
    pub pin: PinId,
    pixels: &'a [Grb],
    count: usize,
}

impl<'a> TransferDescriptor<'a> {
    /// Describe a transfer of every pixel in `pixels`
    pub fn new(bus: SpiBusId, pin: PinId, pixels: &'a [Grb]) -> Self {
        Self {
            bus,
            pin,
            pixels,
            count: pixels.len(),
        }
    }

    /// Describe a transfer of the first `count` pixels
    pub fn with_count(
        bus: SpiBusId,
        pin: PinId,
        pixels: &'a [Grb],
        count: usize,
    ) -> Result<Self, DescriptorError> {
        if count > pixels.len() {
            return Err(DescriptorError::CountExceedsPixels);
        }
        Ok(Self {
            bus,
            pin,
            pixels,
            count,
        })
    }

    /// Number of LEDs to drive
    pub fn count(&self) -> usize {
        self.count
    }

    /// The pixels that will be sent
    pub fn pixels(&self) -> &'a [Grb] {
        &self.pixels[..self.count]
    }

    /// Size of the encoded buffer for this transfer
    pub fn encoded_len(&self) -> usize {
        encoded_len(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXELS: [Grb; 3] = [Grb::OFF, Grb::new(1, 2, 3), Grb::new(4, 5, 6)];

    #[test]
    fn test_new_takes_whole_slice() {
        let desc = TransferDescriptor::new(SpiBusId(0), PinId(7), &PIXELS);
        assert_eq!(desc.count(), 3);
        assert_eq!(desc.pixels(), &PIXELS);
        assert_eq!(desc.encoded_len(), 36);
    }

    #[test]
    fn test_with_count_limits_pixels() {
        let desc = TransferDescriptor::with_count(SpiBusId(1), PinId(2), &PIXELS, 2).unwrap();
        assert_eq!(desc.count(), 2);
        assert_eq!(desc.pixels(), &PIXELS[..2]);
        assert_eq!(desc.encoded_len(), 24);
    }

    #[test]
    fn test_with_count_rejects_overrun() {
        let result = TransferDescriptor::with_count(SpiBusId(1), PinId(2), &PIXELS, 4);
        assert_eq!(result, Err(DescriptorError::CountExceedsPixels));
    }
}
