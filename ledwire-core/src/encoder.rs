//! Pixel to SPI bit-pattern encoding
//!
//! The strip expects a fixed bit period with a short high pulse for `0`
//! and a long high pulse for `1`. Clocking SPI at roughly four times the
//! strip's bit rate lets each strip bit be drawn with four SPI bits:
//!
//! ```text
//! strip bit 0  ->  1000   (high for 1/4 of the period)
//! strip bit 1  ->  1100   (high for 2/4 of the period)
//! ```
//!
//! Two strip bits are packed per SPI byte, most significant pair first, so
//! every colour byte expands to four SPI bytes and every pixel to twelve.

use alloc::vec;
use alloc::vec::Vec;

use crate::pixel::{Grb, BYTES_PER_PIXEL};

/// 4-bit symbol for a `0` bit
pub const SYMBOL_ZERO: u8 = 0b1000;

/// 4-bit symbol for a `1` bit
pub const SYMBOL_ONE: u8 = 0b1100;

/// Encoded bytes per colour byte (one per bit pair)
pub const ENCODED_BYTES_PER_BYTE: usize = 4;

/// Encoded bytes per pixel
pub const ENCODED_BYTES_PER_PIXEL: usize = ENCODED_BYTES_PER_BYTE * BYTES_PER_PIXEL;

/// Errors from encoding into a caller-provided buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer cannot hold the encoded pixels
    BufferTooSmall,
}

/// Errors from decoding an encoded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Input length is not a whole number of pixels
    TruncatedPixel,
    /// Nibble at `offset` is neither the `0` nor the `1` symbol
    InvalidSymbol { offset: usize },
    /// Output slice cannot hold the decoded pixels
    BufferTooSmall,
}

/// Length of the encoded buffer for `count` pixels
pub const fn encoded_len(count: usize) -> usize {
    count * ENCODED_BYTES_PER_PIXEL
}

#[inline]
const fn symbol(bit: u8) -> u8 {
    if bit == 0 {
        SYMBOL_ZERO
    } else {
        SYMBOL_ONE
    }
}

/// Encode one colour byte into its four SPI bytes
pub const fn encode_byte(byte: u8) -> [u8; ENCODED_BYTES_PER_BYTE] {
    let mut out = [0u8; ENCODED_BYTES_PER_BYTE];
    let mut pair = 0;
    while pair < ENCODED_BYTES_PER_BYTE {
        let high = (byte >> (7 - 2 * pair)) & 0x01;
        let low = (byte >> (6 - 2 * pair)) & 0x01;
        out[pair] = (symbol(high) << 4) | symbol(low);
        pair += 1;
    }
    out
}

/// Encode `pixels` into a freshly allocated buffer
///
/// The result is exactly [`encoded_len`]`(pixels.len())` bytes long.
pub fn encode(pixels: &[Grb]) -> Vec<u8> {
    let mut out = vec![0u8; encoded_len(pixels.len())];
    fill(pixels, &mut out);
    out
}

/// Encode `pixels` into the front of `out`
///
/// Returns the number of bytes written.
pub fn encode_into(pixels: &[Grb], out: &mut [u8]) -> Result<usize, EncodeError> {
    let len = encoded_len(pixels.len());
    if out.len() < len {
        return Err(EncodeError::BufferTooSmall);
    }
    fill(pixels, &mut out[..len]);
    Ok(len)
}

/// Encode `pixels` into a fixed-capacity vector
pub fn encode_to_heapless<const N: usize>(
    pixels: &[Grb],
) -> Result<heapless::Vec<u8, N>, EncodeError> {
    let mut out = heapless::Vec::new();
    out.resize(encoded_len(pixels.len()), 0)
        .map_err(|_| EncodeError::BufferTooSmall)?;
    fill(pixels, &mut out);
    Ok(out)
}

/// `out` must be exactly `encoded_len(pixels.len())` long
fn fill(pixels: &[Grb], out: &mut [u8]) {
    for (pixel, chunk) in pixels
        .iter()
        .zip(out.chunks_exact_mut(ENCODED_BYTES_PER_PIXEL))
    {
        for (byte, slot) in pixel
            .as_bytes()
            .into_iter()
            .zip(chunk.chunks_exact_mut(ENCODED_BYTES_PER_BYTE))
        {
            slot.copy_from_slice(&encode_byte(byte));
        }
    }
}

#[inline]
fn decode_symbol(nibble: u8) -> Option<u8> {
    match nibble {
        SYMBOL_ZERO => Some(0),
        SYMBOL_ONE => Some(1),
        _ => None,
    }
}

/// Decode four SPI bytes back into one colour byte
///
/// `offset` is the position of `encoded[0]` in the whole buffer and is
/// only used for error reporting.
fn decode_byte(encoded: &[u8], offset: usize) -> Result<u8, DecodeError> {
    let mut byte = 0u8;
    for (pair, &packed) in encoded.iter().enumerate() {
        let at = offset + pair;
        let high = decode_symbol(packed >> 4).ok_or(DecodeError::InvalidSymbol { offset: at })?;
        let low = decode_symbol(packed & 0x0F).ok_or(DecodeError::InvalidSymbol { offset: at })?;
        byte = (byte << 2) | (high << 1) | low;
    }
    Ok(byte)
}

/// Decode an encoded buffer back into pixels
///
/// Returns the number of pixels written to `out`.
pub fn decode(encoded: &[u8], out: &mut [Grb]) -> Result<usize, DecodeError> {
    if encoded.len() % ENCODED_BYTES_PER_PIXEL != 0 {
        return Err(DecodeError::TruncatedPixel);
    }
    let count = encoded.len() / ENCODED_BYTES_PER_PIXEL;
    if out.len() < count {
        return Err(DecodeError::BufferTooSmall);
    }

    for (index, chunk) in encoded.chunks_exact(ENCODED_BYTES_PER_PIXEL).enumerate() {
        let base = index * ENCODED_BYTES_PER_PIXEL;
        let mut bytes = [0u8; BYTES_PER_PIXEL];
        for (color, slot) in bytes.iter_mut().enumerate() {
            let start = color * ENCODED_BYTES_PER_BYTE;
            *slot = decode_byte(
                &chunk[start..start + ENCODED_BYTES_PER_BYTE],
                base + start,
            )?;
        }
        out[index] = Grb::from_bytes(bytes);
    }

    Ok(count)
}
