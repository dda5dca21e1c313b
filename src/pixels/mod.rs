//! Pixel codecs: raw texture payloads to canonical RGBA scanlines.
//!
//! Every codec has the same shape, [`PixelCodec`]:
//! `(data, width, height, needs_swap) -> Result<Rows>`. Validation happens
//! up front, so a codec that returns `Ok` always yields exactly `height`
//! rows of `width * 4` bytes in R, G, B, A order.
//!
//! The row sequence is lazy and forward-only. It borrows the input and
//! decodes on demand; nothing is copied ahead of the consumer. Restarting
//! means calling the codec again.
//!
//! | Function | Source layout |
//! |----------|---------------|
//! | [`decode_bgra`] | 32-bit B,G,R,A (A,R,G,B when swapped) |
//! | [`decode_rgba`] | 32-bit R,G,B,A (A,B,G,R when swapped) |
//! | [`decode_alpha8`] | 8-bit alpha only |
//! | [`decode_dxt1`] / [`decode_dxt3`] / [`decode_dxt5`] | 4×4 block compression |

pub mod dxt;
pub mod packed;

pub use dxt::{DxtFormat, DxtRows, decode_dxt1, decode_dxt3, decode_dxt5};
pub use packed::{Alpha8Rows, ChannelOrder, Packed32Rows, decode_alpha8, decode_bgra, decode_rgba};

use crate::Result;

/// One decoded scanline: `width * 4` bytes, R, G, B, A per pixel.
pub type Row = Vec<u8>;

/// Lazy, single-pass sequence of decoded scanlines.
pub type Rows<'a> = Box<dyn Iterator<Item = Row> + 'a>;

/// Entry point shared by every codec.
///
/// `needs_swap` is set for big-endian (Xbox 360) payloads.
pub type PixelCodec = for<'a> fn(&'a [u8], u32, u32, bool) -> Result<Rows<'a>>;

/// Byte length of a `width × height` image at `bytes_per_pixel`, or `None`
/// on overflow.
pub(crate) fn image_len(width: u32, height: u32, bytes_per_pixel: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(bytes_per_pixel)
}
