//! Uncompressed codecs: 32-bit channel reordering and 8-bit alpha expansion.

use std::slice::ChunksExact;

use super::{Row, Rows, image_len};
use crate::{Error, Result};

/// Byte order of the four channels in a 32-bit source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// R, G, B, A (already canonical).
    Rgba,
    /// B, G, R, A.
    Bgra,
    /// A, R, G, B.
    Argb,
    /// A, B, G, R.
    Abgr,
}

impl ChannelOrder {
    /// Source byte offsets of R, G, B and A within one pixel.
    const fn offsets(self) -> [usize; 4] {
        match self {
            ChannelOrder::Rgba => [0, 1, 2, 3],
            ChannelOrder::Bgra => [2, 1, 0, 3],
            ChannelOrder::Argb => [1, 2, 3, 0],
            ChannelOrder::Abgr => [3, 2, 1, 0],
        }
    }
}

/// Row iterator over a 32-bit packed image.
pub struct Packed32Rows<'a> {
    rows: ChunksExact<'a, u8>,
    offsets: [usize; 4],
}

impl<'a> Packed32Rows<'a> {
    /// Validate `data` against `width × height` and prepare the iterator.
    ///
    /// Fails with [`Error::BadDimensions`] if either dimension is zero and
    /// [`Error::SizeMismatch`] if `data` is not exactly `width * height * 4`
    /// bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::BadDimensions { width, height });
        }
        let expected = image_len(width, height, 4).ok_or(Error::BadDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows: data.chunks_exact(width as usize * 4),
            offsets: order.offsets(),
        })
    }
}

impl Iterator for Packed32Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let src = self.rows.next()?;
        let [r, g, b, a] = self.offsets;
        let mut row = Vec::with_capacity(src.len());
        for px in src.chunks_exact(4) {
            row.extend_from_slice(&[px[r], px[g], px[b], px[a]]);
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Row iterator over an 8-bit alpha-only image.
///
/// Colour channels are opaque white; the source byte becomes alpha.
pub struct Alpha8Rows<'a> {
    rows: ChunksExact<'a, u8>,
}

impl<'a> Alpha8Rows<'a> {
    /// Validate `data` against `width × height` and prepare the iterator.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::BadDimensions { width, height });
        }
        let expected = image_len(width, height, 1).ok_or(Error::BadDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows: data.chunks_exact(width as usize),
        })
    }
}

impl Iterator for Alpha8Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let src = self.rows.next()?;
        let mut row = vec![0xFF; src.len() * 4];
        for (px, &alpha) in row.chunks_exact_mut(4).zip(src) {
            px[3] = alpha;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

/// Decode 32-bit B,G,R,A pixels (A,R,G,B when `needs_swap`).
pub fn decode_bgra(data: &[u8], width: u32, height: u32, needs_swap: bool) -> Result<Rows<'_>> {
    let order = if needs_swap {
        ChannelOrder::Argb
    } else {
        ChannelOrder::Bgra
    };
    Ok(Box::new(Packed32Rows::new(data, width, height, order)?))
}

/// Decode 32-bit R,G,B,A pixels (A,B,G,R when `needs_swap`).
pub fn decode_rgba(data: &[u8], width: u32, height: u32, needs_swap: bool) -> Result<Rows<'_>> {
    let order = if needs_swap {
        ChannelOrder::Abgr
    } else {
        ChannelOrder::Rgba
    };
    Ok(Box::new(Packed32Rows::new(data, width, height, order)?))
}

/// Decode 8-bit alpha. Byte order is irrelevant, so `needs_swap` is ignored.
pub fn decode_alpha8(data: &[u8], width: u32, height: u32, _needs_swap: bool) -> Result<Rows<'_>> {
    Ok(Box::new(Alpha8Rows::new(data, width, height)?))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn collect(rows: Rows<'_>) -> Vec<u8> {
        rows.flatten().collect()
    }

    #[test]
    fn bgra_to_rgba() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let out = collect(decode_bgra(&data, 2, 1, false).unwrap());
        assert_eq!(out, [3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn swapped_bgra_is_argb() {
        let data = [0xA0, 0x10, 0x20, 0x30];
        let out = collect(decode_bgra(&data, 1, 1, true).unwrap());
        assert_eq!(out, [0x10, 0x20, 0x30, 0xA0]);
    }

    #[test]
    fn swapped_rgba_is_abgr() {
        let data = [0xA0, 0x30, 0x20, 0x10];
        let out = collect(decode_rgba(&data, 1, 1, true).unwrap());
        assert_eq!(out, [0x10, 0x20, 0x30, 0xA0]);
    }

    #[test]
    fn rgba_passthrough_yields_one_row_per_scanline() {
        let data: Vec<u8> = (0..24).collect();
        let rows: Vec<Row> = decode_rgba(&data, 2, 3, false).unwrap().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], (8..16).collect::<Vec<u8>>());
    }

    #[test]
    fn alpha8_expands_to_white() {
        let out = collect(decode_alpha8(&[0x00, 0x80], 2, 1, false).unwrap());
        assert_eq!(out, [0xFF, 0xFF, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0x80]);
    }

    #[test]
    fn alpha8_size_mismatch() {
        let err = decode_alpha8(&[0; 3], 2, 2, false).err().unwrap();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            decode_rgba(&[], 0, 4, false).err().unwrap(),
            Error::BadDimensions { .. }
        ));
    }

    proptest! {
        #[test]
        fn bgra_lands_channels_at_canonical_offsets(
            w in 1u32..8,
            h in 1u32..8,
            swap in any::<bool>(),
            seed in any::<u8>()
        ) {
            let len = (w * h * 4) as usize;
            let data: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
            let first = collect(decode_bgra(&data, w, h, swap).unwrap());
            let again = collect(decode_bgra(&data, w, h, swap).unwrap());
            prop_assert_eq!(&first, &again);
            for (src, dst) in data.chunks_exact(4).zip(first.chunks_exact(4)) {
                let expect = if swap {
                    [src[1], src[2], src[3], src[0]]
                } else {
                    [src[2], src[1], src[0], src[3]]
                };
                prop_assert_eq!(dst, &expect[..]);
            }
        }

        #[test]
        fn rgba_rejects_wrong_length(w in 1u32..16, h in 1u32..16, delta in 1usize..8, longer in any::<bool>()) {
            let exact = (w * h * 4) as usize;
            let len = if longer { exact + delta } else { exact.saturating_sub(delta) };
            let data = vec![0u8; len];
            let is_size_mismatch = matches!(
                decode_rgba(&data, w, h, false),
                Err(Error::SizeMismatch { .. })
            );
            prop_assert!(is_size_mismatch);
        }
    }
}
