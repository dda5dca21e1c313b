//! DXT1 / DXT3 / DXT5 block decompression.
//!
//! Images are stored as 4×4 tiles in row-major tile order. Each tile is a
//! fixed-size record:
//!
//! ```text
//! DXT1 (8 bytes):   [0x00] color0 (565)  [0x02] color1 (565)  [0x04] indices (u32, 2 bits/px)
//! DXT3 (16 bytes):  [0x00] explicit alpha (u64, 4 bits/px)    [0x08] DXT1-style colour block
//! DXT5 (16 bytes):  [0x00] alpha0 (u8)  [0x01] alpha1 (u8)  [0x02] indices (48 bits, 3 bits/px)
//!                   [0x08] DXT1-style colour block
//! ```
//!
//! All fields are read as 16-bit words; for big-endian (Xbox 360) payloads
//! every word is byte-swapped before the fields are extracted. Index fields
//! are consumed least-significant bits first, pixel by pixel, row-major
//! within the tile.

use std::slice::ChunksExact;

use super::{Row, Rows};
use crate::utils::end_u16_at;
use crate::{Error, Result};

/// Which block-compression variant a payload uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxtFormat {
    /// Colour only, with optional 1-bit transparency.
    Dxt1,
    /// Colour plus explicit 4-bit alpha.
    Dxt3,
    /// Colour plus interpolated 8-bit alpha.
    Dxt5,
}

impl DxtFormat {
    /// Size of one 4×4 tile in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            DxtFormat::Dxt1 => 8,
            DxtFormat::Dxt3 | DxtFormat::Dxt5 => 16,
        }
    }
}

/// Row iterator over a DXT payload.
///
/// Decodes one row of tiles at a time into four scanline buffers and hands
/// those out in order before touching the next tile row.
pub struct DxtRows<'a> {
    format: DxtFormat,
    tile_rows: ChunksExact<'a, u8>,
    width: usize,
    big_endian: bool,
    pending: std::vec::IntoIter<Row>,
}

impl<'a> DxtRows<'a> {
    /// Validate the payload and prepare the iterator.
    ///
    /// Fails with [`Error::BadDimensions`] unless both dimensions are
    /// non-zero multiples of four, and with [`Error::SizeMismatch`] unless
    /// `data` holds exactly one block per tile.
    pub fn new(
        format: DxtFormat,
        data: &'a [u8],
        width: u32,
        height: u32,
        big_endian: bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 || (width | height) & 3 != 0 {
            return Err(Error::BadDimensions { width, height });
        }
        let stride = (width as usize >> 2) * format.block_size();
        let expected = stride
            .checked_mul(height as usize >> 2)
            .ok_or(Error::BadDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            format,
            tile_rows: data.chunks_exact(stride),
            width: width as usize,
            big_endian,
            pending: Vec::new().into_iter(),
        })
    }

    fn decode_tile_row(&self, tiles: &[u8]) -> [Row; 4] {
        let mut rows: [Row; 4] = std::array::from_fn(|_| vec![0; self.width * 4]);
        for (tile_x, block) in tiles.chunks_exact(self.format.block_size()).enumerate() {
            let x = tile_x * 16;
            match self.format {
                DxtFormat::Dxt1 => decode_color_block(block, x, &mut rows, true, self.big_endian),
                DxtFormat::Dxt3 => {
                    decode_color_block(&block[8..], x, &mut rows, false, self.big_endian);
                    decode_explicit_alpha_block(&block[..8], x, &mut rows, self.big_endian);
                }
                DxtFormat::Dxt5 => {
                    decode_color_block(&block[8..], x, &mut rows, false, self.big_endian);
                    decode_interpolated_alpha_block(&block[..8], x, &mut rows, self.big_endian);
                }
            }
        }
        rows
    }
}

impl Iterator for DxtRows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if let Some(row) = self.pending.next() {
            return Some(row);
        }
        let tiles = self.tile_rows.next()?;
        self.pending = Vec::from(self.decode_tile_row(tiles)).into_iter();
        self.pending.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.pending.len() + self.tile_rows.len() * 4;
        (n, Some(n))
    }
}

/// Unpack a 5-6-5 colour to opaque 8-bit channels.
///
/// Each channel is shifted to the top of the byte and its high bits are
/// replicated into the low bits, so full-scale endpoints reach 255.
fn unpack_565(c: u16) -> [u8; 4] {
    let r = (c >> 11 & 0x1F) as u8;
    let g = (c >> 5 & 0x3F) as u8;
    let b = (c & 0x1F) as u8;
    [r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2, 0xFF]
}

/// Build the four-entry colour palette for one block.
///
/// DXT1 blocks with `color0 <= color1` use the three-colour mode whose
/// fourth entry is transparent black.
fn color_palette(color0: u16, color1: u16, dxt1: bool) -> [[u8; 4]; 4] {
    let c0 = unpack_565(color0);
    let c1 = unpack_565(color1);
    let mix = |w0: u16, w1: u16, den: u16| -> [u8; 4] {
        let ch = |i: usize| ((w0 * c0[i] as u16 + w1 * c1[i] as u16) / den) as u8;
        [ch(0), ch(1), ch(2), 0xFF]
    };
    if color0 > color1 || !dxt1 {
        [c0, c1, mix(2, 1, 3), mix(1, 2, 3)]
    } else {
        [c0, c1, mix(1, 1, 2), [0, 0, 0, 0]]
    }
}

/// Decode an 8-byte colour block into the tile at byte column `x`.
fn decode_color_block(block: &[u8], x: usize, rows: &mut [Row; 4], dxt1: bool, big_endian: bool) {
    let color0 = end_u16_at(block, 0, big_endian);
    let color1 = end_u16_at(block, 1, big_endian);
    let mut bits = u32::from(end_u16_at(block, 2, big_endian))
        | u32::from(end_u16_at(block, 3, big_endian)) << 16;
    let palette = color_palette(color0, color1, dxt1);
    for row in rows.iter_mut() {
        for px in row[x..x + 16].chunks_exact_mut(4) {
            px.copy_from_slice(&palette[(bits & 3) as usize]);
            bits >>= 2;
        }
    }
}

/// Four 16-bit words of `block` assembled into one little-endian `u64`.
fn block_bits(block: &[u8], big_endian: bool) -> u64 {
    (0..4).fold(0u64, |acc, word| {
        acc | u64::from(end_u16_at(block, word, big_endian)) << (16 * word)
    })
}

/// Overwrite alpha with the explicit 4-bit values of a DXT3 alpha block.
fn decode_explicit_alpha_block(block: &[u8], x: usize, rows: &mut [Row; 4], big_endian: bool) {
    let mut bits = block_bits(block, big_endian);
    for row in rows.iter_mut() {
        for px in row[x..x + 16].chunks_exact_mut(4) {
            px[3] = (bits & 0xF) as u8 * 17;
            bits >>= 4;
        }
    }
}

/// Build the eight-entry alpha palette for a DXT5 block.
///
/// With `alpha0 > alpha1` six values are interpolated between the
/// endpoints; otherwise four are, and the last two entries are 0 and 255.
fn alpha_palette(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let (a0, a1) = (u16::from(alpha0), u16::from(alpha1));
    let mut palette = [alpha0, alpha1, 0, 0, 0, 0, 0, 0xFF];
    if alpha0 > alpha1 {
        for (i, slot) in palette.iter_mut().enumerate().skip(2) {
            let i = i as u16;
            *slot = (((8 - i) * a0 + (i - 1) * a1) / 7) as u8;
        }
    } else {
        for (i, slot) in palette.iter_mut().enumerate().take(6).skip(2) {
            let i = i as u16;
            *slot = (((6 - i) * a0 + (i - 1) * a1) / 5) as u8;
        }
    }
    palette
}

/// Overwrite alpha with the interpolated values of a DXT5 alpha block.
fn decode_interpolated_alpha_block(block: &[u8], x: usize, rows: &mut [Row; 4], big_endian: bool) {
    let bits = block_bits(block, big_endian);
    let palette = alpha_palette(bits as u8, (bits >> 8) as u8);
    let mut indices = bits >> 16;
    for row in rows.iter_mut() {
        for px in row[x..x + 16].chunks_exact_mut(4) {
            px[3] = palette[(indices & 7) as usize];
            indices >>= 3;
        }
    }
}

fn decode(format: DxtFormat, data: &[u8], width: u32, height: u32, needs_swap: bool) -> Result<Rows<'_>> {
    Ok(Box::new(DxtRows::new(format, data, width, height, needs_swap)?))
}

/// Decode a DXT1 payload.
pub fn decode_dxt1(data: &[u8], width: u32, height: u32, needs_swap: bool) -> Result<Rows<'_>> {
    decode(DxtFormat::Dxt1, data, width, height, needs_swap)
}

/// Decode a DXT3 payload.
pub fn decode_dxt3(data: &[u8], width: u32, height: u32, needs_swap: bool) -> Result<Rows<'_>> {
    decode(DxtFormat::Dxt3, data, width, height, needs_swap)
}

/// Decode a DXT5 payload.
pub fn decode_dxt5(data: &[u8], width: u32, height: u32, needs_swap: bool) -> Result<Rows<'_>> {
    decode(DxtFormat::Dxt5, data, width, height, needs_swap)
}
