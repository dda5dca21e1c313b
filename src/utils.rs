//! Low-level I/O primitives shared by the container and content readers.
//!
//! Each function reads exactly the bytes it promises or returns an error -
//! there is no partial-read ambiguity. A short read surfaces as
//! [`Error::UnexpectedEof`].

use std::io::Read;

use crate::{Error, Result};

/// Read one byte.
#[inline]
pub(crate) fn u8<R: Read>(r: &mut R) -> Result<u8> {
    let [b] = bytesa::<1>(r)?;
    Ok(b)
}

/// Read a little-endian `u16`.
#[inline]
pub(crate) fn le_u16<R: Read>(r: &mut R) -> Result<u16> {
    Ok(u16::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian `i16`.
#[inline]
pub(crate) fn le_i16<R: Read>(r: &mut R) -> Result<i16> {
    Ok(i16::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian `u32`.
#[inline]
pub(crate) fn le_u32<R: Read>(r: &mut R) -> Result<u32> {
    Ok(u32::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian `i32`.
#[inline]
pub(crate) fn le_i32<R: Read>(r: &mut R) -> Result<i32> {
    Ok(i32::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian `u64`.
#[inline]
pub(crate) fn le_u64<R: Read>(r: &mut R) -> Result<u64> {
    Ok(u64::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian `i64`.
#[inline]
pub(crate) fn le_i64<R: Read>(r: &mut R) -> Result<i64> {
    Ok(i64::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian IEEE-754 `f32`.
#[inline]
pub(crate) fn le_f32<R: Read>(r: &mut R) -> Result<f32> {
    Ok(f32::from_le_bytes(bytesa(r)?))
}

/// Read a little-endian IEEE-754 `f64`.
#[inline]
pub(crate) fn le_f64<R: Read>(r: &mut R) -> Result<f64> {
    Ok(f64::from_le_bytes(bytesa(r)?))
}

/// Read a `u16` from `buf` at word index `word`, byte-swapped when
/// `big_endian` is set.
#[inline]
pub(crate) fn end_u16_at(buf: &[u8], word: usize, big_endian: bool) -> u16 {
    let b = [buf[word * 2], buf[word * 2 + 1]];
    if big_endian {
        u16::from_be_bytes(b)
    } else {
        u16::from_le_bytes(b)
    }
}

/// Read exactly `N` bytes into a fixed-size array.
#[inline]
pub(crate) fn bytesa<const N: usize>(r: &mut impl Read) -> Result<[u8; N]> {
    let mut b = [0u8; N];
    r.read_exact(&mut b)?;
    Ok(b)
}

/// Read exactly `len` bytes into a `Vec`.
#[inline]
pub(crate) fn bytesv<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut b = Vec::new();
    r.take(len as u64).read_to_end(&mut b)?;
    if b.len() != len {
        return Err(Error::UnexpectedEof);
    }
    Ok(b)
}

/// Verify that the next `N` bytes in the stream match `expected`.
///
/// Returns [`Error::BadMagic`] on mismatch.
#[inline]
pub(crate) fn magic<R: Read, const N: usize>(r: &mut R, expected: &[u8; N]) -> Result<()> {
    let got = bytesa::<N>(r)?;
    if &got != expected {
        return Err(Error::BadMagic);
    }
    Ok(())
}

/// Read a .NET `BinaryReader` 7-bit encoded integer.
///
/// Seven payload bits per byte, least-significant group first; the high bit
/// marks continuation. At most five bytes are consumed.
pub(crate) fn read_7bit_encoded<R: Read>(r: &mut R) -> Result<u32> {
    let mut value = 0u32;
    for shift in (0..35).step_by(7) {
        let b = u8(r)?;
        value |= u32::from(b & 0x7F) << shift;
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(Error::Parse("7-bit encoded integer too long"))
}

/// Read a single UTF-8 encoded scalar value.
pub(crate) fn read_utf8_char<R: Read>(r: &mut R) -> Result<char> {
    let lead = u8(r)?;
    let len = match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Err(Error::Parse("invalid UTF-8 lead byte")),
    };
    let mut buf = [lead, 0, 0, 0];
    r.read_exact(&mut buf[1..len])?;
    std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or(Error::Parse("invalid UTF-8 character"))
}
