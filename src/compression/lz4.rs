//! LZ4 body decompression (requires the `compression` feature).
//!
//! MonoGame writes the body as a single raw LZ4 block. The decompressed size
//! is not part of the block; it comes from the container header.

#![cfg(feature = "compression")]

use crate::{Error, Result};

/// Decompress one raw LZ4 block into exactly `size` bytes.
///
/// Returns [`Error::Lz4`] if the block is corrupt and
/// [`Error::SizeMismatch`] if it inflates to a different length.
pub fn decompress_lz4(data: &[u8], size: usize) -> Result<Vec<u8>> {
    let out = lz4_flex::block::decompress(data, size).map_err(|_| Error::Lz4)?;
    if out.len() != size {
        return Err(Error::SizeMismatch {
            expected: size,
            actual: out.len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_round_trip() {
        let body: Vec<u8> = b"xnb body ".iter().copied().cycle().take(300).collect();
        let packed = lz4_flex::block::compress(&body);
        assert_eq!(decompress_lz4(&packed, body.len()).unwrap(), body);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decompress_lz4(&[0xFF, 0xFF, 0xFF], 64).is_err());
    }
}
