//! Minimal streaming PNG encoder for decoded RGBA scanlines.
//!
//! Output is always 8-bit RGBA (colour type 6), no interlace, filter type 0
//! on every scanline. Rows are consumed one at a time; uncompressed data is
//! buffered up to [`CHUNK_LIMIT`] bytes before it is fed to the zlib stream
//! and whatever compressed output exists is written as an `IDAT` chunk.
//!
//! ## Chunk layout
//! ```text
//! [0x00] Length of data                    (u32 BE)
//! [0x04] Tag                               (4 ASCII bytes)
//! [0x08] Data                              (Length bytes)
//! [....] CRC-32 over tag and data          (u32 BE)
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crc32fast::Hasher;
use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::pixels::{Row, image_len};
use crate::{Error, Result};

/// The eight-byte PNG file signature.
pub const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Uncompressed bytes buffered before a flush into an `IDAT` chunk.
pub const CHUNK_LIMIT: usize = 1 << 20;

const COLOR_TYPE_RGBA: u8 = 6;
const BIT_DEPTH: u8 = 8;

/// How the alpha channel of incoming rows is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaMode {
    /// Write pixels unchanged.
    #[default]
    Keep,
    /// Overwrite alpha with 255.
    ForceOpaque,
    /// Overwrite R, G and B with 255, leaving only the alpha mask visible.
    AlphaOnly,
}

impl AlphaMode {
    fn apply(self, row: &mut [u8]) {
        match self {
            AlphaMode::Keep => {}
            AlphaMode::ForceOpaque => row.chunks_exact_mut(4).for_each(|px| px[3] = 0xFF),
            AlphaMode::AlphaOnly => row.chunks_exact_mut(4).for_each(|px| px[..3].fill(0xFF)),
        }
    }
}

/// Encoder for one image of fixed dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PngWriter {
    width: u32,
    height: u32,
}

impl PngWriter {
    /// Fails with [`Error::BadDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || image_len(width, height, 4).is_none() {
            return Err(Error::BadDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per scanline, excluding the filter byte.
    fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Write a complete PNG stream to `out`.
    ///
    /// Every row must be exactly `width * 4` bytes and exactly `height`
    /// rows must arrive; otherwise [`Error::SizeMismatch`] is returned and
    /// `out` holds a truncated image.
    pub fn write_rows<W, I>(&self, out: &mut W, rows: I, alpha: AlphaMode) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = Row>,
    {
        out.write_all(&SIGNATURE)?;

        let mut ihdr = Vec::with_capacity(13);
        ihdr.extend_from_slice(&self.width.to_be_bytes());
        ihdr.extend_from_slice(&self.height.to_be_bytes());
        ihdr.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGBA, 0, 0, 0]);
        write_chunk(out, b"IHDR", &ihdr)?;

        let stride = self.stride();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        let mut pending = Vec::with_capacity((stride + 1).min(CHUNK_LIMIT) * 2);
        let mut count = 0usize;

        for mut row in rows {
            if row.len() != stride {
                return Err(Error::SizeMismatch {
                    expected: stride,
                    actual: row.len(),
                });
            }
            count += 1;
            if count > self.height as usize {
                return Err(Error::SizeMismatch {
                    expected: self.height as usize,
                    actual: count,
                });
            }
            alpha.apply(&mut row);
            pending.push(0);
            pending.extend_from_slice(&row);

            if pending.len() > CHUNK_LIMIT {
                encoder.write_all(&pending)?;
                pending.clear();
                let compressed = std::mem::take(encoder.get_mut());
                if !compressed.is_empty() {
                    write_chunk(out, b"IDAT", &compressed)?;
                }
            }
        }
        if count != self.height as usize {
            return Err(Error::SizeMismatch {
                expected: self.height as usize,
                actual: count,
            });
        }

        encoder.write_all(&pending)?;
        let tail = encoder.finish()?;
        if !tail.is_empty() {
            write_chunk(out, b"IDAT", &tail)?;
        }
        write_chunk(out, b"IEND", &[])
    }
}

/// Write one chunk: length, tag, data, CRC-32 of tag and data.
pub fn write_chunk<W: Write>(out: &mut W, tag: &[u8; 4], data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len()).map_err(|_| Error::InvalidRange)?;
    let mut crc = Hasher::new();
    crc.update(tag);
    crc.update(data);

    out.write_all(&len.to_be_bytes())?;
    out.write_all(tag)?;
    out.write_all(data)?;
    out.write_all(&crc.finalize().to_be_bytes())?;
    Ok(())
}

/// Encode `rows` into a new PNG file at `path`.
pub fn write_png<P, I>(path: P, width: u32, height: u32, rows: I, alpha: AlphaMode) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Row>,
{
    let writer = PngWriter::new(width, height)?;
    let mut out = BufWriter::new(File::create(path)?);
    writer.write_rows(&mut out, rows, alpha)?;
    out.flush()?;
    Ok(())
}
