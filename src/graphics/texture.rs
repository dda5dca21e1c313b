//! Texture assets: 2D, volume and cube textures.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use super::{create_parent, sibling};
use crate::pixels::Rows;
use crate::png::{AlphaMode, write_png};
use crate::surface::SurfaceFormat;
use crate::{Error, Result};

/// Cube face suffixes, in storage order.
pub const CUBE_FACES: [&str; 6] = ["+x", "-x", "+y", "-y", "+z", "-z"];

/// Dimension of mip `level` for a base dimension.
fn mip_dim(base: u32, level: usize) -> u32 {
    u32::try_from(level)
        .ok()
        .and_then(|l| base.checked_shr(l))
        .unwrap_or(0)
        .max(1)
}

/// Decode `data` and write it to `path`, or report that the format has no
/// codec.
fn export_surface(
    format: SurfaceFormat,
    data: &[u8],
    width: u32,
    height: u32,
    big_endian: bool,
    path: PathBuf,
) -> Result<Option<PathBuf>> {
    let Some(rows) = format.decode(data, width, height, big_endian)? else {
        debug!("export: skipping {}, no codec for {format}", path.display());
        return Ok(None);
    };
    create_parent(&path)?;
    debug!("export: {} ({format} {width}x{height})", path.display());
    write_png(&path, width, height, rows, AlphaMode::Keep)?;
    Ok(Some(path))
}

/// A two-dimensional texture with its mip chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture2D {
    pub format: SurfaceFormat,
    pub width: u32,
    pub height: u32,
    /// Raw payload per mip level, largest first.
    pub mip_levels: Vec<Vec<u8>>,
    /// Payloads are stored big-endian (Xbox 360 content).
    pub big_endian: bool,
}

impl Texture2D {
    /// Width and height of mip `level`.
    pub fn mip_size(&self, level: usize) -> (u32, u32) {
        (mip_dim(self.width, level), mip_dim(self.height, level))
    }

    /// Decoded rows of mip `level`, or `None` if the format has no codec.
    pub fn rows(&self, level: usize) -> Result<Option<Rows<'_>>> {
        let data = self.mip_levels.get(level).ok_or(Error::InvalidRange)?;
        let (width, height) = self.mip_size(level);
        self.format.decode(data, width, height, self.big_endian)
    }

    /// Write mip 0 to `<path>.png`.
    ///
    /// Returns the file written, or `None` if the format has no codec.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Option<PathBuf>> {
        let data = self.mip_levels.first().ok_or(Error::InvalidRange)?;
        export_surface(
            self.format,
            data,
            self.width,
            self.height,
            self.big_endian,
            sibling(path.as_ref(), ".png"),
        )
    }
}

impl fmt::Display for Texture2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Texture2D f:{} d:{}x{} m:{} s:{}",
            self.format,
            self.width,
            self.height,
            self.mip_levels.len(),
            self.mip_levels.first().map_or(0, Vec::len)
        )
    }
}

/// A volume texture. Mip 0 holds `depth` equally sized slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture3D {
    pub format: SurfaceFormat,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mip_levels: Vec<Vec<u8>>,
    pub big_endian: bool,
}

impl Texture3D {
    /// Raw payload of each depth slice of mip 0.
    pub fn slices(&self) -> Result<std::slice::ChunksExact<'_, u8>> {
        let data = self.mip_levels.first().ok_or(Error::InvalidRange)?;
        let depth = self.depth as usize;
        if depth == 0 {
            return Err(Error::Parse("volume texture has no slices"));
        }
        let slice = data.len().div_ceil(depth).max(1);
        if slice * depth != data.len() {
            return Err(Error::SizeMismatch {
                expected: slice * depth,
                actual: data.len(),
            });
        }
        Ok(data.chunks_exact(slice))
    }

    /// Write each slice of mip 0 to `<path>_<z>.png`.
    ///
    /// Returns the files written; empty if the format has no codec.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        if !self.format.is_decodable() {
            debug!("export: skipping volume texture, no codec for {}", self.format);
            return Ok(Vec::new());
        }
        let path = path.as_ref();
        let mut written = Vec::with_capacity(self.depth as usize);
        for (z, slice) in self.slices()?.enumerate() {
            let out = sibling(path, &format!("_{z}.png"));
            written.extend(export_surface(
                self.format,
                slice,
                self.width,
                self.height,
                self.big_endian,
                out,
            )?);
        }
        Ok(written)
    }
}

impl fmt::Display for Texture3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Texture3D f:{} d:{}x{}x{} m:{} s:{}",
            self.format,
            self.width,
            self.height,
            self.depth,
            self.mip_levels.len(),
            self.mip_levels.first().map_or(0, Vec::len)
        )
    }
}

/// A cube map: six square faces, each with its own mip chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCube {
    pub format: SurfaceFormat,
    /// Edge length of each face at mip 0.
    pub size: u32,
    /// Mip chains ordered as [`CUBE_FACES`].
    pub faces: [Vec<Vec<u8>>; 6],
    pub big_endian: bool,
}

impl TextureCube {
    /// Write mip 0 of each face to `<path>_<face>.png`.
    ///
    /// Returns the files written; empty if the format has no codec.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        let mut written = Vec::with_capacity(CUBE_FACES.len());
        for (face, mips) in CUBE_FACES.iter().zip(&self.faces) {
            let data = mips.first().ok_or(Error::InvalidRange)?;
            let out = sibling(path, &format!("_{face}.png"));
            match export_surface(self.format, data, self.size, self.size, self.big_endian, out)? {
                Some(file) => written.push(file),
                None => break,
            }
        }
        Ok(written)
    }
}

impl fmt::Display for TextureCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = &self.faces[0];
        write!(
            f,
            "TextureCube f:{} d:{} m:{} s:{}",
            self.format,
            self.size,
            first.len(),
            first.first().map_or(0, Vec::len)
        )
    }
}
