//! Index buffers and compiled effects.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{create_parent, sibling};
use crate::{Error, Result};

/// Raw index data, 16 or 32 bits per index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    pub sixteen_bit: bool,
    pub data: Vec<u8>,
}

impl IndexBuffer {
    /// Bytes per index.
    pub fn index_size(&self) -> usize {
        if self.sixteen_bit { 2 } else { 4 }
    }

    /// All indices widened to `u32`.
    pub fn indices(&self) -> Result<Vec<u32>> {
        let size = self.index_size();
        if self.data.len() % size != 0 {
            return Err(Error::SizeMismatch {
                expected: self.data.len() / size * size,
                actual: self.data.len(),
            });
        }
        let chunks = self.data.chunks_exact(size);
        Ok(if self.sixteen_bit {
            chunks.map(|c| u16::from_le_bytes([c[0], c[1]]) as u32).collect()
        } else {
            chunks.map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect()
        })
    }
}

impl fmt::Display for IndexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndexBuffer t:{} s:{}",
            self.index_size() * 8,
            self.data.len()
        )
    }
}

/// Compiled effect bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub bytecode: Vec<u8>,
}

impl Effect {
    /// Write the bytecode unchanged to `<path>.fxo`.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let out = sibling(path.as_ref(), ".fxo");
        create_parent(&out)?;
        debug!("export: {} ({} bytes)", out.display(), self.bytecode.len());
        fs::write(&out, &self.bytecode)?;
        Ok(out)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Effect s:{}", self.bytecode.len())
    }
}
