//! Decoded graphics assets and their export to standard files.
//!
//! Textures hold raw mip payloads exactly as stored; pixels are decoded
//! lazily through the surface format's codec when rows are requested or an
//! export runs. Formats without a codec export nothing, and the caller sees
//! `None` (or an empty list) rather than an error.
//!
//! | Type | Export |
//! |------|--------|
//! | [`Texture2D`]   | `<path>.png` |
//! | [`Texture3D`]   | `<path>_<z>.png` per depth slice |
//! | [`TextureCube`] | `<path>_<face>.png` per face |
//! | [`Effect`]      | `<path>.fxo` |
//! | [`SpriteFont`]  | `<path>.png` atlas and `<path>.xml` metrics |

pub mod buffer;
pub mod font;
pub mod texture;

pub use buffer::{Effect, IndexBuffer};
pub use font::SpriteFont;
pub use texture::{CUBE_FACES, Texture2D, Texture3D, TextureCube};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// `path` with `suffix` appended to its final component.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Create the directory that will hold `path`, if it has one.
fn create_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
