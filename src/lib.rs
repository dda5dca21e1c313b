//! **xnbkit** - a library for reading XNA compiled content (`.xnb`) and
//! exporting the assets inside it.
//!
//! A container names the type readers its object graph needs; a
//! [`readers::TypeReaderRegistry`] resolves those names (generic ones
//! included) to decoding routines, and the graph is read into
//! [`value::Value`]s. Textures keep their raw payloads until export, where a
//! [`pixels`] codec turns them into RGBA rows and [`png`] writes the file.
//!
//! ```no_run
//! use xnbkit::formats::xnb::XnbFile;
//! use xnbkit::readers::TypeReaderRegistry;
//! use xnbkit::value::Value;
//!
//! # fn main() -> xnbkit::Result<()> {
//! let registry = TypeReaderRegistry::standard()?;
//! let data = std::fs::read("Content/wall.xnb")?;
//! let xnb = XnbFile::parse(&data, &registry)?;
//! if let Value::Texture2D(texture) = &xnb.primary {
//!     texture.export("out/wall")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//! | Module | Contents |
//! |--------|----------|
//! | [`formats::xnb`] | Container header, envelope and object graph |
//! | [`content`]      | Primitive stream reads and the object protocol |
//! | [`readers`]      | Type-name parsing, registry and standard readers |
//! | [`value`]        | Dynamic decoded values |
//! | [`surface`]      | Surface-format tables per container version |
//! | [`pixels`]       | Packed and DXT pixel codecs |
//! | [`graphics`]     | Texture, buffer, effect and font assets |
//! | [`png`]          | Streaming PNG encoder |

pub mod compression;
pub mod content;
pub mod error;
pub mod formats;
pub mod graphics;
pub mod pixels;
pub mod png;
pub mod readers;
pub mod surface;
pub(crate) mod utils;
pub mod value;

pub use error::{Error, Result};
