//! Body decompression (requires the `compression` feature).
//!
//! The core library depends only on `std`, `log`, `flate2` and `crc32fast`.
//! Enable the feature to read MonoGame containers whose body is LZ4
//! compressed:
//!
//! ```toml
//! [dependencies]
//! xnbkit = { version = "0.1", features = ["compression"] }
//! ```
//!
//! LZX, used by XNA Game Studio itself, is not implemented; such containers
//! fail with [`crate::Error::UnsupportedCompression`].

#[cfg(feature = "compression")]
pub mod lz4;
