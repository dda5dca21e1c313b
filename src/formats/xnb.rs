//! XNB - XNA Game Studio compiled content container.
//!
//! One container holds one primary asset plus optional shared resources,
//! serialized as an object graph. The body names the type readers it needs
//! up front; objects then refer to those readers by index.
//!
//! ## Header (little-endian)
//! ```text
//! [0x00] Magic "XNB"                        (3 bytes)
//! [0x03] Target platform                    (u8: 'w' 'x' 'm' 'a' 'i' 'd')
//! [0x04] Format version                     (u8: 3 = 3.0, 4 = 3.1, 5 = 4.0)
//! [0x05] Flags                              (0x01 HiDef, 0x40 LZ4, 0x80 LZX)
//! [0x06] Total file size incl. header       (u32)
//! [0x0A] Decompressed body size             (u32, compressed files only)
//! [....] Body (possibly compressed)
//! ```
//!
//! ## Body
//! ```text
//! 7-bit count N
//!   N × { reader name (string), reader version (i32) }
//! 7-bit shared resource count S
//! object                      primary asset
//! S × object                  shared resources
//! ```
//! An `object` is a 7-bit reader index (0 = null, otherwise 1-based into the
//! reader list) followed by whatever that reader consumes.

use std::fmt;
use std::io::Cursor;

use log::debug;

use crate::content::ContentReader;
use crate::readers::TypeReaderRegistry;
use crate::utils::{le_u32, magic, u8};
use crate::value::Value;
use crate::{Error, Result};

const FLAG_HIDEF: u8 = 0x01;
const FLAG_LZ4: u8 = 0x40;
const FLAG_LZX: u8 = 0x80;

/// Container format version.
///
/// Ordered, so `version >= XnbVersion::V40` selects the 4.0 conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum XnbVersion {
    /// XNA Game Studio 3.0.
    V30 = 3,
    /// XNA Game Studio 3.1.
    V31 = 4,
    /// XNA Game Studio 4.0.
    V40 = 5,
}

impl TryFrom<u8> for XnbVersion {
    type Error = Error;
    fn try_from(v: u8) -> Result<Self> {
        match v {
            3 => Ok(Self::V30),
            4 => Ok(Self::V31),
            5 => Ok(Self::V40),
            _ => Err(Error::UnsupportedVersion(v)),
        }
    }
}

impl fmt::Display for XnbVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            XnbVersion::V30 => "3.0",
            XnbVersion::V31 => "3.1",
            XnbVersion::V40 => "4.0",
        })
    }
}

/// Platform the content was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    /// Big-endian; texture payloads need byte swapping.
    Xbox360,
    WindowsPhone,
    Android,
    Ios,
    DesktopGl,
}

impl TryFrom<u8> for Platform {
    type Error = Error;
    fn try_from(v: u8) -> Result<Self> {
        match v {
            b'w' => Ok(Self::Windows),
            b'x' => Ok(Self::Xbox360),
            b'm' => Ok(Self::WindowsPhone),
            b'a' => Ok(Self::Android),
            b'i' => Ok(Self::Ios),
            b'd' => Ok(Self::DesktopGl),
            _ => Err(Error::Parse("unknown XNB target platform")),
        }
    }
}

impl Platform {
    /// Whether texture payloads are stored big-endian.
    pub fn is_big_endian(self) -> bool {
        self == Platform::Xbox360
    }
}

/// Body compression scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    /// LZ4 block (MonoGame).
    Lz4,
    /// Microsoft LZX (XNA Game Studio).
    Lzx,
}

/// Parsed container header.
#[derive(Debug, Clone)]
pub struct XnbHeader {
    pub platform: Platform,
    pub version: XnbVersion,
    /// HiDef profile flag (4.0 only).
    pub hidef: bool,
    pub compression: Compression,
    /// Total file size declared in the header.
    pub file_size: u32,
    /// Decompressed body size (compressed containers only).
    pub decompressed_size: Option<u32>,
}

impl XnbHeader {
    /// Size of the fixed header, excluding the decompressed-size field.
    pub const SIZE: usize = 10;

    /// Parse the header from the start of a container.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let r = &mut Cursor::new(data);
        magic(r, b"XNB")?;
        let platform = Platform::try_from(u8(r)?)?;
        let version = XnbVersion::try_from(u8(r)?)?;
        let flags = u8(r)?;
        let file_size = le_u32(r)?;

        let compression = if flags & FLAG_LZX != 0 {
            Compression::Lzx
        } else if flags & FLAG_LZ4 != 0 {
            Compression::Lz4
        } else {
            Compression::None
        };
        let decompressed_size = match compression {
            Compression::None => None,
            _ => Some(le_u32(r)?),
        };

        Ok(Self {
            platform,
            version,
            hidef: flags & FLAG_HIDEF != 0,
            compression,
            file_size,
            decompressed_size,
        })
    }

    /// Offset of the body within the container.
    pub fn body_offset(&self) -> usize {
        match self.compression {
            Compression::None => Self::SIZE,
            _ => Self::SIZE + 4,
        }
    }
}

/// A fully decoded container.
#[derive(Debug)]
pub struct XnbFile {
    pub header: XnbHeader,
    /// Reader names and versions as listed in the body.
    pub readers: Vec<(String, i32)>,
    /// The primary asset.
    pub primary: Value,
    /// Shared resources, in stream order.
    pub shared: Vec<Value>,
}

impl XnbFile {
    /// Parse a complete container held in memory.
    ///
    /// Every reader listed in the body must resolve through `registry`
    /// before any object is read.
    pub fn parse(data: &[u8], registry: &TypeReaderRegistry) -> Result<Self> {
        let header = XnbHeader::parse(data)?;
        if header.file_size as usize != data.len() {
            return Err(Error::SizeMismatch {
                expected: header.file_size as usize,
                actual: data.len(),
            });
        }
        debug!(
            "xnb: platform {:?}, v{}, hidef {}, compression {:?}",
            header.platform, header.version, header.hidef, header.compression
        );

        let payload = &data[header.body_offset()..];
        let body = decompress_body(&header, payload)?;

        let mut content = ContentReader::new(&body, header.version, header.platform);
        let readers = content.read_manifest(registry)?;
        debug!("xnb: {} type readers", readers.len());

        let shared_count = content.read_7bit_encoded_int()?;
        let primary = content.read_object()?;
        let shared = (0..shared_count)
            .map(|_| content.read_object())
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "xnb: primary {}, {} shared resources",
            primary.kind(),
            shared.len()
        );

        Ok(Self {
            header,
            readers,
            primary,
            shared,
        })
    }
}

fn decompress_body(header: &XnbHeader, payload: &[u8]) -> Result<Vec<u8>> {
    match header.compression {
        Compression::None => Ok(payload.to_vec()),
        Compression::Lzx => Err(Error::UnsupportedCompression("LZX")),
        #[cfg(feature = "compression")]
        Compression::Lz4 => {
            let size = header.decompressed_size.unwrap_or_default() as usize;
            crate::compression::lz4::decompress_lz4(payload, size)
        }
        #[cfg(not(feature = "compression"))]
        Compression::Lz4 => Err(Error::UnsupportedCompression(
            "LZ4 (enable the `compression` feature)",
        )),
    }
}
