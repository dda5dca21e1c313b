//! Library-wide error and result types.

use std::fmt;
use std::io;

use crate::formats::xnb::XnbVersion;

/// Result alias used throughout xnbkit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Every variant is a deterministic function of the input; nothing here is
/// worth retrying. Variants carry the offending name or the expected and
/// actual sizes so a failure can be diagnosed without re-running.
#[derive(Debug)]
pub enum Error {
    /// No registered reader matches this type name.
    ///
    /// For a generic whose argument cannot be resolved, this carries the
    /// argument's name rather than the generic's.
    UnknownTypeReader(String),
    /// A reader was registered twice under the same key.
    DuplicateReader(String),
    /// A type name could not be parsed.
    InvalidTypeName(String),
    /// A surface-format code is not part of the table for this version.
    InvalidFormat {
        /// Container version that selected the table.
        version: XnbVersion,
        /// The offending numeric code.
        code: i32,
    },
    /// A payload or row did not have the length its shape requires.
    SizeMismatch {
        /// Length implied by the declared dimensions.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// Image dimensions that a codec or encoder cannot accept.
    BadDimensions {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
    },
    /// A magic/signature field did not match the expected value.
    BadMagic,
    /// A format version is present in the data but not supported by this
    /// parser.
    UnsupportedVersion(u8),
    /// The container body uses a compression scheme this build cannot undo.
    UnsupportedCompression(&'static str),
    /// The stream ended before all expected bytes could be read.
    UnexpectedEof,
    /// An index or count field points outside the valid region.
    InvalidRange,
    /// A structural constraint was violated (message describes which one).
    Parse(&'static str),
    /// An underlying I/O operation failed.
    Io(io::Error),
    /// Writing an XML document failed.
    Xml(quick_xml::Error),
    /// LZ4 decompression failed.
    #[cfg(feature = "compression")]
    Lz4,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTypeReader(name) => write!(f, "no type reader for '{name}'"),
            Error::DuplicateReader(name) => write!(f, "type reader '{name}' registered twice"),
            Error::InvalidTypeName(name) => write!(f, "malformed type name '{name}'"),
            Error::InvalidFormat { version, code } => {
                write!(f, "invalid texture format for v{version}: {code}")
            }
            Error::SizeMismatch { expected, actual } => {
                write!(f, "invalid data size: {actual} != {expected}")
            }
            Error::BadDimensions { width, height } => {
                write!(f, "bad dimensions: {width}x{height}")
            }
            Error::BadMagic => write!(f, "bad magic value"),
            Error::UnsupportedVersion(v) => write!(f, "unsupported version: {v}"),
            Error::UnsupportedCompression(s) => write!(f, "unsupported compression: {s}"),
            Error::UnexpectedEof => write!(f, "unexpected end of file"),
            Error::InvalidRange => write!(f, "invalid index or count"),
            Error::Parse(s) => write!(f, "parse error: {s}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Xml(e) => write!(f, "XML error: {e}"),
            #[cfg(feature = "compression")]
            Error::Lz4 => write!(f, "lz4 decompression failed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(e)
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::Xml(e)
    }
}
