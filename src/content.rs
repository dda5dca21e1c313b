//! Content stream reader: the primitive reads and object protocol that type
//! readers are written against.
//!
//! All primitives are little-endian regardless of target platform; only raw
//! texture payloads keep the platform's byte order.

use std::io::Cursor;
use std::rc::Rc;

use crate::formats::xnb::{Platform, XnbVersion};
use crate::readers::{ResolvedReader, TypeReaderRegistry};
use crate::utils::{
    bytesv, le_f32, le_f64, le_i16, le_i32, le_i64, le_u16, le_u32, le_u64, read_7bit_encoded,
    read_utf8_char, u8,
};
use crate::value::Value;
use crate::{Error, Result};

/// Deepest chain of nested [`ContentReader::read_object`] calls accepted.
pub const MAX_OBJECT_DEPTH: usize = 64;

/// Cursor over a decompressed container body.
pub struct ContentReader<'a> {
    cursor: Cursor<&'a [u8]>,
    version: XnbVersion,
    platform: Platform,
    manifest: Rc<[ResolvedReader]>,
    depth: usize,
}

impl<'a> ContentReader<'a> {
    /// Wrap a body. The reader manifest starts empty; see
    /// [`ContentReader::read_manifest`].
    pub fn new(body: &'a [u8], version: XnbVersion, platform: Platform) -> Self {
        Self {
            cursor: Cursor::new(body),
            version,
            platform,
            manifest: Rc::from(Vec::new()),
            depth: 0,
        }
    }

    /// Container version this body belongs to.
    pub fn version(&self) -> XnbVersion {
        self.version
    }

    /// Target platform of the container.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether raw texture payloads need byte swapping.
    pub fn needs_swap(&self) -> bool {
        self.platform.is_big_endian()
    }

    /// Current byte offset into the body.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Read the type-reader list and resolve every entry through `registry`.
    ///
    /// Returns the names and versions as listed. Resolution failures abort
    /// with the registry's error.
    pub fn read_manifest(&mut self, registry: &TypeReaderRegistry) -> Result<Vec<(String, i32)>> {
        let count = self.read_7bit_encoded_int()? as usize;
        let mut names = Vec::with_capacity(count.min(256));
        let mut resolved = Vec::with_capacity(count.min(256));
        for _ in 0..count {
            let name = self.read_string()?;
            let version = self.read_int32()?;
            resolved.push(registry.resolve(&name)?);
            names.push((name, version));
        }
        self.set_manifest(resolved);
        Ok(names)
    }

    /// Install an already-resolved reader list.
    pub fn set_manifest(&mut self, readers: Vec<ResolvedReader>) {
        self.manifest = Rc::from(readers);
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        u8(&mut self.cursor)
    }

    pub fn read_sbyte(&mut self) -> Result<i8> {
        Ok(self.read_byte()? as i8)
    }

    /// One byte; any non-zero value is `true`.
    pub fn read_boolean(&mut self) -> Result<bool> {
        Ok(self.read_byte()? != 0)
    }

    pub fn read_int16(&mut self) -> Result<i16> {
        le_i16(&mut self.cursor)
    }

    pub fn read_uint16(&mut self) -> Result<u16> {
        le_u16(&mut self.cursor)
    }

    pub fn read_int32(&mut self) -> Result<i32> {
        le_i32(&mut self.cursor)
    }

    pub fn read_uint32(&mut self) -> Result<u32> {
        le_u32(&mut self.cursor)
    }

    pub fn read_int64(&mut self) -> Result<i64> {
        le_i64(&mut self.cursor)
    }

    pub fn read_uint64(&mut self) -> Result<u64> {
        le_u64(&mut self.cursor)
    }

    pub fn read_single(&mut self) -> Result<f32> {
        le_f32(&mut self.cursor)
    }

    pub fn read_double(&mut self) -> Result<f64> {
        le_f64(&mut self.cursor)
    }

    pub fn read_7bit_encoded_int(&mut self) -> Result<u32> {
        read_7bit_encoded(&mut self.cursor)
    }

    /// A single UTF-8 encoded character.
    pub fn read_char(&mut self) -> Result<char> {
        read_utf8_char(&mut self.cursor)
    }

    /// A 7-bit length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_7bit_encoded_int()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| Error::Parse("invalid UTF-8 string"))
    }

    /// Exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        bytesv(&mut self.cursor, len)
    }

    /// A `u32` length followed by that many raw bytes.
    pub fn read_sized_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_uint32()? as usize;
        self.read_bytes(len)
    }

    /// A reference to an asset stored in another container.
    pub fn read_external_reference(&mut self) -> Result<String> {
        self.read_string()
    }

    /// Read an object preceded by its reader index.
    ///
    /// Index 0 is a null reference; otherwise the 1-based manifest entry
    /// reads the value. Objects nested more than [`MAX_OBJECT_DEPTH`] deep
    /// are a parse error.
    pub fn read_object(&mut self) -> Result<Value> {
        let index = self.read_7bit_encoded_int()? as usize;
        if index == 0 {
            return Ok(Value::Null);
        }
        let manifest = Rc::clone(&self.manifest);
        let reader = manifest.get(index - 1).ok_or(Error::InvalidRange)?;
        if self.depth >= MAX_OBJECT_DEPTH {
            return Err(Error::Parse("object graph nested too deeply"));
        }
        self.depth += 1;
        let value = reader.read(self);
        self.depth -= 1;
        value
    }

    /// Read one element with `reader`.
    ///
    /// Value-type readers consume their data inline; everything else is an
    /// object reference read through [`ContentReader::read_object`].
    pub fn read_value_or_object(&mut self, reader: &ResolvedReader) -> Result<Value> {
        if reader.is_value_type() {
            reader.read(self)
        } else {
            self.read_object()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(body: &[u8]) -> ContentReader<'_> {
        ContentReader::new(body, XnbVersion::V40, Platform::Windows)
    }

    #[test]
    fn primitives_are_little_endian() {
        let body = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x80, 0x3F];
        let mut r = reader(&body);
        assert!(r.read_boolean().unwrap());
        assert_eq!(r.read_uint16().unwrap(), 0x1234);
        assert_eq!(r.read_int32().unwrap(), 0x1234_5678);
        assert_eq!(r.read_single().unwrap(), 1.0);
        assert!(matches!(r.read_byte(), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn strings_are_length_prefixed() {
        let mut r = reader(b"\x05hello\x02");
        assert_eq!(r.read_string().unwrap(), "hello");
        assert!(matches!(r.read_string(), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn null_object_and_bad_index() {
        let mut r = reader(&[0x00, 0x03]);
        assert_eq!(r.read_object().unwrap(), Value::Null);
        assert!(matches!(r.read_object(), Err(Error::InvalidRange)));
    }

    #[test]
    fn objects_dispatch_through_manifest() {
        let registry = TypeReaderRegistry::standard().unwrap();
        let name = b"Microsoft.Xna.Framework.Content.Int32Reader";
        let mut body = vec![0x01, name.len() as u8];
        body.extend_from_slice(name);
        body.extend_from_slice(&0i32.to_le_bytes());
        body.push(0x01);
        body.extend_from_slice(&7i32.to_le_bytes());
        let mut r = reader(&body);
        let names = r.read_manifest(&registry).unwrap();
        assert_eq!(names[0].0, "Microsoft.Xna.Framework.Content.Int32Reader");
        assert_eq!(r.read_object().unwrap(), Value::Int32(7));
    }

    fn self_referencing_list(levels: usize) -> Vec<u8> {
        let name = b"Microsoft.Xna.Framework.Content.ListReader`1[[System.String]]";
        let mut body = vec![0x01, name.len() as u8];
        body.extend_from_slice(name);
        body.extend_from_slice(&0i32.to_le_bytes());
        body.push(0x01);
        for _ in 0..levels {
            body.extend_from_slice(&1i32.to_le_bytes());
            body.push(0x01);
        }
        body.extend_from_slice(&0i32.to_le_bytes());
        body
    }

    #[test]
    fn nesting_within_the_limit_is_read() {
        let registry = TypeReaderRegistry::standard().unwrap();
        let body = self_referencing_list(MAX_OBJECT_DEPTH - 1);
        let mut r = reader(&body);
        r.read_manifest(&registry).unwrap();
        let mut value = r.read_object().unwrap();
        let mut levels = 1;
        while let Value::List(mut items) = value {
            match items.pop() {
                Some(inner) => {
                    value = inner;
                    levels += 1;
                }
                None => break,
            }
        }
        assert_eq!(levels, MAX_OBJECT_DEPTH);
    }

    #[test]
    fn self_referencing_objects_fail_cleanly() {
        let registry = TypeReaderRegistry::standard().unwrap();
        let body = self_referencing_list(200_000);
        let mut r = reader(&body);
        r.read_manifest(&registry).unwrap();
        assert!(matches!(r.read_object(), Err(Error::Parse(_))));
    }
}
