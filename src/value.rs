//! Dynamic values produced by type readers.
//!
//! The container is type-name driven, so the shape of a decoded object is
//! only known at run time. Every reader returns a [`Value`]; graphics
//! readers return the typed assets from [`crate::graphics`].

use crate::graphics::{Effect, IndexBuffer, SpriteFont, Texture2D, Texture3D, TextureCube};

/// A decoded object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A null object reference or an absent nullable.
    Null,
    Bool(bool),
    Byte(u8),
    SByte(i8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    Char(char),
    String(String),
    /// Duration in 100 ns ticks.
    TimeSpan(i64),
    /// Raw `DateTime` bits (ticks plus kind flags).
    DateTime(i64),
    /// The four 32-bit words of a .NET `decimal`.
    Decimal([i32; 4]),
    /// Path of an asset stored in another container.
    ExternalReference(String),
    Vector2([f32; 2]),
    Vector3([f32; 3]),
    Vector4([f32; 4]),
    Point([i32; 2]),
    /// X, Y, width, height.
    Rectangle([i32; 4]),
    /// R, G, B, A.
    Color([u8; 4]),
    /// Array or list elements in stream order.
    List(Vec<Value>),
    Dictionary(Dictionary),
    Texture2D(Box<Texture2D>),
    Texture3D(Box<Texture3D>),
    TextureCube(Box<TextureCube>),
    IndexBuffer(IndexBuffer),
    Effect(Effect),
    SpriteFont(Box<SpriteFont>),
}

impl Value {
    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Byte(_) => "Byte",
            Value::SByte(_) => "SByte",
            Value::Int16(_) => "Int16",
            Value::UInt16(_) => "UInt16",
            Value::Int32(_) => "Int32",
            Value::UInt32(_) => "UInt32",
            Value::Int64(_) => "Int64",
            Value::UInt64(_) => "UInt64",
            Value::Single(_) => "Single",
            Value::Double(_) => "Double",
            Value::Char(_) => "Char",
            Value::String(_) => "String",
            Value::TimeSpan(_) => "TimeSpan",
            Value::DateTime(_) => "DateTime",
            Value::Decimal(_) => "Decimal",
            Value::ExternalReference(_) => "ExternalReference",
            Value::Vector2(_) => "Vector2",
            Value::Vector3(_) => "Vector3",
            Value::Vector4(_) => "Vector4",
            Value::Point(_) => "Point",
            Value::Rectangle(_) => "Rectangle",
            Value::Color(_) => "Color",
            Value::List(_) => "List",
            Value::Dictionary(_) => "Dictionary",
            Value::Texture2D(_) => "Texture2D",
            Value::Texture3D(_) => "Texture3D",
            Value::TextureCube(_) => "TextureCube",
            Value::IndexBuffer(_) => "IndexBuffer",
            Value::Effect(_) => "Effect",
            Value::SpriteFont(_) => "SpriteFont",
        }
    }
}

/// Insertion-ordered key/value pairs.
///
/// Keys are compared with `PartialEq`. Inserting an existing key replaces
/// its value in place, so the entry keeps its original position and the
/// last write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(Value, Value)>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Look up the value stored for `key`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_in_original_position() {
        let mut d = Dictionary::new();
        d.insert(Value::Int32(1), Value::String("a".into()));
        d.insert(Value::Int32(2), Value::String("b".into()));
        let old = d.insert(Value::Int32(1), Value::String("c".into()));
        assert_eq!(old, Some(Value::String("a".into())));
        assert_eq!(d.len(), 2);
        let keys: Vec<_> = d.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, [Value::Int32(1), Value::Int32(2)]);
        assert_eq!(d.get(&Value::Int32(1)), Some(&Value::String("c".into())));
    }
}
