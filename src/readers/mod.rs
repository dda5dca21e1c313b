//! Type readers: serialized type names to decoding routines.
//!
//! A [`ReaderDescriptor`] binds a routine to either an exact type name
//! (simple) or a generic template such as `System.Collections.Generic.List`1`
//! (generic). The [`TypeReaderRegistry`] is built once from descriptors and
//! then only read. [`TypeReaderRegistry::resolve`] turns a name like
//! `ListReader`1[[System.Int32]]` into a [`ResolvedReader`] tree whose
//! arguments are resolved recursively.
//!
//! Readers follow one idiom: either read primitives straight from the
//! [`ContentReader`], or hand the work to argument readers.
//!
//! ## Submodules
//!
//! | Module | Readers |
//! |--------|---------|
//! | [`system`]    | Enum, Nullable, Array, List, Dictionary, Reflective, TimeSpan, DateTime, Decimal, ExternalReference |
//! | [`primitive`] | Integers, floats, Boolean, Char, String |
//! | [`math`]      | Vector2/3/4, Point, Rectangle, Color |
//! | [`graphics`]  | Texture2D, Texture3D, TextureCube, IndexBuffer, Effect, SpriteFont |

pub mod graphics;
pub mod math;
pub mod primitive;
pub mod registry;
pub mod system;
pub mod type_name;

pub use registry::{RegistryBuilder, TypeReaderRegistry};
pub use type_name::TypeName;

use crate::Result;
use crate::content::ContentReader;
use crate::value::Value;

/// Decoding routine. Receives the stream and the reader's bound arguments.
pub type ReadFn = fn(&mut ContentReader<'_>, &[ResolvedReader]) -> Result<Value>;

/// Whether a descriptor matches an exact name or a generic template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    Simple,
    Generic {
        /// Number of type arguments the template takes.
        arity: usize,
    },
}

/// Static description of one type reader.
///
/// Registered under both its target type name (`System.Int32`) and its
/// reader type name (`Microsoft.Xna.Framework.Content.Int32Reader`); the
/// container may refer to either.
#[derive(Debug, Clone, Copy)]
pub struct ReaderDescriptor {
    /// Name of the type this reader produces.
    pub target: &'static str,
    /// Name of the reader type itself.
    pub reader: &'static str,
    pub kind: ReaderKind,
    /// Value types are read inline; other types are read as object
    /// references through the manifest.
    pub value_type: bool,
    pub read: ReadFn,
}

impl ReaderDescriptor {
    /// Describe a reader for one exact type.
    pub const fn simple(
        target: &'static str,
        reader: &'static str,
        value_type: bool,
        read: ReadFn,
    ) -> Self {
        Self {
            target,
            reader,
            kind: ReaderKind::Simple,
            value_type,
            read,
        }
    }

    /// Describe a reader for a generic template taking `arity` arguments.
    pub const fn generic(
        target: &'static str,
        reader: &'static str,
        arity: usize,
        value_type: bool,
        read: ReadFn,
    ) -> Self {
        Self {
            target,
            reader,
            kind: ReaderKind::Generic { arity },
            value_type,
            read,
        }
    }
}

/// A reader bound to its argument readers.
///
/// Created per resolution, owns nothing but its argument list, and keeps no
/// state between reads.
#[derive(Debug, Clone)]
pub struct ResolvedReader {
    descriptor: ReaderDescriptor,
    args: Vec<ResolvedReader>,
}

impl ResolvedReader {
    pub(crate) fn new(descriptor: ReaderDescriptor, args: Vec<ResolvedReader>) -> Self {
        Self { descriptor, args }
    }

    /// The descriptor this reader was resolved from.
    pub fn descriptor(&self) -> &ReaderDescriptor {
        &self.descriptor
    }

    /// Bound argument readers, in declaration order.
    pub fn args(&self) -> &[ResolvedReader] {
        &self.args
    }

    pub fn is_value_type(&self) -> bool {
        self.descriptor.value_type
    }

    /// Decode one value from `stream`.
    pub fn read(&self, stream: &mut ContentReader<'_>) -> Result<Value> {
        (self.descriptor.read)(stream, &self.args)
    }
}

/// Every reader this crate ships, in registration order.
pub fn standard_readers() -> impl Iterator<Item = &'static ReaderDescriptor> {
    system::READERS
        .iter()
        .chain(primitive::READERS)
        .chain(math::READERS)
        .chain(graphics::READERS)
}
