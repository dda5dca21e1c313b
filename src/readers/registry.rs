//! The reader registry and generic resolver.

use std::collections::HashMap;

use super::type_name::TypeName;
use super::{ReaderDescriptor, ReaderKind, ResolvedReader, standard_readers};
use crate::{Error, Result};

/// Collects descriptors and rejects conflicting registrations.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    simple: HashMap<&'static str, ReaderDescriptor>,
    generic: HashMap<&'static str, ReaderDescriptor>,
}

impl RegistryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-loaded with every reader this crate ships.
    pub fn with_standard() -> Result<Self> {
        let mut builder = Self::new();
        for descriptor in standard_readers() {
            builder.register(*descriptor)?;
        }
        Ok(builder)
    }

    /// Add a descriptor under its target and reader names.
    ///
    /// Fails with [`Error::DuplicateReader`] if either name is already taken
    /// in the same (simple or generic) table.
    pub fn register(&mut self, descriptor: ReaderDescriptor) -> Result<&mut Self> {
        let table = match descriptor.kind {
            ReaderKind::Simple => &mut self.simple,
            ReaderKind::Generic { .. } => &mut self.generic,
        };
        let mut keys = vec![descriptor.target];
        if descriptor.reader != descriptor.target {
            keys.push(descriptor.reader);
        }
        if let Some(taken) = keys.iter().find(|k| table.contains_key(*k)) {
            return Err(Error::DuplicateReader((*taken).to_owned()));
        }
        for key in keys {
            table.insert(key, descriptor);
        }
        Ok(self)
    }

    /// Freeze the builder into a read-only registry.
    pub fn build(self) -> TypeReaderRegistry {
        TypeReaderRegistry {
            simple: self.simple,
            generic: self.generic,
        }
    }
}

/// Immutable mapping from type names to reader descriptors.
///
/// Built once, then shared by reference with every resolution.
#[derive(Debug)]
pub struct TypeReaderRegistry {
    simple: HashMap<&'static str, ReaderDescriptor>,
    generic: HashMap<&'static str, ReaderDescriptor>,
}

impl TypeReaderRegistry {
    /// Start a new builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry holding every reader this crate ships.
    pub fn standard() -> Result<Self> {
        Ok(RegistryBuilder::with_standard()?.build())
    }

    /// Number of distinct names known, simple and generic.
    pub fn len(&self) -> usize {
        self.simple.len() + self.generic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a (possibly generic, possibly assembly-qualified) type name.
    ///
    /// An exact simple match wins. Otherwise the name is parsed, each
    /// argument is resolved first, and the template is matched together
    /// with its argument count. An unresolvable argument fails with
    /// [`Error::UnknownTypeReader`] naming that argument.
    pub fn resolve(&self, type_name: &str) -> Result<ResolvedReader> {
        if let Some(descriptor) = self.simple.get(type_name) {
            return Ok(ResolvedReader::new(*descriptor, Vec::new()));
        }
        self.resolve_parsed(&TypeName::parse(type_name)?)
    }

    fn resolve_parsed(&self, name: &TypeName) -> Result<ResolvedReader> {
        if !name.is_generic() {
            if let Some(descriptor) = self.simple.get(name.name.as_str()) {
                return Ok(ResolvedReader::new(*descriptor, Vec::new()));
            }
        }

        let args = name
            .args
            .iter()
            .map(|arg| self.resolve_parsed(arg))
            .collect::<Result<Vec<_>>>()?;

        match self.generic.get(name.name.as_str()) {
            Some(descriptor) if descriptor.kind == (ReaderKind::Generic { arity: args.len() }) => {
                Ok(ResolvedReader::new(*descriptor, args))
            }
            _ => Err(Error::UnknownTypeReader(name.to_string())),
        }
    }
}
