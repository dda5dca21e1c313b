//! Recursive-descent parser for .NET-style type names.
//!
//! ```text
//! qualified := type [ ',' assembly-qualifier ]
//! type      := name ( '[' args ']' | '[' ','* ']' )*
//! args      := arg ( ',' arg )*
//! arg       := '[' qualified ']' | type
//! ```
//!
//! `\` escapes the next character inside a name. Assembly qualifiers are
//! dropped. An array suffix `T[]` becomes `System.Array`1[[T]]`. Names
//! nested deeper than [`MAX_NESTING`] levels are rejected.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::{Error, Result};

/// Template name that array suffixes are normalized to.
pub const ARRAY_TEMPLATE: &str = "System.Array`1";

/// Deepest argument tree a parsed name may have, counting array wrappers.
pub const MAX_NESTING: usize = 64;

/// A parsed type name: a base name plus ordered generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    /// Base (template) name, unescaped, without assembly qualification.
    pub name: String,
    /// Generic arguments in declaration order.
    pub args: Vec<TypeName>,
}

impl TypeName {
    /// Parse a possibly assembly-qualified, possibly generic type name.
    pub fn parse(src: &str) -> Result<Self> {
        let mut p = Parser {
            src,
            chars: src.chars().peekable(),
        };
        let (ty, _) = p.qualified(0)?;
        if p.chars.peek().is_some() {
            return Err(p.error());
        }
        Ok(ty)
    }

    /// A name without arguments.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Whether this name carries generic arguments.
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.name.chars() {
            if matches!(c, '[' | ']' | ',' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        if self.is_generic() {
            f.write_str("[")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "[{arg}]")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

struct Parser<'a> {
    src: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn error(&self) -> Error {
        Error::InvalidTypeName(self.src.to_owned())
    }

    fn expect(&mut self, want: char) -> Result<()> {
        match self.chars.next() {
            Some(c) if c == want => Ok(()),
            _ => Err(self.error()),
        }
    }

    fn qualified(&mut self, depth: usize) -> Result<(TypeName, usize)> {
        let parsed = self.type_name(depth)?;
        if self.chars.peek() == Some(&',') {
            self.skip_assembly();
        }
        Ok(parsed)
    }

    /// Consume an assembly qualifier up to the enclosing `]` or the end.
    fn skip_assembly(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == ']' {
                break;
            }
            self.chars.next();
            if c == '\\' {
                self.chars.next();
            }
        }
    }

    fn identifier(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            match c {
                '[' | ']' | ',' => break,
                '\\' => {
                    self.chars.next();
                    name.push(self.chars.next().ok_or_else(|| self.error())?);
                }
                _ => {
                    self.chars.next();
                    name.push(c);
                }
            }
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(self.error());
        }
        Ok(trimmed.to_owned())
    }

    /// One type at argument depth `depth`, with the height of its tree.
    fn type_name(&mut self, depth: usize) -> Result<(TypeName, usize)> {
        if depth >= MAX_NESTING {
            return Err(self.error());
        }
        let mut ty = TypeName::simple(self.identifier()?);
        let mut height = 1;
        while self.chars.peek() == Some(&'[') {
            self.chars.next();
            match self.chars.peek() {
                Some(']') | Some(',') => {
                    while self.chars.peek() == Some(&',') {
                        self.chars.next();
                    }
                    self.expect(']')?;
                    height += 1;
                    ty = TypeName {
                        name: ARRAY_TEMPLATE.to_owned(),
                        args: vec![ty],
                    };
                }
                _ => {
                    if ty.is_generic() {
                        return Err(self.error());
                    }
                    let (args, tallest) = self.args(depth + 1)?;
                    ty.args = args;
                    height = tallest + 1;
                }
            }
            if height > MAX_NESTING {
                return Err(self.error());
            }
        }
        Ok((ty, height))
    }

    /// Argument list after the opening `[`, through the closing `]`.
    fn args(&mut self, depth: usize) -> Result<(Vec<TypeName>, usize)> {
        let mut args = Vec::new();
        let mut tallest = 0;
        loop {
            self.skip_spaces();
            let (arg, height) = if self.chars.peek() == Some(&'[') {
                self.chars.next();
                let arg = self.qualified(depth)?;
                self.expect(']')?;
                arg
            } else {
                self.type_name(depth)?
            };
            args.push(arg);
            tallest = tallest.max(height);
            self.skip_spaces();
            match self.chars.next() {
                Some(',') => continue,
                Some(']') => return Ok((args, tallest)),
                _ => return Err(self.error()),
            }
        }
    }

    fn skip_spaces(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }
}
