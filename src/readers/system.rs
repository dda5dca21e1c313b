//! `System.*` readers: generic wrappers and collections plus the fixed-layout
//! value types.
//!
//! Wrappers (Enum, Nullable, Reflective) hand the read to argument 0.
//! Collections read an `i32` element count, then that many elements through
//! the value-or-object protocol.

use super::{ReaderDescriptor, ResolvedReader};
use crate::content::ContentReader;
use crate::value::{Dictionary, Value};
use crate::{Error, Result};

pub const READERS: &[ReaderDescriptor] = &[
    ReaderDescriptor::generic(
        "System.Enum`1",
        "Microsoft.Xna.Framework.Content.EnumReader`1",
        1,
        true,
        read_delegate,
    ),
    ReaderDescriptor::generic(
        "System.Nullable`1",
        "Microsoft.Xna.Framework.Content.NullableReader`1",
        1,
        true,
        read_nullable,
    ),
    ReaderDescriptor::generic(
        "System.Array`1",
        "Microsoft.Xna.Framework.Content.ArrayReader`1",
        1,
        false,
        read_list,
    ),
    ReaderDescriptor::generic(
        "System.Collections.Generic.List`1",
        "Microsoft.Xna.Framework.Content.ListReader`1",
        1,
        false,
        read_list,
    ),
    ReaderDescriptor::generic(
        "System.Collections.Generic.Dictionary`2",
        "Microsoft.Xna.Framework.Content.DictionaryReader`2",
        2,
        false,
        read_dictionary,
    ),
    ReaderDescriptor::generic(
        "Reflective",
        "Microsoft.Xna.Framework.Content.ReflectiveReader`1",
        1,
        false,
        read_delegate,
    ),
    ReaderDescriptor::simple(
        "System.TimeSpan",
        "Microsoft.Xna.Framework.Content.TimeSpanReader",
        true,
        read_time_span,
    ),
    ReaderDescriptor::simple(
        "System.DateTime",
        "Microsoft.Xna.Framework.Content.DateTimeReader",
        true,
        read_date_time,
    ),
    ReaderDescriptor::simple(
        "System.Decimal",
        "Microsoft.Xna.Framework.Content.DecimalReader",
        true,
        read_decimal,
    ),
    ReaderDescriptor::simple(
        "ExternalReference",
        "Microsoft.Xna.Framework.Content.ExternalReferenceReader",
        true,
        read_external_reference,
    ),
];

/// Argument reader at `index`; resolution guarantees the arity, so a miss
/// means a descriptor was registered with the wrong arity.
fn arg(args: &[ResolvedReader], index: usize) -> Result<&ResolvedReader> {
    args.get(index)
        .ok_or(Error::Parse("generic reader is missing a type argument"))
}

fn read_delegate(stream: &mut ContentReader<'_>, args: &[ResolvedReader]) -> Result<Value> {
    arg(args, 0)?.read(stream)
}

fn read_nullable(stream: &mut ContentReader<'_>, args: &[ResolvedReader]) -> Result<Value> {
    if stream.read_boolean()? {
        arg(args, 0)?.read(stream)
    } else {
        Ok(Value::Null)
    }
}

fn read_count(stream: &mut ContentReader<'_>) -> Result<usize> {
    usize::try_from(stream.read_int32()?).map_err(|_| Error::InvalidRange)
}

fn read_list(stream: &mut ContentReader<'_>, args: &[ResolvedReader]) -> Result<Value> {
    let element = arg(args, 0)?;
    let count = read_count(stream)?;
    let mut values = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        values.push(stream.read_value_or_object(element)?);
    }
    Ok(Value::List(values))
}

fn read_dictionary(stream: &mut ContentReader<'_>, args: &[ResolvedReader]) -> Result<Value> {
    let (key_reader, value_reader) = (arg(args, 0)?, arg(args, 1)?);
    let count = read_count(stream)?;
    let mut values = Dictionary::new();
    for _ in 0..count {
        let key = stream.read_value_or_object(key_reader)?;
        let value = stream.read_value_or_object(value_reader)?;
        values.insert(key, value);
    }
    Ok(Value::Dictionary(values))
}

fn read_time_span(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::TimeSpan(stream.read_int64()?))
}

fn read_date_time(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::DateTime(stream.read_int64()?))
}

fn read_external_reference(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::ExternalReference(stream.read_external_reference()?))
}

fn read_decimal(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Decimal([
        stream.read_int32()?,
        stream.read_int32()?,
        stream.read_int32()?,
        stream.read_int32()?,
    ]))
}
