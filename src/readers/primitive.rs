//! Readers for the .NET primitive types.

use super::{ReaderDescriptor, ResolvedReader};
use crate::Result;
use crate::content::ContentReader;
use crate::value::Value;

macro_rules! primitive_reader {
    ($fn_name:ident, $method:ident, $variant:ident) => {
        fn $fn_name(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
            Ok(Value::$variant(stream.$method()?))
        }
    };
}

primitive_reader!(read_byte, read_byte, Byte);
primitive_reader!(read_sbyte, read_sbyte, SByte);
primitive_reader!(read_int16, read_int16, Int16);
primitive_reader!(read_uint16, read_uint16, UInt16);
primitive_reader!(read_int32, read_int32, Int32);
primitive_reader!(read_uint32, read_uint32, UInt32);
primitive_reader!(read_int64, read_int64, Int64);
primitive_reader!(read_uint64, read_uint64, UInt64);
primitive_reader!(read_single, read_single, Single);
primitive_reader!(read_double, read_double, Double);
primitive_reader!(read_boolean, read_boolean, Bool);
primitive_reader!(read_char, read_char, Char);
primitive_reader!(read_string, read_string, String);

pub const READERS: &[ReaderDescriptor] = &[
    ReaderDescriptor::simple(
        "System.Byte",
        "Microsoft.Xna.Framework.Content.ByteReader",
        true,
        read_byte,
    ),
    ReaderDescriptor::simple(
        "System.SByte",
        "Microsoft.Xna.Framework.Content.SByteReader",
        true,
        read_sbyte,
    ),
    ReaderDescriptor::simple(
        "System.Int16",
        "Microsoft.Xna.Framework.Content.Int16Reader",
        true,
        read_int16,
    ),
    ReaderDescriptor::simple(
        "System.UInt16",
        "Microsoft.Xna.Framework.Content.UInt16Reader",
        true,
        read_uint16,
    ),
    ReaderDescriptor::simple(
        "System.Int32",
        "Microsoft.Xna.Framework.Content.Int32Reader",
        true,
        read_int32,
    ),
    ReaderDescriptor::simple(
        "System.UInt32",
        "Microsoft.Xna.Framework.Content.UInt32Reader",
        true,
        read_uint32,
    ),
    ReaderDescriptor::simple(
        "System.Int64",
        "Microsoft.Xna.Framework.Content.Int64Reader",
        true,
        read_int64,
    ),
    ReaderDescriptor::simple(
        "System.UInt64",
        "Microsoft.Xna.Framework.Content.UInt64Reader",
        true,
        read_uint64,
    ),
    ReaderDescriptor::simple(
        "System.Single",
        "Microsoft.Xna.Framework.Content.SingleReader",
        true,
        read_single,
    ),
    ReaderDescriptor::simple(
        "System.Double",
        "Microsoft.Xna.Framework.Content.DoubleReader",
        true,
        read_double,
    ),
    ReaderDescriptor::simple(
        "System.Boolean",
        "Microsoft.Xna.Framework.Content.BooleanReader",
        true,
        read_boolean,
    ),
    ReaderDescriptor::simple(
        "System.Char",
        "Microsoft.Xna.Framework.Content.CharReader",
        true,
        read_char,
    ),
    // Strings are reference types: inside collections they carry a reader index.
    ReaderDescriptor::simple(
        "System.String",
        "Microsoft.Xna.Framework.Content.StringReader",
        false,
        read_string,
    ),
];
