//! Readers for the graphics asset types.
//!
//! Texture layouts (all little-endian):
//! ```text
//! Texture2D    i32 format, u32 width, u32 height, u32 mips, mips × (u32 len, bytes)
//! Texture3D    i32 format, u32 width, u32 height, u32 depth, u32 mips, mips × blob
//! TextureCube  i32 format, u32 size, u32 mips, 6 faces × mips × blob
//! ```
//! The format code is looked up in the table for the container's version.

use super::{ReaderDescriptor, ResolvedReader};
use crate::content::ContentReader;
use crate::graphics::{Effect, IndexBuffer, SpriteFont, Texture2D, Texture3D, TextureCube};
use crate::surface::{SurfaceFormat, get_texture_format};
use crate::value::Value;
use crate::{Error, Result};

pub const READERS: &[ReaderDescriptor] = &[
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Graphics.Texture2D",
        "Microsoft.Xna.Framework.Content.Texture2DReader",
        false,
        read_texture_2d,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Graphics.Texture3D",
        "Microsoft.Xna.Framework.Content.Texture3DReader",
        false,
        read_texture_3d,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Graphics.TextureCube",
        "Microsoft.Xna.Framework.Content.TextureCubeReader",
        false,
        read_texture_cube,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Graphics.IndexBuffer",
        "Microsoft.Xna.Framework.Content.IndexBufferReader",
        false,
        read_index_buffer,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Graphics.Effect",
        "Microsoft.Xna.Framework.Content.EffectReader",
        false,
        read_effect,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Graphics.SpriteFont",
        "Microsoft.Xna.Framework.Content.SpriteFontReader",
        false,
        read_sprite_font,
    ),
];

fn read_format(stream: &mut ContentReader<'_>) -> Result<SurfaceFormat> {
    let code = stream.read_int32()?;
    get_texture_format(stream.version(), code)
}

fn read_mips(stream: &mut ContentReader<'_>, count: u32) -> Result<Vec<Vec<u8>>> {
    (0..count).map(|_| stream.read_sized_bytes()).collect()
}

fn read_texture_2d(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    let format = read_format(stream)?;
    let width = stream.read_uint32()?;
    let height = stream.read_uint32()?;
    let mip_count = stream.read_uint32()?;
    let mip_levels = read_mips(stream, mip_count)?;
    Ok(Value::Texture2D(Box::new(Texture2D {
        format,
        width,
        height,
        mip_levels,
        big_endian: stream.needs_swap(),
    })))
}

fn read_texture_3d(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    let format = read_format(stream)?;
    let width = stream.read_uint32()?;
    let height = stream.read_uint32()?;
    let depth = stream.read_uint32()?;
    let mip_count = stream.read_uint32()?;
    let mip_levels = read_mips(stream, mip_count)?;
    Ok(Value::Texture3D(Box::new(Texture3D {
        format,
        width,
        height,
        depth,
        mip_levels,
        big_endian: stream.needs_swap(),
    })))
}

fn read_texture_cube(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    let format = read_format(stream)?;
    let size = stream.read_uint32()?;
    let mip_count = stream.read_uint32()?;
    let faces = [
        read_mips(stream, mip_count)?,
        read_mips(stream, mip_count)?,
        read_mips(stream, mip_count)?,
        read_mips(stream, mip_count)?,
        read_mips(stream, mip_count)?,
        read_mips(stream, mip_count)?,
    ];
    Ok(Value::TextureCube(Box::new(TextureCube {
        format,
        size,
        faces,
        big_endian: stream.needs_swap(),
    })))
}

fn read_index_buffer(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    let sixteen_bit = stream.read_boolean()?;
    let data = stream.read_sized_bytes()?;
    Ok(Value::IndexBuffer(IndexBuffer { sixteen_bit, data }))
}

fn read_effect(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Effect(Effect {
        bytecode: stream.read_sized_bytes()?,
    }))
}

fn list_of<T>(value: Value, item: fn(Value) -> Option<T>, what: &'static str) -> Result<Vec<T>> {
    let Value::List(items) = value else {
        return Err(Error::Parse(what));
    };
    items.into_iter().map(|v| item(v).ok_or(Error::Parse(what))).collect()
}

fn read_sprite_font(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    let texture = match stream.read_object()? {
        Value::Texture2D(t) => *t,
        _ => return Err(Error::Parse("sprite font texture is not a Texture2D")),
    };
    let rect = |v: Value| match v {
        Value::Rectangle(r) => Some(r),
        _ => None,
    };
    let glyphs = list_of(stream.read_object()?, rect, "sprite font glyphs are not rectangles")?;
    let cropping = list_of(stream.read_object()?, rect, "sprite font cropping is not rectangles")?;
    let characters = list_of(
        stream.read_object()?,
        |v| match v {
            Value::Char(c) => Some(c),
            _ => None,
        },
        "sprite font character map is not characters",
    )?;
    let line_spacing = stream.read_int32()?;
    let spacing = stream.read_single()?;
    let kerning = list_of(
        stream.read_object()?,
        |v| match v {
            Value::Vector3(k) => Some(k),
            _ => None,
        },
        "sprite font kerning is not vectors",
    )?;
    let default_character = if stream.read_boolean()? {
        Some(stream.read_char()?)
    } else {
        None
    };
    Ok(Value::SpriteFont(Box::new(SpriteFont {
        texture,
        glyphs,
        cropping,
        characters,
        line_spacing,
        spacing,
        kerning,
        default_character,
    })))
}
