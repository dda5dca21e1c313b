//! Readers for the framework's math and color value types.

use super::{ReaderDescriptor, ResolvedReader};
use crate::Result;
use crate::content::ContentReader;
use crate::value::Value;

pub const READERS: &[ReaderDescriptor] = &[
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Vector2",
        "Microsoft.Xna.Framework.Content.Vector2Reader",
        true,
        read_vector2,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Vector3",
        "Microsoft.Xna.Framework.Content.Vector3Reader",
        true,
        read_vector3,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Vector4",
        "Microsoft.Xna.Framework.Content.Vector4Reader",
        true,
        read_vector4,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Point",
        "Microsoft.Xna.Framework.Content.PointReader",
        true,
        read_point,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Rectangle",
        "Microsoft.Xna.Framework.Content.RectangleReader",
        true,
        read_rectangle,
    ),
    ReaderDescriptor::simple(
        "Microsoft.Xna.Framework.Color",
        "Microsoft.Xna.Framework.Content.ColorReader",
        true,
        read_color,
    ),
];

fn singles<const N: usize>(stream: &mut ContentReader<'_>) -> Result<[f32; N]> {
    let mut out = [0f32; N];
    for v in &mut out {
        *v = stream.read_single()?;
    }
    Ok(out)
}

fn int32s<const N: usize>(stream: &mut ContentReader<'_>) -> Result<[i32; N]> {
    let mut out = [0i32; N];
    for v in &mut out {
        *v = stream.read_int32()?;
    }
    Ok(out)
}

fn read_vector2(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Vector2(singles(stream)?))
}

fn read_vector3(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Vector3(singles(stream)?))
}

fn read_vector4(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Vector4(singles(stream)?))
}

fn read_point(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Point(int32s(stream)?))
}

fn read_rectangle(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Rectangle(int32s(stream)?))
}

fn read_color(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    let mut rgba = [0u8; 4];
    for c in &mut rgba {
        *c = stream.read_byte()?;
    }
    Ok(Value::Color(rgba))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xnb::{Platform, XnbVersion};
    use crate::readers::TypeReaderRegistry;

    fn read(name: &str, body: &[u8]) -> Value {
        let registry = TypeReaderRegistry::standard().unwrap();
        let reader = registry.resolve(name).unwrap();
        let mut stream = ContentReader::new(body, XnbVersion::V40, Platform::Windows);
        reader.read(&mut stream).unwrap()
    }

    #[test]
    fn vectors_and_rectangles() {
        let body: Vec<u8> = [1.0f32, -2.5, 0.5].iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(
            read("Microsoft.Xna.Framework.Vector3", &body),
            Value::Vector3([1.0, -2.5, 0.5])
        );
        let body: Vec<u8> = [1i32, 2, 30, 40].iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(
            read("Microsoft.Xna.Framework.Content.RectangleReader", &body),
            Value::Rectangle([1, 2, 30, 40])
        );
    }

    #[test]
    fn color_is_rgba_bytes() {
        assert_eq!(
            read("Microsoft.Xna.Framework.Color", &[10, 20, 30, 255]),
            Value::Color([10, 20, 30, 255])
        );
    }
}
