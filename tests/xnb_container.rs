//! End-to-end decoding of synthetic containers.

use std::io::Read;

use flate2::read::ZlibDecoder;
use xnbkit::content::ContentReader;
use xnbkit::formats::xnb::{Platform, XnbFile, XnbVersion};
use xnbkit::readers::{ReaderDescriptor, ResolvedReader, TypeReaderRegistry};
use xnbkit::value::Value;
use xnbkit::{Error, Result};

/// Builds a container body and wraps it in a header.
struct Builder {
    body: Vec<u8>,
}

impl Builder {
    fn new(readers: &[&str]) -> Self {
        let mut b = Self { body: Vec::new() };
        b.seven_bit(readers.len() as u32);
        for name in readers {
            b.string(name);
            b.i32(0);
        }
        b
    }

    fn seven_bit(&mut self, mut v: u32) -> &mut Self {
        while v >= 0x80 {
            self.body.push((v as u8) | 0x80);
            v >>= 7;
        }
        self.body.push(v as u8);
        self
    }

    fn string(&mut self, s: &str) -> &mut Self {
        self.seven_bit(s.len() as u32);
        self.body.extend_from_slice(s.as_bytes());
        self
    }

    fn i32(&mut self, v: i32) -> &mut Self {
        self.body.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn u32(&mut self, v: u32) -> &mut Self {
        self.body.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn bytes(&mut self, b: &[u8]) -> &mut Self {
        self.body.extend_from_slice(b);
        self
    }

    fn finish(&self, platform: u8, version: u8) -> Vec<u8> {
        let mut out = b"XNB".to_vec();
        out.extend_from_slice(&[platform, version, 0]);
        out.extend_from_slice(&((10 + self.body.len()) as u32).to_le_bytes());
        out.extend_from_slice(&self.body);
        out
    }
}

const TEXTURE_2D_READER: &str = "Microsoft.Xna.Framework.Content.Texture2DReader, Microsoft.Xna.Framework.Graphics, Version=4.0.0.0, Culture=neutral, PublicKeyToken=842cf8be1de50553";

fn dxt1_container() -> Vec<u8> {
    let mut b = Builder::new(&[TEXTURE_2D_READER]);
    b.seven_bit(0) // shared resources
        .seven_bit(1) // primary: Texture2D
        .i32(4) // Dxt1
        .u32(8)
        .u32(4)
        .u32(1)
        .u32(16)
        // solid red: c0 = 0xF800 > c1 = 0x001F, every index 0
        .bytes(&[0x00, 0xF8, 0x1F, 0x00, 0, 0, 0, 0])
        // solid black: c0 = 0xFFFF, c1 = 0x0000, every index 1
        .bytes(&[0xFF, 0xFF, 0x00, 0x00, 0x55, 0x55, 0x55, 0x55]);
    b.finish(b'w', 5)
}

fn png_chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    assert_eq!(png[..8], xnbkit::png::SIGNATURE);
    let mut pos = 8;
    let mut chunks = Vec::new();
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = &png[pos + 8..pos + 8 + len];
        let stored = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        let mut crc = crc32fast::Hasher::new();
        crc.update(&tag);
        crc.update(data);
        assert_eq!(crc.finalize(), stored, "bad CRC on {:?}", String::from_utf8_lossy(&tag));
        chunks.push((tag, data.to_vec()));
        pos += 12 + len;
    }
    chunks
}

#[test]
fn dxt1_texture_decodes_and_exports() {
    let registry = TypeReaderRegistry::standard().unwrap();
    let xnb = XnbFile::parse(&dxt1_container(), &registry).unwrap();
    assert_eq!(xnb.header.version, XnbVersion::V40);
    assert_eq!(xnb.readers[0].0, TEXTURE_2D_READER);
    assert!(xnb.shared.is_empty());

    let Value::Texture2D(texture) = &xnb.primary else {
        panic!("expected a texture, got {}", xnb.primary.kind());
    };
    assert_eq!(texture.format.name, "Dxt1");
    assert_eq!((texture.width, texture.height), (8, 4));

    let rows: Vec<Vec<u8>> = texture.rows(0).unwrap().unwrap().collect();
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.len(), 32);
        assert_eq!(row[..4], [255, 0, 0, 255]);
        assert_eq!(row[16..20], [0, 0, 0, 255]);
    }

    let dir = tempfile::tempdir().unwrap();
    let out = texture.export(dir.path().join("tex/checker")).unwrap().unwrap();
    let chunks = png_chunks(&std::fs::read(out).unwrap());
    assert_eq!(&chunks[0].0, b"IHDR");
    assert_eq!(chunks[0].1[..8], [0, 0, 0, 8, 0, 0, 0, 4]);
    assert_eq!(&chunks.last().unwrap().0, b"IEND");

    let stream: Vec<u8> = chunks
        .iter()
        .filter(|(tag, _)| tag == b"IDAT")
        .flat_map(|(_, data)| data.clone())
        .collect();
    let mut raw = Vec::new();
    ZlibDecoder::new(&stream[..]).read_to_end(&mut raw).unwrap();
    let expected: Vec<u8> = rows
        .iter()
        .flat_map(|r| std::iter::once(0).chain(r.iter().copied()))
        .collect();
    assert_eq!(raw, expected);
}

#[test]
fn xbox_colour_payload_is_swapped() {
    let mut b = Builder::new(&["Microsoft.Xna.Framework.Content.Texture2DReader"]);
    b.seven_bit(0)
        .seven_bit(1)
        .i32(0)
        .u32(1)
        .u32(1)
        .u32(1)
        .u32(4)
        .bytes(&[0xFF, 0x30, 0x20, 0x10]);
    let registry = TypeReaderRegistry::standard().unwrap();
    let xnb = XnbFile::parse(&b.finish(b'x', 5), &registry).unwrap();
    assert_eq!(xnb.header.platform, Platform::Xbox360);
    let Value::Texture2D(texture) = xnb.primary else {
        panic!("expected a texture");
    };
    let pixels: Vec<u8> = texture.rows(0).unwrap().unwrap().flatten().collect();
    assert_eq!(pixels, [0x10, 0x20, 0x30, 0xFF]);
}

#[test]
fn undecodable_texture_exports_nothing() {
    let mut b = Builder::new(&["Microsoft.Xna.Framework.Content.Texture2DReader"]);
    b.seven_bit(0)
        .seven_bit(1)
        .i32(1) // Bgr565
        .u32(1)
        .u32(1)
        .u32(1)
        .u32(2)
        .bytes(&[0, 0]);
    let registry = TypeReaderRegistry::standard().unwrap();
    let xnb = XnbFile::parse(&b.finish(b'w', 5), &registry).unwrap();
    let Value::Texture2D(texture) = xnb.primary else {
        panic!("expected a texture");
    };
    let dir = tempfile::tempdir().unwrap();
    assert!(texture.export(dir.path().join("flat")).unwrap().is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn dictionary_of_lists_with_shared_resources() {
    let mut b = Builder::new(&[
        "Microsoft.Xna.Framework.Content.DictionaryReader`2[[System.String, mscorlib],[System.Collections.Generic.List`1[[System.Int32, mscorlib]], mscorlib]]",
        "Microsoft.Xna.Framework.Content.StringReader",
        "Microsoft.Xna.Framework.Content.ListReader`1[[System.Int32, mscorlib]]",
        "Microsoft.Xna.Framework.Content.Int32Reader",
    ]);
    b.seven_bit(1) // one shared resource
        .seven_bit(1)
        .i32(3);
    b.seven_bit(2).string("a").seven_bit(3).i32(1).i32(10);
    b.seven_bit(2).string("b").seven_bit(3).i32(0);
    b.seven_bit(2).string("a").seven_bit(3).i32(2).i32(20).i32(30);
    b.seven_bit(4).i32(99);

    let registry = TypeReaderRegistry::standard().unwrap();
    let xnb = XnbFile::parse(&b.finish(b'w', 5), &registry).unwrap();

    let Value::Dictionary(dict) = &xnb.primary else {
        panic!("expected a dictionary, got {}", xnb.primary.kind());
    };
    assert_eq!(dict.len(), 2);
    let keys: Vec<&Value> = dict.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, [&Value::String("a".into()), &Value::String("b".into())]);
    assert_eq!(
        dict.get(&Value::String("a".into())),
        Some(&Value::List(vec![Value::Int32(20), Value::Int32(30)]))
    );
    assert_eq!(xnb.shared, [Value::Int32(99)]);
}

#[test]
fn unknown_generic_argument_is_named() {
    let b = Builder::new(&[
        "Microsoft.Xna.Framework.Content.ListReader`1[[Game.Enemy, Game, Version=1.0.0.0]]",
    ]);
    let registry = TypeReaderRegistry::standard().unwrap();
    match XnbFile::parse(&b.finish(b'w', 5), &registry) {
        Err(Error::UnknownTypeReader(name)) => assert_eq!(name, "Game.Enemy"),
        other => panic!("unexpected {other:?}"),
    }
}

fn read_direction(stream: &mut ContentReader<'_>, _: &[ResolvedReader]) -> Result<Value> {
    Ok(Value::Int32(stream.read_int32()?))
}

#[test]
fn caller_registered_readers_compose_with_generics() {
    let mut builder = TypeReaderRegistry::builder();
    builder
        .register(ReaderDescriptor::simple(
            "Game.Direction",
            "Game.DirectionReader",
            true,
            read_direction,
        ))
        .unwrap();
    for descriptor in xnbkit::readers::standard_readers() {
        builder.register(*descriptor).unwrap();
    }
    let registry = builder.build();

    let mut b = Builder::new(&["Microsoft.Xna.Framework.Content.ArrayReader`1[[Game.Direction, Game]]"]);
    b.seven_bit(0).seven_bit(1).i32(2).i32(3).i32(1);
    let xnb = XnbFile::parse(&b.finish(b'd', 5), &registry).unwrap();
    assert_eq!(
        xnb.primary,
        Value::List(vec![Value::Int32(3), Value::Int32(1)])
    );
}

#[test]
fn truncated_body_is_eof() {
    let mut b = Builder::new(&["Microsoft.Xna.Framework.Content.Int32Reader"]);
    b.seven_bit(0).seven_bit(1).bytes(&[1, 2]);
    let registry = TypeReaderRegistry::standard().unwrap();
    assert!(matches!(
        XnbFile::parse(&b.finish(b'w', 4), &registry),
        Err(Error::UnexpectedEof)
    ));
}

#[test]
fn self_referencing_list_is_a_parse_error() {
    let mut b = Builder::new(&["Microsoft.Xna.Framework.Content.ListReader`1[[System.String]]"]);
    b.seven_bit(0).seven_bit(1);
    for _ in 0..200_000 {
        b.i32(1).seven_bit(1);
    }
    let registry = TypeReaderRegistry::standard().unwrap();
    assert!(matches!(
        XnbFile::parse(&b.finish(b'w', 5), &registry),
        Err(Error::Parse(_))
    ));
}

#[test]
fn deeply_nested_reader_name_is_rejected() {
    let name = format!(
        "Microsoft.Xna.Framework.Content.ListReader`1{}[[System.Int32]]{}",
        "[[System.Collections.Generic.List`1".repeat(10_000),
        "]]".repeat(10_000)
    );
    let b = Builder::new(&[name.as_str()]);
    let registry = TypeReaderRegistry::standard().unwrap();
    assert!(matches!(
        XnbFile::parse(&b.finish(b'w', 5), &registry),
        Err(Error::InvalidTypeName(_))
    ));
}

#[cfg(feature = "compression")]
#[test]
fn lz4_body_is_decompressed() {
    let mut b = Builder::new(&["Microsoft.Xna.Framework.Content.StringReader"]);
    b.seven_bit(0).seven_bit(1).string(&"compressible ".repeat(20));
    let packed = lz4_flex::block::compress(&b.body);

    let mut data = b"XNBw\x05\x40".to_vec();
    data.extend_from_slice(&((14 + packed.len()) as u32).to_le_bytes());
    data.extend_from_slice(&(b.body.len() as u32).to_le_bytes());
    data.extend_from_slice(&packed);

    let registry = TypeReaderRegistry::standard().unwrap();
    let xnb = XnbFile::parse(&data, &registry).unwrap();
    assert_eq!(xnb.primary, Value::String("compressible ".repeat(20)));
}
