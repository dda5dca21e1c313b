//! Bitmap sprite fonts.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::{Texture2D, create_parent, sibling};
use crate::Result;

/// A bitmap font: one texture atlas plus per-character metrics.
///
/// `glyphs`, `cropping`, `characters` and `kerning` are parallel lists,
/// one entry per character.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFont {
    pub texture: Texture2D,
    /// Glyph bounds in the atlas, as X, Y, width, height.
    pub glyphs: Vec<[i32; 4]>,
    /// Placement offsets of each glyph, as X, Y, width, height.
    pub cropping: Vec<[i32; 4]>,
    pub characters: Vec<char>,
    pub line_spacing: i32,
    pub spacing: f32,
    /// Left bearing, width and right bearing.
    pub kerning: Vec<[f32; 3]>,
    /// Substitute for characters missing from the font.
    pub default_character: Option<char>,
}

impl SpriteFont {
    /// Index of `c` in the parallel lists.
    pub fn glyph_index(&self, c: char) -> Option<usize> {
        self.characters.iter().position(|&x| x == c)
    }

    /// Font metrics as an XML document.
    ///
    /// The root `SpriteFont` element carries the atlas size, `hSpace`
    /// (spacing), `vSpace` (line spacing) and `defaultChar` when set. It
    /// holds `Glyphs`, `Cropping`, `Kerning` and `CharMap` lists in
    /// character order.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new("SpriteFont");
        root.push_attribute(("width", self.texture.width.to_string().as_str()));
        root.push_attribute(("height", self.texture.height.to_string().as_str()));
        root.push_attribute(("hSpace", self.spacing.to_string().as_str()));
        root.push_attribute(("vSpace", self.line_spacing.to_string().as_str()));
        if let Some(c) = self.default_character {
            root.push_attribute(("defaultChar", c.to_string().as_str()));
        }
        w.write_event(Event::Start(root))?;

        rectangles(&mut w, "Glyphs", &self.glyphs)?;
        rectangles(&mut w, "Cropping", &self.cropping)?;

        w.write_event(Event::Start(BytesStart::new("Kerning")))?;
        for [x, y, z] in &self.kerning {
            let mut v = BytesStart::new("Vector3");
            v.push_attribute(("x", x.to_string().as_str()));
            v.push_attribute(("y", y.to_string().as_str()));
            v.push_attribute(("z", z.to_string().as_str()));
            w.write_event(Event::Empty(v))?;
        }
        w.write_event(Event::End(BytesEnd::new("Kerning")))?;

        w.write_event(Event::Start(BytesStart::new("CharMap")))?;
        for c in &self.characters {
            let mut ch = BytesStart::new("Char");
            ch.push_attribute(("c", c.to_string().as_str()));
            w.write_event(Event::Empty(ch))?;
        }
        w.write_event(Event::End(BytesEnd::new("CharMap")))?;

        w.write_event(Event::End(BytesEnd::new("SpriteFont")))?;
        Ok(w.into_inner())
    }

    /// Write the atlas to `<path>.png` and the metrics to `<path>.xml`.
    ///
    /// The atlas is skipped when its format has no codec; the metrics are
    /// always written.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        let mut written: Vec<PathBuf> = self.texture.export(path)?.into_iter().collect();

        let out = sibling(path, ".xml");
        debug!("export: {} glyphs to {}", self.glyphs.len(), out.display());
        create_parent(&out)?;
        fs::write(&out, self.to_xml()?)?;
        written.push(out);
        Ok(written)
    }
}

fn rectangles(w: &mut Writer<Vec<u8>>, list: &str, rects: &[[i32; 4]]) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(list)))?;
    for [x, y, width, height] in rects {
        let mut r = BytesStart::new("Rectangle");
        r.push_attribute(("x", x.to_string().as_str()));
        r.push_attribute(("y", y.to_string().as_str()));
        r.push_attribute(("width", width.to_string().as_str()));
        r.push_attribute(("height", height.to_string().as_str()));
        w.write_event(Event::Empty(r))?;
    }
    w.write_event(Event::End(BytesEnd::new(list)))?;
    Ok(())
}

impl fmt::Display for SpriteFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpriteFont c:{} d:{}x{}",
            self.glyphs.len(),
            self.texture.width,
            self.texture.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xnb::XnbVersion;
    use crate::surface::get_texture_format;

    fn font(format_code: i32) -> SpriteFont {
        SpriteFont {
            texture: Texture2D {
                format: get_texture_format(XnbVersion::V40, format_code).unwrap(),
                width: 2,
                height: 1,
                mip_levels: vec![vec![0xFF; 8]],
                big_endian: false,
            },
            glyphs: vec![[0, 0, 1, 1], [1, 0, 1, 1]],
            cropping: vec![[0, 2, 1, 1], [0, 3, 1, 1]],
            characters: vec!['A', '&'],
            line_spacing: 14,
            spacing: 1.5,
            kerning: vec![[0.0, 1.0, 0.5], [1.0, 1.0, 0.0]],
            default_character: Some('?'),
        }
    }

    #[test]
    fn metrics_document_lists_every_glyph() {
        let xml = String::from_utf8(font(0).to_xml().unwrap()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(
            r#"<SpriteFont width="2" height="1" hSpace="1.5" vSpace="14" defaultChar="?">"#
        ));
        assert!(xml.contains(r#"<Rectangle x="1" y="0" width="1" height="1"/>"#));
        assert!(xml.contains(r#"<Rectangle x="0" y="3" width="1" height="1"/>"#));
        assert!(xml.contains(r#"<Vector3 x="0" y="1" z="0.5"/>"#));
        assert!(xml.contains(r#"<Char c="&amp;"/>"#));
        for tag in ["<Glyphs>", "</Cropping>", "<Kerning>", "</CharMap>", "</SpriteFont>"] {
            assert!(xml.contains(tag), "missing {tag}");
        }
        assert_eq!(xml.matches("<Rectangle").count(), 4);
    }

    #[test]
    fn default_character_is_optional() {
        let mut f = font(0);
        f.default_character = None;
        let xml = String::from_utf8(f.to_xml().unwrap()).unwrap();
        assert!(!xml.contains("defaultChar"));
    }

    #[test]
    fn export_writes_atlas_and_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let files = font(0).export(dir.path().join("fonts/ui")).unwrap();
        assert_eq!(
            files,
            [dir.path().join("fonts/ui.png"), dir.path().join("fonts/ui.xml")]
        );
        let xml = std::fs::read_to_string(&files[1]).unwrap();
        assert!(xml.contains("<CharMap>"));
    }

    #[test]
    fn undecodable_atlas_still_writes_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let files = font(1).export(dir.path().join("ui")).unwrap();
        assert_eq!(files, [dir.path().join("ui.xml")]);
        assert!(!dir.path().join("ui.png").exists());
    }
}
