//! Surface-format tables: numeric texture format codes to names and codecs.
//!
//! The numeric code space changed with XNA 4.0, so there are two tables.
//! [`get_texture_format`] picks one by container version. Each code maps to
//! exactly one name; codes missing from the active table are an error, never
//! a silent default.
//!
//! Only a handful of formats carry a [`PixelCodec`]. The rest are known by
//! name but not decoded; check [`SurfaceFormat::is_decodable`] before
//! exporting.

use std::fmt;

use crate::formats::xnb::XnbVersion;
use crate::pixels::{
    PixelCodec, Rows, decode_alpha8, decode_bgra, decode_dxt1, decode_dxt3, decode_dxt5,
    decode_rgba,
};
use crate::{Error, Result};

type Entry = (i32, &'static str, Option<PixelCodec>);

/// Formats used by XNA 3.0 and 3.1 containers.
const SURFACE_FORMAT: &[Entry] = &[
    (1, "Color", Some(decode_bgra)),
    (2, "Bgr32", None),
    (3, "Bgra1010102", None),
    (4, "Rgba32", None),
    (5, "Rgb32", None),
    (6, "Rgba1010102", None),
    (7, "Rg32", None),
    (8, "Rgba64", None),
    (9, "Bgr565", None),
    (10, "Bgra5551", None),
    (11, "Bgr555", None),
    (12, "Bgra4444", None),
    (13, "Bgr444", None),
    (14, "Bgra2338", None),
    (15, "Alpha8", Some(decode_alpha8)),
    (16, "Bgr233", None),
    (17, "Bgr24", None),
    (18, "NormalizedByte2", None),
    (19, "NormalizedByte4", None),
    (20, "NormalizedShort2", None),
    (21, "NormalizedShort4", None),
    (22, "Single", None),
    (23, "Vector2", None),
    (24, "Vector4", None),
    (25, "HalfSingle", None),
    (26, "HalfVector2", None),
    (27, "HalfVector4", None),
    (28, "Dxt1", Some(decode_dxt1)),
    (29, "Dxt2", None),
    (30, "Dxt3", Some(decode_dxt3)),
    (31, "Dxt4", None),
    (32, "Dxt5", Some(decode_dxt5)),
    (33, "Luminance8", None),
    (34, "Luminance16", None),
    (35, "LuminanceAlpha8", None),
    (36, "LuminanceAlpha16", None),
    (37, "Palette8", None),
    (38, "PaletteAlpha16", None),
    (39, "NormalizedLuminance16", None),
    (40, "NormalizedLuminance32", None),
    (41, "NormalizedAlpha1010102", None),
    (42, "NormalizedByte2Computed", None),
    (43, "VideoYuYv", None),
    (44, "VideoUyVy", None),
    (45, "VideoGrGb", None),
    (46, "VideoRgBg", None),
    (47, "Multi2Bgra32", None),
    (48, "Depth24Stencil8", None),
    (49, "Depth24Stencil8Single", None),
    (50, "Depth24Stencil4", None),
    (51, "Depth24", None),
    (52, "Depth32", None),
    (54, "Depth16", None),
    (56, "Depth15Stencil1", None),
];

/// Formats used by XNA 4.0 containers.
const SURFACE_FORMAT4: &[Entry] = &[
    (0, "Color", Some(decode_rgba)),
    (1, "Bgr565", None),
    (2, "Bgra5551", None),
    (3, "Bgra4444", None),
    (4, "Dxt1", Some(decode_dxt1)),
    (5, "Dxt3", Some(decode_dxt3)),
    (6, "Dxt5", Some(decode_dxt5)),
    (7, "NormalizedByte2", None),
    (8, "NormalizedByte4", None),
    (9, "Rgba1010102", None),
    (10, "Rg32", None),
    (11, "Rgba64", None),
    (12, "Alpha8", Some(decode_alpha8)),
    (13, "Single", None),
    (14, "Vector2", None),
    (15, "Vector4", None),
    (16, "HalfSingle", None),
    (17, "HalfVector2", None),
    (18, "HalfVector4", None),
    (19, "HdrBlendable", None),
];

/// A resolved texture surface format.
#[derive(Clone, Copy)]
pub struct SurfaceFormat {
    /// Numeric code as stored in the container.
    pub code: i32,
    /// Format name.
    pub name: &'static str,
    /// Row decoder, if this format can be decoded.
    pub codec: Option<PixelCodec>,
}

impl SurfaceFormat {
    /// Whether a pixel codec exists for this format.
    pub fn is_decodable(&self) -> bool {
        self.codec.is_some()
    }

    /// Decode a payload with this format's codec.
    ///
    /// Returns `Ok(None)` for formats without a codec.
    pub fn decode<'a>(
        &self,
        data: &'a [u8],
        width: u32,
        height: u32,
        needs_swap: bool,
    ) -> Result<Option<Rows<'a>>> {
        self.codec
            .map(|codec| codec(data, width, height, needs_swap))
            .transpose()
    }
}

impl PartialEq for SurfaceFormat {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.name == other.name
    }
}

impl Eq for SurfaceFormat {}

impl fmt::Debug for SurfaceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceFormat")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("decodable", &self.is_decodable())
            .finish()
    }
}

impl fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Look up `code` in the table for `version`.
///
/// XNA 4.0 and later use the compact table; earlier versions use the
/// original one. Fails with [`Error::InvalidFormat`] for unknown codes.
pub fn get_texture_format(version: XnbVersion, code: i32) -> Result<SurfaceFormat> {
    let table = if version >= XnbVersion::V40 {
        SURFACE_FORMAT4
    } else {
        SURFACE_FORMAT
    };
    table
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(code, name, codec)| SurfaceFormat { code, name, codec })
        .ok_or(Error::InvalidFormat { version, code })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_selects_table() {
        let v4 = get_texture_format(XnbVersion::V40, 0).unwrap();
        assert_eq!(v4.name, "Color");
        let v3 = get_texture_format(XnbVersion::V31, 28).unwrap();
        assert_eq!(v3.name, "Dxt1");
        assert!(v3.is_decodable());
        let v3_zero = get_texture_format(XnbVersion::V30, 0);
        assert!(matches!(
            v3_zero,
            Err(Error::InvalidFormat {
                version: XnbVersion::V30,
                code: 0
            })
        ));
    }

    #[test]
    fn gaps_are_invalid() {
        for code in [53, 55, 57, -1] {
            assert!(get_texture_format(XnbVersion::V31, code).is_err());
        }
        assert!(get_texture_format(XnbVersion::V40, 20).is_err());
    }

    #[test]
    fn codes_are_unique() {
        for table in [SURFACE_FORMAT, SURFACE_FORMAT4] {
            for (i, (code, _, _)) in table.iter().enumerate() {
                assert!(table[i + 1..].iter().all(|(c, _, _)| c != code));
            }
        }
    }

    #[test]
    fn undecodable_format_yields_nothing() {
        let format = get_texture_format(XnbVersion::V40, 1).unwrap();
        assert_eq!(format.name, "Bgr565");
        assert!(!format.is_decodable());
        assert!(format.decode(&[0; 8], 2, 2, false).unwrap().is_none());
    }

    #[test]
    fn colour_codec_differs_by_era() {
        let pixel = [1u8, 2, 3, 4];
        let v3 = get_texture_format(XnbVersion::V31, 1).unwrap();
        let v4 = get_texture_format(XnbVersion::V40, 0).unwrap();
        let old: Vec<u8> = v3.decode(&pixel, 1, 1, false).unwrap().unwrap().flatten().collect();
        let new: Vec<u8> = v4.decode(&pixel, 1, 1, false).unwrap().unwrap().flatten().collect();
        assert_eq!(old, [3, 2, 1, 4]);
        assert_eq!(new, [1, 2, 3, 4]);
    }
}
