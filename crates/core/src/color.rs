//! RGBA color with hex parsing and source-over compositing.
//!
//! Components are f64 in [0, 1]. The painting path quantizes to 8 bits at
//! the surface boundary, matching the canvas the original effects draw on.

use crate::error::EffectError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGBA color with components in [0, 1].
///
/// Serializes as a hex string: `"#rrggbb"` for opaque colors,
/// `"#rrggbbaa"` otherwise. The hex round-trip has 8-bit quantization,
/// which is acceptable since the pixel target is 8-bit anyway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Parses a hex color like `"#818cf8"`, `"818cf8"`, or `"#818cf8cc"`
    /// (case insensitive; 6 digits opaque, 8 digits with alpha).
    ///
    /// Returns `EffectError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Rgba, EffectError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(EffectError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {:?}",
                hex
            )));
        }
        let byte = |i: usize| -> Result<f64, EffectError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| EffectError::InvalidColor(format!("bad hex digits in {:?}", hex)))
        };
        Ok(Rgba {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if digits.len() == 8 { byte(6)? } else { 1.0 },
        })
    }

    /// Formats as `"#rrggbb"`, or `"#rrggbbaa"` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Returns this color with its alpha replaced by `alpha`, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Source-over composite of `self` onto `dst` (non-premultiplied).
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a;
        let da = dst.a;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let blend = |sc: f64, dc: f64| (sc * sa + dc * da * (1.0 - sa)) / out_a;
        Rgba {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: out_a,
        }
    }

    /// Quantizes to an RGBA8 pixel, clamping components to [0, 1] first.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Reconstructs from an RGBA8 pixel.
    pub fn from_rgba8(px: [u8; 4]) -> Rgba {
        Rgba {
            r: f64::from(px[0]) / 255.0,
            g: f64::from(px[1]) / 255.0,
            b: f64::from(px[2]) / 255.0,
            a: f64::from(px[3]) / 255.0,
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
