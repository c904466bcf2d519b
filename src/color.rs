//! Colors for glyphs and fusion gradients.
//!
//! Base colors carry a subject's identity. Glyph features may only touch
//! opacity, so [`ColorAdjustment`] has no hue, saturation or brightness knob
//! that can be set to anything but identity.

use serde::{Deserialize, Serialize};

use crate::error::IsotypeError;

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, IsotypeError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IsotypeError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| IsotypeError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

/// RGB color with a floating-point alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Default glyph palette, indexed by subject seed.
pub const PALETTE: [Rgb; 12] = [
    Rgb::new(0xe6, 0x4b, 0x3c),
    Rgb::new(0xf3, 0x9c, 0x12),
    Rgb::new(0xf1, 0xc4, 0x0f),
    Rgb::new(0x2e, 0xcc, 0x71),
    Rgb::new(0x1a, 0xbc, 0x9c),
    Rgb::new(0x34, 0x98, 0xdb),
    Rgb::new(0x29, 0x80, 0xb9),
    Rgb::new(0x9b, 0x59, 0xb6),
    Rgb::new(0x8e, 0x44, 0xad),
    Rgb::new(0xe8, 0x43, 0x93),
    Rgb::new(0x16, 0xa0, 0x85),
    Rgb::new(0xd3, 0x54, 0x00),
];

/// Palette entry for a seed.
pub fn palette_color(seed: u64) -> Rgb {
    PALETTE[(seed % PALETTE.len() as u64) as usize]
}

/// Per-glyph color modification derived from the subjectivity profile.
///
/// Only `opacity` is ever computed from features. The remaining fields are
/// fixed at identity and exist so renderers can apply the adjustment
/// uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorAdjustment {
    pub hue_shift: f64,
    pub saturation_scale: f64,
    pub brightness_scale: f64,
    pub opacity: f64,
}

impl ColorAdjustment {
    /// Identity adjustment with the given opacity.
    pub fn with_opacity(opacity: f64) -> Self {
        Self {
            hue_shift: 0.0,
            saturation_scale: 1.0,
            brightness_scale: 1.0,
            opacity,
        }
    }

    /// Apply to a base color. RGB channels pass through untouched.
    pub fn apply(&self, base: Rgb) -> Rgba {
        base.with_alpha(self.opacity)
    }
}

// ============================================================================
// Tests
// ============================================================================
