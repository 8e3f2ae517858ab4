//! Color palettes used by the pie and bubble charts.
//!
//! A palette is ten colors. The pie chart uses them directly as slice colors
//! and the bubble chart uses a stepped colorscale derived from them, each
//! color covering one tenth of the id range.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 10;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPalette`] if the text is not six hex digits.
    pub fn from_hex(text: &str) -> Result<Self> {
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidPalette(format!("bad color {text:?}")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| Error::InvalidPalette(format!("bad color {text:?}: {e}")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn hex(v: u32) -> Rgb {
    Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Blue to pale green, the dashboard's original look.
const OCEAN: [Rgb; PALETTE_SIZE] = [
    hex(0x00_2047),
    hex(0x08_4081),
    hex(0x08_68ac),
    hex(0x2b_8cbe),
    hex(0x4e_b3d3),
    hex(0x7b_ccc4),
    hex(0xa8_ddb5),
    hex(0xcc_ebc5),
    hex(0xe0_f3db),
    hex(0xf7_fcf0),
];

/// Dark red to near white.
const EMBER: [Rgb; PALETTE_SIZE] = [
    hex(0x3b_0f0f),
    hex(0x67_000d),
    hex(0xa5_0f15),
    hex(0xcb_181d),
    hex(0xef_3b2c),
    hex(0xfb_6a4a),
    hex(0xfc_9272),
    hex(0xfc_bba1),
    hex(0xfe_e0d2),
    hex(0xff_f5f0),
];

/// Names accepted by [`Palette::builtin`].
pub const BUILTIN_PALETTES: [&str; 2] = ["ocean", "ember"];

/// A named ten-color chart theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    #[must_use]
    pub fn ocean() -> Self {
        Self {
            name: "ocean".to_string(),
            colors: OCEAN,
        }
    }

    #[must_use]
    pub fn ember() -> Self {
        Self {
            name: "ember".to_string(),
            colors: EMBER,
        }
    }

    /// Look up a built-in palette by name (case-insensitive).
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ocean" => Some(Self::ocean()),
            "ember" => Some(Self::ember()),
            _ => None,
        }
    }

    /// Build a custom palette from exactly ten colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPalette`] if there are not exactly ten colors.
    pub fn custom(colors: &[Rgb]) -> Result<Self> {
        let colors: [Rgb; PALETTE_SIZE] = colors.try_into().map_err(|_| {
            Error::InvalidPalette(format!(
                "expected {PALETTE_SIZE} colors, got {}",
                colors.len()
            ))
        })?;
        Ok(Self {
            name: "custom".to_string(),
            colors,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Stepped colorscale: `[[0.0, c0], [0.1, c0], [0.1, c1], ..., [1.0, c9]]`.
    #[must_use]
    pub fn colorscale(&self) -> Vec<(f64, Rgb)> {
        let mut stops = Vec::with_capacity(PALETTE_SIZE * 2);
        for (i, &color) in (0u32..).zip(self.colors.iter()) {
            stops.push((f64::from(i) / 10.0, color));
            stops.push((f64::from(i + 1) / 10.0, color));
        }
        stops
    }

    /// Color of the stepped colorscale at a normalized position in `[0, 1]`.
    #[must_use]
    pub fn color_at(&self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((t * 10.0).floor() as usize).min(PALETTE_SIZE - 1);
        self.colors[idx]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ocean()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Palette {
    type Err = Error;

    /// Accepts a built-in name or ten comma-separated `#rrggbb` colors.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(palette) = Self::builtin(s) {
            return Ok(palette);
        }
        if !s.contains(',') {
            return Err(Error::InvalidPalette(format!(
                "unknown palette {s:?} (expected one of {})",
                BUILTIN_PALETTES.join(", ")
            )));
        }
        let colors = s.split(',').map(Rgb::from_hex).collect::<Result<Vec<_>>>()?;
        Self::custom(&colors)
    }
}
