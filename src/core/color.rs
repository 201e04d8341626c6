//! Background colors for the expand tool. A color arrives as a name, an RGB
//! triple, or a hex string and is resolved once to RGBA before any pixel work.
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// CSS/X11 color name, case-insensitive (`white`, `SteelBlue`, ...)
    Named(String),
    Rgb(u8, u8, u8),
    /// `#RGB`, `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional
    Hex(String),
}

impl Color {
    /// Resolve to a canonical opaque-or-translucent RGBA value.
    pub fn resolve(&self) -> Result<Rgba<u8>> {
        match self {
            Color::Rgb(r, g, b) => Ok(Rgba([*r, *g, *b, 255])),
            Color::Hex(hex) => parse_hex(hex),
            Color::Named(name) => named_color(name)
                .map(|[r, g, b]| Rgba([r, g, b, 255]))
                .ok_or_else(|| Error::InvalidColor(format!("unknown color name '{}'", name))),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Rgb(255, 255, 255)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Classify user text: `#...` is hex, `r,g,b` (optionally parenthesized) is RGB,
    /// anything else is a name. Classification does not validate; `resolve` does.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.starts_with('#') {
            return Ok(Color::Hex(text.to_string()));
        }

        let inner = text.trim_start_matches('(').trim_end_matches(')');
        if inner.contains(',') {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if let [r, g, b] = parts.as_slice() {
                let channel = |c: &str| {
                    c.parse::<u8>()
                        .map_err(|_| Error::InvalidColor(format!("bad RGB channel '{}' in '{}'", c, text)))
                };
                return Ok(Color::Rgb(channel(r)?, channel(g)?, channel(b)?));
            }
            return Err(Error::InvalidColor(format!(
                "expected three RGB channels, got '{}'",
                text
            )));
        }

        Ok(Color::Named(text.to_string()))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Named(name) => write!(f, "{}", name),
            Color::Rgb(r, g, b) => write!(f, "({}, {}, {})", r, g, b),
            Color::Hex(hex) => write!(f, "{}", hex),
        }
    }
}

fn parse_hex(hex: &str) -> Result<Rgba<u8>> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || Error::InvalidColor(format!("malformed hex color '{}'", hex));
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    let nibble = |i: usize| {
        u8::from_str_radix(&digits[i..i + 1], 16)
            .map(|v| v * 17)
            .map_err(|_| invalid())
    };

    match digits.len() {
        3 => Ok(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255])),
        6 => Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => Err(invalid()),
    }
}

fn named_color(name: &str) -> Option<[u8; 3]> {
    let rgb = match name.trim().to_ascii_lowercase().as_str() {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" | "aqua" => [0, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255],
        "gray" | "grey" => [128, 128, 128],
        "darkgray" | "darkgrey" => [169, 169, 169],
        "lightgray" | "lightgrey" => [211, 211, 211],
        "dimgray" | "dimgrey" => [105, 105, 105],
        "silver" => [192, 192, 192],
        "gainsboro" => [220, 220, 220],
        "whitesmoke" => [245, 245, 245],
        "snow" => [255, 250, 250],
        "ivory" => [255, 255, 240],
        "beige" => [245, 245, 220],
        "linen" => [250, 240, 230],
        "maroon" => [128, 0, 0],
        "darkred" => [139, 0, 0],
        "brown" => [165, 42, 42],
        "crimson" => [220, 20, 60],
        "salmon" => [250, 128, 114],
        "coral" => [255, 127, 80],
        "tomato" => [255, 99, 71],
        "orange" => [255, 165, 0],
        "darkorange" => [255, 140, 0],
        "gold" => [255, 215, 0],
        "khaki" => [240, 230, 140],
        "olive" => [128, 128, 0],
        "darkgreen" => [0, 100, 0],
        "forestgreen" => [34, 139, 34],
        "seagreen" => [46, 139, 87],
        "teal" => [0, 128, 128],
        "turquoise" => [64, 224, 208],
        "skyblue" => [135, 206, 235],
        "steelblue" => [70, 130, 180],
        "royalblue" => [65, 105, 225],
        "navy" => [0, 0, 128],
        "darkblue" => [0, 0, 139],
        "indigo" => [75, 0, 130],
        "purple" => [128, 0, 128],
        "violet" => [238, 130, 238],
        "orchid" => [218, 112, 214],
        "plum" => [221, 160, 221],
        "pink" => [255, 192, 203],
        "hotpink" => [255, 105, 180],
        "tan" => [210, 180, 140],
        "chocolate" => [210, 105, 30],
        "sienna" => [160, 82, 45],
        _ => return None,
    };
    Some(rgb)
}
