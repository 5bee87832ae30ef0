//! RGB colours as exchanged with the web app (`#rrggbb` strings).
//!
//! Triangle colours come straight from the app and may be any of `#rgb`,
//! `#rrggbb`, `rgb(r, g, b)` or a CSS colour name from [`NAMED_COLORS`].
//! Other CSS forms (`hsl(...)`, the rarer extended names) are rejected.

use crate::error::SceneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit RGB colour
///
/// Serializes as a `#rrggbb` string so scene snapshots stay readable by the
/// same front end that produced the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Marker colour of the current user
    pub const CURRENT_USER: Rgb = Rgb::from_u32(0xFF5722);
    /// Marker colour of every other participant
    pub const PARTICIPANT: Rgb = Rgb::from_u32(0xCCCCCC);
    /// Dashed connector between two waiting participants
    pub const PENDING: Rgb = Rgb::from_u32(0x999999);
    pub const WHITE: Rgb = Rgb::from_u32(0xFFFFFF);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    #[must_use]
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    ///
    /// # Errors
    /// Returns [`SceneError::InvalidColor`] for any other shape.
    pub fn from_hex(input: &str) -> Result<Self, SceneError> {
        let digits = input.trim().trim_start_matches('#');
        let invalid = || SceneError::InvalidColor(format!("'{input}'"));

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_u32)
                .map_err(|_| invalid()),
            3 => {
                let short = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                // Each nibble is doubled: #abc -> #aabbcc
                let expand = |nibble: u32| ((nibble & 0xF) * 0x11) as u8;
                Ok(Self::new(
                    expand(short >> 8),
                    expand(short >> 4),
                    expand(short),
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Components scaled to [0, 1] as most renderers expect.
    #[must_use]
    pub fn to_linear_components(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// CSS colour names understood by [`Rgb::from_css`]
pub const NAMED_COLORS: [(&str, u32); 44] = [
    ("black", 0x000000),
    ("silver", 0xc0c0c0),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("white", 0xffffff),
    ("maroon", 0x800000),
    ("red", 0xff0000),
    ("purple", 0x800080),
    ("fuchsia", 0xff00ff),
    ("magenta", 0xff00ff),
    ("green", 0x008000),
    ("lime", 0x00ff00),
    ("olive", 0x808000),
    ("yellow", 0xffff00),
    ("navy", 0x000080),
    ("blue", 0x0000ff),
    ("teal", 0x008080),
    ("aqua", 0x00ffff),
    ("cyan", 0x00ffff),
    ("orange", 0xffa500),
    ("pink", 0xffc0cb),
    ("brown", 0xa52a2a),
    ("gold", 0xffd700),
    ("indigo", 0x4b0082),
    ("violet", 0xee82ee),
    ("coral", 0xff7f50),
    ("crimson", 0xdc143c),
    ("turquoise", 0x40e0d0),
    ("salmon", 0xfa8072),
    ("orchid", 0xda70d6),
    ("lightblue", 0xadd8e6),
    ("darkblue", 0x00008b),
    ("darkgreen", 0x006400),
    ("darkred", 0x8b0000),
    ("lightgreen", 0x90ee90),
    ("skyblue", 0x87ceeb),
    ("steelblue", 0x4682b4),
    ("tomato", 0xff6347),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("chocolate", 0xd2691e),
    ("plum", 0xdda0dd),
    ("orangered", 0xff4500),
    ("rebeccapurple", 0x663399),
];

impl Rgb {
    /// Parse a CSS colour: hex, `rgb(r, g, b)` / `rgba(r, g, b, a)` with
    /// integer channels, or a name from [`NAMED_COLORS`]. Case-insensitive.
    ///
    /// # Errors
    /// Returns [`SceneError::InvalidColor`] for anything else.
    pub fn from_css(input: &str) -> Result<Self, SceneError> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::from_rgb_args(args)
                .ok_or_else(|| SceneError::InvalidColor(format!("'{input}'")));
        }

        if let Some(&(_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(Self::from_u32(hex));
        }

        Self::from_hex(trimmed)
    }

    /// Channels of `rgb(...)`, comma or space separated; alpha is ignored.
    fn from_rgb_args(args: &str) -> Option<Self> {
        let mut channels = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let r = channels.next()?.parse::<u8>().ok()?;
        let g = channels.next()?.parse::<u8>().ok()?;
        let b = channels.next()?.parse::<u8>().ok()?;
        Some(Self::new(r, g, b))
    }
}

impl FromStr for Rgb {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_css(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_css(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
