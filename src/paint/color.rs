use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{DynfigureError, DynfigureResult};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED: &[(&str, [u8; 4])] = &[
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("black", [0, 0, 0, 255]),
];

const SCHEME: &[(&str, [u8; 4])] = &[
    ("color1", [15, 21, 24, 255]),
    ("color2", [0, 114, 189, 255]),
    ("color3", [27, 158, 119, 255]),
    ("color4", [217, 83, 25, 255]),
    ("color5", [126, 47, 142, 255]),
    ("color6", [162, 20, 47, 255]),
    ("color7", [77, 190, 238, 255]),
    ("color8", [119, 172, 48, 255]),
    ("color9", [227, 26, 28, 255]),
    ("color10", [141, 211, 199, 255]),
    ("color11", [185, 151, 207, 255]),
    ("color12", [249, 38, 114, 255]),
    ("color13", [253, 151, 31, 255]),
    ("color14", [0, 127, 217, 255]),
    ("color15", [0, 127, 0, 255]),
    ("color16", [204, 0, 0, 255]),
    ("color17", [255, 255, 0, 255]),
];

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Look up a color by name in the built-in table.
    pub fn named(name: &str) -> DynfigureResult<Self> {
        NAMED
            .iter()
            .chain(SCHEME)
            .find(|(n, _)| *n == name)
            .map(|&(_, [r, g, b, a])| Self::rgba(r, g, b, a))
            .ok_or_else(|| DynfigureError::color(format!("color \"{name}\" does not exist")))
    }

    /// Resolve a color expression.
    ///
    /// Accepted forms: a table name (`"red"`, `"color3"`), a hex literal (`"#RRGGBB"`,
    /// `"#RRGGBBAA"`), or `"name1!w!name2"`, which blends `w * name1 + (1 - w) * name2`.
    pub fn parse(expr: &str) -> DynfigureResult<Self> {
        let expr = expr.trim();
        let parts: Vec<&str> = expr.split('!').collect();
        match parts.as_slice() {
            [single] => {
                if single.starts_with('#') {
                    parse_hex(single)
                } else {
                    Self::named(single)
                }
            }
            [a, w, b] => {
                let w: f64 = w.trim().parse().map_err(|e| {
                    DynfigureError::color(format!("invalid weight in \"{expr}\": {e}"))
                })?;
                if !(0.0..=1.0).contains(&w) {
                    return Err(DynfigureError::color(format!(
                        "weight {w} in \"{expr}\" is outside [0, 1]"
                    )));
                }
                let a = Self::parse(a)?;
                let b = Self::parse(b)?;
                Ok(a.interpolate(b, w))
            }
            _ => Err(DynfigureError::color(format!(
                "malformed color expression \"{expr}\" (expected name or name!weight!name)"
            ))),
        }
    }

    /// Per-channel `w * self + (1 - w) * other`, truncated to integers.
    pub fn interpolate(self, other: Color, w: f64) -> Color {
        let mix = |x: u8, y: u8| -> u8 {
            (w * f64::from(x) + (1.0 - w) * f64::from(y)).clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// `num` consecutive entries of the built-in `colorN` scheme, starting at `color{start}`.
    pub fn scheme(num: usize, start: usize) -> DynfigureResult<Vec<Color>> {
        let end = start.checked_add(num).ok_or_else(|| {
            DynfigureError::color(format!("color scheme range {start}+{num} overflows"))
        })?;
        (start..end)
            .map(|i| Self::named(&format!("color{i}")))
            .collect()
    }

    /// Same color with alpha scaled by `opacity / 255`.
    pub fn with_opacity(self, opacity: u8) -> Color {
        let a = ((u16::from(self.a) * u16::from(opacity) + 127) / 255) as u8;
        Color { a, ..self }
    }
}

fn parse_hex(s: &str) -> DynfigureResult<Color> {
    let hex = s.strip_prefix('#').unwrap_or(s);

    let byte = |pair: &str| -> DynfigureResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| DynfigureError::color(format!("invalid hex byte \"{pair}\" in \"{s}\"")))
    };

    if !hex.is_ascii() {
        return Err(DynfigureError::color(format!("invalid hex color \"{s}\"")));
    }
    match hex.len() {
        6 => Ok(Color::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        8 => Ok(Color::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            byte(&hex[6..8])?,
        )),
        _ => Err(DynfigureError::color(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

impl FromStr for Color {
    type Err = DynfigureError;

    fn from_str(s: &str) -> DynfigureResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = DynfigureError;

    fn try_from(s: &str) -> DynfigureResult<Self> {
        Self::parse(s)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Expr(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Expr(s) => Color::parse(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Color::rgb(r, g, b)),
                &[r, g, b, a] => Ok(Color::rgba(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/color.rs"]
mod tests;
