use std::fmt;

use crate::foundation::error::DynfigureResult;
use crate::paint::color::Color;

/// Stroke parameters derived from a [`Style`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
}

/// Fill parameters derived from a [`Style`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub color: Color,
}

/// Draw style of a primitive. Value type: every element owns its own copy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    pub color: Option<Color>,
    pub fill_color: Option<Color>,
    pub line_width: f64,
    /// Fill opacity in `0..=255`.
    pub opacity: u8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: None,
            fill_color: None,
            line_width: 1.0,
            opacity: 255,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style from stroke/fill color expressions, e.g. `Style::parse(Some("red"), Some("red!0.5!white"))`.
    pub fn parse(color: Option<&str>, fill_color: Option<&str>) -> DynfigureResult<Self> {
        Ok(Self {
            color: color.map(Color::parse).transpose()?,
            fill_color: fill_color.map(Color::parse).transpose()?,
            ..Self::default()
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_fill(mut self, fill_color: Color) -> Self {
        self.fill_color = Some(fill_color);
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    /// `None` when the style has no stroke color.
    pub fn pen(&self) -> Option<Pen> {
        self.color.map(|color| Pen {
            color,
            width: self.line_width,
        })
    }

    /// `None` when the style has no fill color. Opacity is folded into the fill alpha.
    pub fn brush(&self) -> Option<Brush> {
        self.fill_color.map(|c| Brush {
            color: c.with_opacity(self.opacity),
        })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(c) = self.color {
            parts.push(format!("draw={c}"));
        }
        if let Some(c) = self.fill_color {
            parts.push(format!("fill={c}"));
        }
        parts.push(format!("line width={}", self.line_width));
        parts.push(format!("opacity={}", self.opacity));
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/style.rs"]
mod tests;
