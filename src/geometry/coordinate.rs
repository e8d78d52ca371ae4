//! Value types for positions in world space.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::foundation::core::Point;
use crate::foundation::error::{DynfigureError, DynfigureResult};

/// A 2D numeric vector in world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Cartesian offset for a polar `(angle in degrees, distance)` pair.
    pub fn polar(angle_deg: f64, distance: f64) -> Self {
        let angle = angle_deg.to_radians();
        Self::new(distance * angle.cos(), distance * angle.sin())
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Coordinate {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for Coordinate {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// One component of a caller-specified vector.
///
/// `World` values go through the captured coordinate system. `Px` values are pixel literals:
/// they are only unit-stripped and bypass every scale and shift.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Component {
    World(f64),
    Px(f64),
}

impl Component {
    /// Raw numeric value, ignoring the tag.
    pub fn value(self) -> f64 {
        match self {
            Self::World(v) | Self::Px(v) => v,
        }
    }

    pub fn is_px(self) -> bool {
        matches!(self, Self::Px(_))
    }

    /// Shift a world value by `delta`. Pixel literals stay where they are.
    pub fn offset(self, delta: f64) -> Self {
        match self {
            Self::World(v) => Self::World(v + delta),
            px @ Self::Px(_) => px,
        }
    }

    /// Shift a world value by `world` and a pixel literal by `screen`.
    pub fn shifted(self, world: f64, screen: f64) -> Self {
        match self {
            Self::World(v) => Self::World(v + world),
            Self::Px(v) => Self::Px(v + screen),
        }
    }
}

impl From<f64> for Component {
    fn from(v: f64) -> Self {
        Self::World(v)
    }
}

impl From<i32> for Component {
    fn from(v: i32) -> Self {
        Self::World(f64::from(v))
    }
}

/// Any string is a pixel literal; a trailing `px` unit is stripped before parsing.
impl FromStr for Component {
    type Err = DynfigureError;

    fn from_str(s: &str) -> DynfigureResult<Self> {
        let raw = s.trim();
        let number = raw.strip_suffix("px").unwrap_or(raw).trim();
        number
            .parse::<f64>()
            .map(Self::Px)
            .map_err(|e| DynfigureError::validation(format!("invalid pixel literal \"{s}\": {e}")))
    }
}

impl TryFrom<&str> for Component {
    type Error = DynfigureError;

    fn try_from(s: &str) -> DynfigureResult<Self> {
        s.parse()
    }
}

/// Pixel-literal shorthand: `px(50.0)` is the same as `"50px"`.
pub fn px(v: f64) -> Component {
    Component::Px(v)
}

/// A 2D position whose components may individually be pixel literals.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: Component,
    pub y: Component,
}

impl Position {
    pub fn new(x: impl Into<Component>, y: impl Into<Component>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn components(self) -> [Component; 2] {
        [self.x, self.y]
    }

    /// Move the world components by `delta`.
    pub fn translated(self, delta: Coordinate) -> Self {
        Self {
            x: self.x.offset(delta.x),
            y: self.y.offset(delta.y),
        }
    }

    /// Move world components by `world` and pixel literals by `screen`.
    pub fn shifted(self, world: Coordinate, screen: Coordinate) -> Self {
        Self {
            x: self.x.shifted(world.x, screen.x),
            y: self.y.shifted(world.y, screen.y),
        }
    }
}

impl From<Coordinate> for Position {
    fn from(c: Coordinate) -> Self {
        Self::new(c.x, c.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(Component, Component)> for Position {
    fn from((x, y): (Component, Component)) -> Self {
        Self { x, y }
    }
}

/// Circle radius: one magnitude for both axes, or one per axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Radius {
    Uniform(Component),
    PerAxis(Component, Component),
}

impl Radius {
    pub fn components(self) -> [Component; 2] {
        match self {
            Self::Uniform(r) => [r, r],
            Self::PerAxis(rx, ry) => [rx, ry],
        }
    }
}

impl From<f64> for Radius {
    fn from(r: f64) -> Self {
        Self::Uniform(Component::World(r))
    }
}

impl From<i32> for Radius {
    fn from(r: i32) -> Self {
        Self::Uniform(Component::from(r))
    }
}

impl From<Component> for Radius {
    fn from(r: Component) -> Self {
        Self::Uniform(r)
    }
}

impl From<(f64, f64)> for Radius {
    fn from((rx, ry): (f64, f64)) -> Self {
        Self::PerAxis(Component::World(rx), Component::World(ry))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/coordinate.rs"]
mod tests;
