use std::fmt;

use crate::geometry::coordinate::{Component, Coordinate, Position, Radius};

/// Per-axis scale and shift applied to world coordinates.
///
/// World axes: x grows left to right, y grows bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoordinateSystem {
    pub scale: [f64; 3],
    pub shift: [f64; 3],
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CoordinateSystem {
    pub const IDENTITY: Self = Self {
        scale: [1.0, 1.0, 1.0],
        shift: [0.0, 0.0, 0.0],
    };

    pub fn new(scale: [f64; 3], shift: [f64; 3]) -> Self {
        Self { scale, shift }
    }

    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.scale[0] = x;
        self.scale[1] = y;
        self
    }

    pub fn with_shift(mut self, x: f64, y: f64) -> Self {
        self.shift[0] = x;
        self.shift[1] = y;
        self
    }

    /// Transform a position vector: `scale[i] * (v[i] + shift[i])` for the first three
    /// components. Pixel literals and components past the third pass through unchanged.
    pub fn apply(&self, val: &[Component]) -> Vec<f64> {
        val.iter()
            .enumerate()
            .map(|(k, c)| match *c {
                Component::Px(v) => v,
                Component::World(v) if k < 3 => self.scale[k] * (v + self.shift[k]),
                Component::World(v) => v,
            })
            .collect()
    }

    /// Transform a magnitude vector: like [`CoordinateSystem::apply`] without the shift.
    pub fn stretch(&self, val: &[Component]) -> Vec<f64> {
        val.iter()
            .enumerate()
            .map(|(k, c)| match *c {
                Component::Px(v) => v,
                Component::World(v) if k < 3 => self.scale[k] * v,
                Component::World(v) => v,
            })
            .collect()
    }

    pub fn apply_position(&self, p: Position) -> Coordinate {
        let [x, y] = p.components();
        Coordinate::new(self.apply_axis(0, x), self.apply_axis(1, y))
    }

    pub fn apply_coordinate(&self, c: Coordinate) -> Coordinate {
        self.apply_position(Position::from(c))
    }

    /// Per-axis radii after stretching.
    pub fn stretch_radius(&self, r: Radius) -> Coordinate {
        let [rx, ry] = r.components();
        Coordinate::new(self.stretch_axis(0, rx), self.stretch_axis(1, ry))
    }

    fn apply_axis(&self, k: usize, c: Component) -> f64 {
        match c {
            Component::Px(v) => v,
            Component::World(v) => self.scale[k] * (v + self.shift[k]),
        }
    }

    fn stretch_axis(&self, k: usize, c: Component) -> f64 {
        match c {
            Component::Px(v) => v,
            Component::World(v) => self.scale[k] * v,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoordinateSystem(scale: [{:.2}, {:.2}, {:.2}] shift: [{:.2}, {:.2}, {:.2}])",
            self.scale[0], self.scale[1], self.scale[2], self.shift[0], self.shift[1], self.shift[2]
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/coordinate_system.rs"]
mod tests;
