use std::fmt;

use crate::foundation::core::Rect;
use crate::geometry::coordinate::Coordinate;

/// Axis-aligned bounding box.
///
/// `p1` is always the component-wise minimum and `p2` the component-wise maximum of the
/// corners it was built from. Anchors are derived on demand and never stored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    p1: Coordinate,
    p2: Coordinate,
}

impl BoundingBox {
    pub fn new(a: impl Into<Coordinate>, b: impl Into<Coordinate>) -> Self {
        let (a, b) = (a.into(), b.into());
        Self {
            p1: a.min(b),
            p2: a.max(b),
        }
    }

    pub fn p1(&self) -> Coordinate {
        self.p1
    }

    pub fn p2(&self) -> Coordinate {
        self.p2
    }

    pub fn width(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    pub fn height(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    fn mid_x(&self) -> f64 {
        self.p1.x + self.width() / 2.0
    }

    fn mid_y(&self) -> f64 {
        self.p1.y + self.height() / 2.0
    }

    pub fn north(&self) -> Coordinate {
        Coordinate::new(self.mid_x(), self.p1.y)
    }

    pub fn east(&self) -> Coordinate {
        Coordinate::new(self.p2.x, self.mid_y())
    }

    pub fn south(&self) -> Coordinate {
        Coordinate::new(self.mid_x(), self.p2.y)
    }

    pub fn west(&self) -> Coordinate {
        Coordinate::new(self.p1.x, self.mid_y())
    }

    pub fn north_west(&self) -> Coordinate {
        self.p1
    }

    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.p2.x, self.p1.y)
    }

    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.p1.x, self.p2.y)
    }

    pub fn south_east(&self) -> Coordinate {
        self.p2
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.mid_x(), self.mid_y())
    }

    /// Union with `other`; `None` leaves `self` unchanged.
    pub fn merge(self, other: Option<BoundingBox>) -> BoundingBox {
        match other {
            None => self,
            Some(other) => Self {
                p1: self.p1.min(other.p1),
                p2: self.p2.max(other.p2),
            },
        }
    }

    pub fn translated(self, delta: Coordinate) -> Self {
        Self {
            p1: self.p1 + delta,
            p2: self.p2 + delta,
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::from_points(self.p1.to_point(), self.p2.to_point())
    }
}

impl From<Rect> for BoundingBox {
    fn from(r: Rect) -> Self {
        Self::new((r.x0, r.y0), (r.x1, r.y1))
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.p1, self.p2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bbox.rs"]
mod tests;
