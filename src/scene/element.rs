use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::geometry::bbox::BoundingBox;
use crate::geometry::coordinate::{Coordinate, Position, Radius};
use crate::geometry::coordinate_system::CoordinateSystem;
use crate::paint::style::Style;
use crate::render::raster::Raster;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token of a scene node, unique for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of drawable primitive kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Circle,
    Line,
    Rectangle,
    Grid,
    Image,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Circle,
        ElementKind::Line,
        ElementKind::Rectangle,
        ElementKind::Grid,
        ElementKind::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Grid => "Grid",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific geometry of an [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle {
        position: Position,
        radius: Radius,
    },
    Line {
        start: Position,
        stop: Position,
    },
    Rectangle {
        start: Position,
        stop: Position,
    },
    Grid {
        start: Position,
        stop: Position,
        xstep: f64,
        ystep: f64,
    },
    /// `top_left` is in screen pixels; images are not projected.
    Image {
        top_left: Coordinate,
        raster: Rc<Raster>,
    },
}

impl Shape {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Circle { .. } => ElementKind::Circle,
            Self::Line { .. } => ElementKind::Line,
            Self::Rectangle { .. } => ElementKind::Rectangle,
            Self::Grid { .. } => ElementKind::Grid,
            Self::Image { .. } => ElementKind::Image,
        }
    }
}

/// A drawable primitive: geometry plus the coordinate system and style captured when it was
/// built.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    id: ElementId,
    pub csys: CoordinateSystem,
    pub style: Style,
    pub shape: Shape,
}

impl Element {
    pub fn new(csys: CoordinateSystem, style: Style, shape: Shape) -> DynfigureResult<Self> {
        if let Shape::Grid { xstep, ystep, .. } = shape
            && !(xstep > 0.0 && ystep > 0.0)
        {
            return Err(DynfigureError::validation(format!(
                "grid steps must be positive, got ({xstep}, {ystep})"
            )));
        }
        Ok(Self {
            id: ElementId::next(),
            csys,
            style,
            shape,
        })
    }

    pub fn circle(
        csys: CoordinateSystem,
        style: Style,
        position: impl Into<Position>,
        radius: impl Into<Radius>,
    ) -> Self {
        Self::leaf(
            csys,
            style,
            Shape::Circle {
                position: position.into(),
                radius: radius.into(),
            },
        )
    }

    pub fn line(
        csys: CoordinateSystem,
        style: Style,
        start: impl Into<Position>,
        stop: impl Into<Position>,
    ) -> Self {
        Self::leaf(
            csys,
            style,
            Shape::Line {
                start: start.into(),
                stop: stop.into(),
            },
        )
    }

    pub fn rectangle(
        csys: CoordinateSystem,
        style: Style,
        start: impl Into<Position>,
        stop: impl Into<Position>,
    ) -> Self {
        Self::leaf(
            csys,
            style,
            Shape::Rectangle {
                start: start.into(),
                stop: stop.into(),
            },
        )
    }

    pub fn grid(
        csys: CoordinateSystem,
        style: Style,
        start: impl Into<Position>,
        stop: impl Into<Position>,
        xstep: f64,
        ystep: f64,
    ) -> DynfigureResult<Self> {
        Self::new(
            csys,
            style,
            Shape::Grid {
                start: start.into(),
                stop: stop.into(),
                xstep,
                ystep,
            },
        )
    }

    /// Image element. A `scale` factor resamples the raster once, here.
    pub fn image(
        csys: CoordinateSystem,
        style: Style,
        top_left: impl Into<Coordinate>,
        raster: Rc<Raster>,
        scale: Option<f64>,
    ) -> DynfigureResult<Self> {
        let raster = match scale {
            Some(factor) => Rc::new(raster.resized(factor)?),
            None => raster,
        };
        Self::new(
            csys,
            style,
            Shape::Image {
                top_left: top_left.into(),
                raster,
            },
        )
    }

    fn leaf(csys: CoordinateSystem, style: Style, shape: Shape) -> Self {
        Self {
            id: ElementId::next(),
            csys,
            style,
            shape,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.shape.kind()
    }

    /// Axis-aligned bounds after the captured coordinate system, before camera projection.
    /// Image bounds are in screen pixels.
    pub fn bbox(&self) -> BoundingBox {
        let csys = &self.csys;
        match &self.shape {
            Shape::Circle { position, radius } => {
                let center = csys.apply_position(*position);
                let r = csys.stretch_radius(*radius);
                let r = Coordinate::new(r.x.abs(), r.y.abs());
                BoundingBox::new(center - r, center + r)
            }
            Shape::Line { start, stop }
            | Shape::Rectangle { start, stop }
            | Shape::Grid { start, stop, .. } => {
                BoundingBox::new(csys.apply_position(*start), csys.apply_position(*stop))
            }
            Shape::Image { top_left, raster } => {
                let size = Coordinate::new(f64::from(raster.width()), f64::from(raster.height()));
                BoundingBox::new(*top_left, *top_left + size)
            }
        }
    }

    /// Move a circle center or an image top-left corner.
    pub fn set_position(&mut self, to: impl Into<Position>) -> DynfigureResult<()> {
        let kind = self.kind();
        match &mut self.shape {
            Shape::Circle { position, .. } => {
                *position = to.into();
                Ok(())
            }
            Shape::Image { top_left, .. } => {
                let p = to.into();
                *top_left = Coordinate::new(p.x.value(), p.y.value());
                Ok(())
            }
            _ => Err(missing_field(kind, "position")),
        }
    }

    pub fn set_start(&mut self, to: impl Into<Position>) -> DynfigureResult<()> {
        let kind = self.kind();
        match &mut self.shape {
            Shape::Line { start, .. } | Shape::Rectangle { start, .. } | Shape::Grid { start, .. } => {
                *start = to.into();
                Ok(())
            }
            _ => Err(missing_field(kind, "start")),
        }
    }

    pub fn set_stop(&mut self, to: impl Into<Position>) -> DynfigureResult<()> {
        let kind = self.kind();
        match &mut self.shape {
            Shape::Line { stop, .. } | Shape::Rectangle { stop, .. } | Shape::Grid { stop, .. } => {
                *stop = to.into();
                Ok(())
            }
            _ => Err(missing_field(kind, "stop")),
        }
    }

    /// Move every world-space anchor of the element by `delta`. Pixel-literal components
    /// stay put; images move by `delta` screen pixels.
    pub fn translate(&mut self, delta: Coordinate) {
        match &mut self.shape {
            Shape::Circle { position, .. } => *position = position.translated(delta),
            Shape::Line { start, stop }
            | Shape::Rectangle { start, stop }
            | Shape::Grid { start, stop, .. } => {
                *start = start.translated(delta);
                *stop = stop.translated(delta);
            }
            Shape::Image { top_left, .. } => *top_left = *top_left + delta,
        }
    }

    /// Move the element so the north-west corner of its bounding box lands on `anchor`.
    ///
    /// World components move by the offset divided by the coordinate-system scale; pixel
    /// literals and images move by the raw offset.
    pub fn place(&mut self, anchor: Coordinate) -> DynfigureResult<()> {
        let offset = anchor - self.bbox().north_west();
        if let Shape::Image { top_left, .. } = &mut self.shape {
            *top_left = *top_left + offset;
            return Ok(());
        }

        let [sx, sy, _] = self.csys.scale;
        if sx == 0.0 || sy == 0.0 {
            return Err(DynfigureError::validation(format!(
                "cannot place {} under a degenerate coordinate system {}",
                self.kind(),
                self.csys
            )));
        }
        let world = Coordinate::new(offset.x / sx, offset.y / sy);
        match &mut self.shape {
            Shape::Circle { position, .. } => *position = position.shifted(world, offset),
            Shape::Line { start, stop }
            | Shape::Rectangle { start, stop }
            | Shape::Grid { start, stop, .. } => {
                *start = start.shifted(world, offset);
                *stop = stop.shifted(world, offset);
            }
            Shape::Image { .. } => {}
        }
        Ok(())
    }
}

fn missing_field(kind: ElementKind, field: &str) -> DynfigureError {
    DynfigureError::validation(format!("{kind} has no {field}"))
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.kind(), self.id, self.style)
    }
}

/// Shared handle to an element.
///
/// A [`Group`](crate::scene::group::Group) and the caller can both hold the same element;
/// mutations through any handle are seen by the next render.
#[derive(Clone, Debug)]
pub struct ElementRef(Rc<RefCell<Element>>);

impl ElementRef {
    pub fn new(element: Element) -> Self {
        Self(Rc::new(RefCell::new(element)))
    }

    pub fn id(&self) -> ElementId {
        self.0.borrow().id()
    }

    pub fn kind(&self) -> ElementKind {
        self.0.borrow().kind()
    }

    pub fn borrow(&self) -> Ref<'_, Element> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Element> {
        self.0.borrow_mut()
    }

    pub fn bbox(&self) -> BoundingBox {
        self.0.borrow().bbox()
    }

    pub fn set_position(&self, to: impl Into<Position>) -> DynfigureResult<()> {
        self.0.borrow_mut().set_position(to)
    }

    pub fn set_start(&self, to: impl Into<Position>) -> DynfigureResult<()> {
        self.0.borrow_mut().set_start(to)
    }

    pub fn set_stop(&self, to: impl Into<Position>) -> DynfigureResult<()> {
        self.0.borrow_mut().set_stop(to)
    }

    pub fn set_style(&self, style: Style) {
        self.0.borrow_mut().style = style;
    }

    pub fn translate(&self, delta: Coordinate) {
        self.0.borrow_mut().translate(delta);
    }

    pub fn place(&self, anchor: Coordinate) -> DynfigureResult<()> {
        self.0.borrow_mut().place(anchor)
    }

    pub fn ptr_eq(&self, other: &ElementRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Element> for ElementRef {
    fn from(element: Element) -> Self {
        Self::new(element)
    }
}

/// Draw sink for scene traversal.
///
/// Every per-kind hook defaults to an [`DynfigureError::Unsupported`] failure, so a renderer
/// only has to implement the kinds it can actually draw.
pub trait ElementRenderer {
    fn draw(&mut self, element: &Element) -> DynfigureResult<()> {
        match element.kind() {
            ElementKind::Circle => self.draw_circle(element),
            ElementKind::Line => self.draw_line(element),
            ElementKind::Rectangle => self.draw_rectangle(element),
            ElementKind::Grid => self.draw_grid(element),
            ElementKind::Image => self.draw_image(element),
        }
    }

    fn draw_circle(&mut self, element: &Element) -> DynfigureResult<()> {
        Err(unsupported(element))
    }

    fn draw_line(&mut self, element: &Element) -> DynfigureResult<()> {
        Err(unsupported(element))
    }

    fn draw_rectangle(&mut self, element: &Element) -> DynfigureResult<()> {
        Err(unsupported(element))
    }

    fn draw_grid(&mut self, element: &Element) -> DynfigureResult<()> {
        Err(unsupported(element))
    }

    fn draw_image(&mut self, element: &Element) -> DynfigureResult<()> {
        Err(unsupported(element))
    }
}

fn unsupported(element: &Element) -> DynfigureError {
    DynfigureError::unsupported(format!("no renderer for {}", element.kind()))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;
