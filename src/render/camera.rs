use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::geometry::coordinate::{Component, Coordinate, Radius};
use crate::paint::color::Color;
use crate::render::cpu::CpuCanvas;
use crate::render::raster::Raster;
use crate::scene::element::{Element, ElementRenderer, Shape};
use crate::scene::group::Group;

/// Row-major 3x3 matrix acting on homogeneous 2D points.
pub type Matrix3 = [[f64; 3]; 3];

/// Append the homogeneous coordinate `1` to each point.
pub fn euclidean_to_projective(points: &[Coordinate]) -> Vec<[f64; 3]> {
    points.iter().map(|p| [p.x, p.y, 1.0]).collect()
}

/// Divide the first two coordinates by the last one.
pub fn projective_to_euclidean(points: &[[f64; 3]]) -> Vec<Coordinate> {
    points
        .iter()
        .map(|[x, y, w]| Coordinate::new(x / w, y / w))
        .collect()
}

fn mul(m: &Matrix3, p: [f64; 3]) -> [f64; 3] {
    let row = |r: [f64; 3]| r[0] * p[0] + r[1] * p[1] + r[2] * p[2];
    [row(m[0]), row(m[1]), row(m[2])]
}

/// Projection from world space into screen pixels, and the only thing that rasterizes.
pub trait Camera {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Screen pixel the world origin projects onto.
    fn principal_point(&self) -> Coordinate;

    /// Project world points into screen pixels.
    fn world2image(&self, points: &[Coordinate]) -> Vec<Coordinate>;

    /// Map a world magnitude (for example a radius) into screen pixels.
    fn scale(&self, magnitude: Coordinate) -> Coordinate {
        magnitude
    }

    /// Horizontal world extent of the visible area, independent of the principal point.
    fn left(&self) -> i64 {
        (-i64::from(self.width())).div_euclid(2)
    }

    fn right(&self) -> i64 {
        i64::from(self.width()) / 2
    }

    fn top(&self) -> i64 {
        i64::from(self.height()) / 2
    }

    fn bottom(&self) -> i64 {
        (-i64::from(self.height())).div_euclid(2)
    }

    /// Rasterize `scene` onto a fresh canvas.
    fn render(&self, scene: &Group) -> DynfigureResult<Raster>;
}

/// Orthographic 2D camera: world y grows up, screen y grows down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    width: u32,
    height: u32,
    principal_point: Coordinate,
    background: Color,
}

impl Camera2D {
    /// Camera with the principal point at the canvas center and a white background.
    pub fn new(width: u32, height: u32) -> DynfigureResult<Self> {
        crate::foundation::core::Canvas::new(width, height)?;
        Ok(Self {
            width,
            height,
            principal_point: Coordinate::new(f64::from(width / 2), f64::from(height / 2)),
            background: Color::WHITE,
        })
    }

    pub fn with_principal_point(mut self, principal_point: impl Into<Coordinate>) -> Self {
        self.principal_point = principal_point.into();
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Flip the vertical axis, then translate by the principal point.
    pub fn projection_matrix(&self) -> Matrix3 {
        let Coordinate { x: cx, y: cy } = self.principal_point;
        [[1.0, 0.0, cx], [0.0, -1.0, cy], [0.0, 0.0, 1.0]]
    }

    /// The projection as a `kurbo` affine.
    pub fn as_affine(&self) -> Affine {
        let Coordinate { x: cx, y: cy } = self.principal_point;
        Affine::new([1.0, 0.0, 0.0, -1.0, cx, cy])
    }

    /// World-space corners `(min, max)` of the visible canvas, grown by `margin` on every side.
    pub fn world_window(&self, margin: f64) -> (Coordinate, Coordinate) {
        let Coordinate { x: cx, y: cy } = self.principal_point;
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        (
            Coordinate::new(-cx - margin, cy - h - margin),
            Coordinate::new(w - cx + margin, cy + margin),
        )
    }

    fn project(&self, p: Coordinate) -> Point {
        let m = self.projection_matrix();
        let [x, y, w] = mul(&m, [p.x, p.y, 1.0]);
        Point::new(x / w, y / w)
    }
}

impl Camera for Camera2D {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn principal_point(&self) -> Coordinate {
        self.principal_point
    }

    fn world2image(&self, points: &[Coordinate]) -> Vec<Coordinate> {
        let m = self.projection_matrix();
        let projected: Vec<[f64; 3]> = euclidean_to_projective(points)
            .into_iter()
            .map(|p| mul(&m, p))
            .collect();
        projective_to_euclidean(&projected)
    }

    #[tracing::instrument(skip(self, scene), fields(width = self.width, height = self.height))]
    fn render(&self, scene: &Group) -> DynfigureResult<Raster> {
        let raster = Raster::new(self.width, self.height, self.background)?;
        let mut painter = Painter {
            camera: self,
            canvas: CpuCanvas::new(raster)?,
        };
        scene.draw(&mut painter)?;
        painter.canvas.finish()
    }
}

struct Painter<'a> {
    camera: &'a Camera2D,
    canvas: CpuCanvas,
}

impl Painter<'_> {
    fn to_screen(&self, world: Coordinate) -> Point {
        self.camera.project(world)
    }
}

impl ElementRenderer for Painter<'_> {
    fn draw_circle(&mut self, element: &Element) -> DynfigureResult<()> {
        let Shape::Circle { position, radius } = element.shape else {
            return Err(kind_mismatch(element, "circle"));
        };
        let center = self.to_screen(element.csys.apply_position(position));
        let r = self.camera.scale(element.csys.stretch_radius(radius));
        tracing::trace!(id = %element.id(), x = center.x, y = center.y, rx = r.x, ry = r.y, "draw circle");
        self.canvas.ellipse(
            center,
            (r.x.abs(), r.y.abs()),
            element.style.pen(),
            element.style.brush(),
        );
        Ok(())
    }

    fn draw_line(&mut self, element: &Element) -> DynfigureResult<()> {
        let Shape::Line { start, stop } = element.shape else {
            return Err(kind_mismatch(element, "line"));
        };
        let p0 = self.to_screen(element.csys.apply_position(start));
        let p1 = self.to_screen(element.csys.apply_position(stop));
        tracing::trace!(id = %element.id(), ?p0, ?p1, "draw line");
        self.canvas.line(p0, p1, element.style.pen());
        Ok(())
    }

    fn draw_rectangle(&mut self, element: &Element) -> DynfigureResult<()> {
        let Shape::Rectangle { start, stop } = element.shape else {
            return Err(kind_mismatch(element, "rectangle"));
        };
        let p0 = self.to_screen(element.csys.apply_position(start));
        let p1 = self.to_screen(element.csys.apply_position(stop));
        tracing::trace!(id = %element.id(), ?p0, ?p1, "draw rectangle");
        self.canvas
            .rect(p0, p1, element.style.pen(), element.style.brush());
        Ok(())
    }

    fn draw_grid(&mut self, element: &Element) -> DynfigureResult<()> {
        let Shape::Grid {
            start,
            stop,
            xstep,
            ystep,
        } = element.shape
        else {
            return Err(kind_mismatch(element, "grid"));
        };
        let a = element.csys.apply_position(start);
        let b = element.csys.apply_position(stop);
        let (lo, hi) = (a.min(b), a.max(b));
        let step = element.csys.stretch_radius(Radius::PerAxis(
            Component::World(xstep),
            Component::World(ystep),
        ));
        let (sx, sy) = (step.x.abs(), step.y.abs());
        if !(sx > 0.0 && sy > 0.0) {
            return Err(DynfigureError::validation(format!(
                "grid {} has a degenerate step after its coordinate system",
                element.id()
            )));
        }
        tracing::trace!(id = %element.id(), %lo, %hi, sx, sy, "draw grid");

        let pen = element.style.pen();
        let (win_lo, win_hi) = self.camera.world_window(pen.map_or(0.0, |p| p.width.abs()) + 1.0);
        let (x0, x1) = (lo.x.max(win_lo.x), hi.x.min(win_hi.x));
        let (y0, y1) = (lo.y.max(win_lo.y), hi.y.min(win_hi.y));
        if x0 > x1 || y0 > y1 {
            return Ok(());
        }
        for x in lattice(lo.x, sx, x0, x1) {
            let p0 = self.to_screen(Coordinate::new(x, y0));
            let p1 = self.to_screen(Coordinate::new(x, y1));
            self.canvas.line(p0, p1, pen);
        }
        for y in lattice(lo.y, sy, y0, y1) {
            let p0 = self.to_screen(Coordinate::new(x0, y));
            let p1 = self.to_screen(Coordinate::new(x1, y));
            self.canvas.line(p0, p1, pen);
        }
        Ok(())
    }

    fn draw_image(&mut self, element: &Element) -> DynfigureResult<()> {
        let Shape::Image { top_left, raster } = &element.shape else {
            return Err(kind_mismatch(element, "image"));
        };
        let (x, y) = (top_left.x.round() as i64, top_left.y.round() as i64);
        tracing::trace!(id = %element.id(), x, y, w = raster.width(), h = raster.height(), "draw image");
        self.canvas.composite(raster, x, y)
    }
}

/// Points `origin + k * step` that fall inside `[from, to]`.
fn lattice(origin: f64, step: f64, from: f64, to: f64) -> impl Iterator<Item = f64> {
    let first = ((from - origin) / step - 1e-9).ceil() as i64;
    let last = ((to - origin) / step + 1e-9).floor() as i64;
    (first..=last).map(move |k| origin + k as f64 * step)
}

fn kind_mismatch(element: &Element, expected: &str) -> DynfigureError {
    DynfigureError::unsupported(format!(
        "{} dispatched to the {expected} renderer",
        element.kind()
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
