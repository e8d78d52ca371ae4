use kurbo::Shape as _;

use crate::foundation::core::Point;
use crate::foundation::error::DynfigureResult;
use crate::paint::color::Color;
use crate::paint::style::{Brush, Pen};
use crate::render::composite::over_in_place;
use crate::render::raster::Raster;

const PATH_TOLERANCE: f64 = 0.1;

/// Immediate-mode drawing surface bound to a [`Raster`].
///
/// Vector operations are queued on a `vello_cpu` context and only reach the raster on
/// [`CpuCanvas::flush`]. Anything that writes the raster directly must flush first.
pub(crate) struct CpuCanvas {
    raster: Raster,
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    pending: bool,
}

impl CpuCanvas {
    pub(crate) fn new(raster: Raster) -> DynfigureResult<Self> {
        let (width, height) = raster.canvas().to_u16()?;
        Ok(Self {
            raster,
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
            pending: false,
        })
    }

    /// Filled and/or stroked ellipse centered at `center` with per-axis radii.
    pub(crate) fn ellipse(
        &mut self,
        center: Point,
        radii: (f64, f64),
        pen: Option<Pen>,
        brush: Option<Brush>,
    ) {
        let path = kurbo::Ellipse::new(center, radii, 0.0).to_path(PATH_TOLERANCE);
        self.shape(&path, pen, brush);
    }

    pub(crate) fn line(&mut self, p0: Point, p1: Point, pen: Option<Pen>) {
        let path = kurbo::Line::new(p0, p1).to_path(PATH_TOLERANCE);
        self.shape(&path, pen, None);
    }

    /// Axis-aligned rectangle spanning two screen-space corners.
    pub(crate) fn rect(&mut self, p0: Point, p1: Point, pen: Option<Pen>, brush: Option<Brush>) {
        let path = kurbo::Rect::from_points(p0, p1).to_path(PATH_TOLERANCE);
        self.shape(&path, pen, brush);
    }

    fn shape(&mut self, path: &kurbo::BezPath, pen: Option<Pen>, brush: Option<Brush>) {
        let cpu_path = bezpath_to_cpu(path);
        if let Some(brush) = brush.filter(|b| b.color.a > 0) {
            self.ctx.set_paint(paint(brush.color));
            self.ctx.fill_path(&cpu_path);
            self.pending = true;
        }
        if let Some(pen) = pen.filter(|p| p.color.a > 0 && p.width > 0.0) {
            self.ctx.set_paint(paint(pen.color));
            self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(pen.width));
            self.ctx.stroke_path(&cpu_path);
            self.pending = true;
        }
    }

    /// Materialize queued vector operations into the raster and start a fresh context.
    pub(crate) fn flush(&mut self) -> DynfigureResult<()> {
        if !self.pending {
            return Ok(());
        }
        self.ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut layer);
        over_in_place(self.raster.data_mut(), layer.data_as_u8_slice(), 1.0)?;
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.pending = false;
        Ok(())
    }

    /// Paste `src` with its top-left at screen pixel `(x, y)`, over everything drawn so far.
    pub(crate) fn composite(&mut self, src: &Raster, x: i64, y: i64) -> DynfigureResult<()> {
        self.flush()?;
        self.raster.composite_over(src, x, y)
    }

    pub(crate) fn finish(mut self) -> DynfigureResult<Raster> {
        self.flush()?;
        Ok(self.raster)
    }
}

fn paint(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
