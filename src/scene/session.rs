use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::foundation::error::DynfigureResult;
use crate::geometry::coordinate::{Coordinate, Position, Radius};
use crate::geometry::coordinate_system::CoordinateSystem;
use crate::paint::style::Style;
use crate::render::raster::Raster;
use crate::scene::element::{Element, ElementKind, ElementRef};

/// Default style per element kind. Kinds without an entry use [`Style::default`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleTemplate {
    styles: HashMap<ElementKind, Style>,
}

impl StyleTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style_for(&self, kind: ElementKind) -> Style {
        self.styles.get(&kind).copied().unwrap_or_default()
    }

    /// Copy of this template with `style` set for each of `kinds`.
    pub fn overriding(&self, kinds: &[ElementKind], style: Style) -> Self {
        let mut next = self.clone();
        for &kind in kinds {
            next.styles.insert(kind, style);
        }
        next
    }
}

/// Explicit scene-building context.
///
/// Holds the coordinate-system stack and the style-template stack. Elements built through a
/// session capture the top of both stacks at construction time; popping a scope later never
/// changes elements that already exist.
#[derive(Debug, Default)]
pub struct Session {
    coordinate_systems: Vec<CoordinateSystem>,
    templates: Vec<StyleTemplate>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active coordinate system, identity when no scope is open.
    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_systems
            .last()
            .copied()
            .unwrap_or(CoordinateSystem::IDENTITY)
    }

    pub fn coordinate_depth(&self) -> usize {
        self.coordinate_systems.len()
    }

    /// Active style for `kind`.
    pub fn style_for(&self, kind: ElementKind) -> Style {
        self.templates
            .last()
            .map(|t| t.style_for(kind))
            .unwrap_or_default()
    }

    pub fn style_depth(&self) -> usize {
        self.templates.len()
    }

    /// Make `csys` current until the returned guard is dropped.
    ///
    /// The new system replaces the current one outright; it is not composed with it.
    pub fn coordinate_scope(&mut self, csys: CoordinateSystem) -> CoordinateScope<'_> {
        self.coordinate_systems.push(csys);
        CoordinateScope { session: self }
    }

    /// Override the style of `kinds` until the returned guard is dropped. Other kinds keep
    /// the style of the enclosing scope.
    pub fn style_scope(&mut self, kinds: &[ElementKind], style: Style) -> StyleScope<'_> {
        let next = self
            .templates
            .last()
            .map(|t| t.overriding(kinds, style))
            .unwrap_or_else(|| StyleTemplate::new().overriding(kinds, style));
        self.templates.push(next);
        StyleScope { session: self }
    }

    /// Run `body` with `csys` current. The scope is popped on every exit path.
    pub fn with_coordinate_system<R>(
        &mut self,
        csys: CoordinateSystem,
        body: impl FnOnce(&mut Session) -> R,
    ) -> R {
        let mut scope = self.coordinate_scope(csys);
        body(&mut scope)
    }

    /// Run `body` with `style` applied to `kinds`. The scope is popped on every exit path.
    pub fn with_style<R>(
        &mut self,
        kinds: &[ElementKind],
        style: Style,
        body: impl FnOnce(&mut Session) -> R,
    ) -> R {
        let mut scope = self.style_scope(kinds, style);
        body(&mut scope)
    }

    pub fn circle(&self, position: impl Into<Position>, radius: impl Into<Radius>) -> ElementRef {
        ElementRef::new(Element::circle(
            self.coordinate_system(),
            self.style_for(ElementKind::Circle),
            position,
            radius,
        ))
    }

    pub fn line(&self, start: impl Into<Position>, stop: impl Into<Position>) -> ElementRef {
        ElementRef::new(Element::line(
            self.coordinate_system(),
            self.style_for(ElementKind::Line),
            start,
            stop,
        ))
    }

    pub fn rectangle(&self, start: impl Into<Position>, stop: impl Into<Position>) -> ElementRef {
        ElementRef::new(Element::rectangle(
            self.coordinate_system(),
            self.style_for(ElementKind::Rectangle),
            start,
            stop,
        ))
    }

    pub fn grid(
        &self,
        start: impl Into<Position>,
        stop: impl Into<Position>,
        xstep: f64,
        ystep: f64,
    ) -> DynfigureResult<ElementRef> {
        Element::grid(
            self.coordinate_system(),
            self.style_for(ElementKind::Grid),
            start,
            stop,
            xstep,
            ystep,
        )
        .map(ElementRef::new)
    }

    pub fn image(
        &self,
        top_left: impl Into<Coordinate>,
        raster: Rc<Raster>,
        scale: Option<f64>,
    ) -> DynfigureResult<ElementRef> {
        Element::image(
            self.coordinate_system(),
            self.style_for(ElementKind::Image),
            top_left,
            raster,
            scale,
        )
        .map(ElementRef::new)
    }
}

/// Guard returned by [`Session::coordinate_scope`]. Pops its coordinate system on drop.
#[derive(Debug)]
pub struct CoordinateScope<'a> {
    session: &'a mut Session,
}

impl Deref for CoordinateScope<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for CoordinateScope<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for CoordinateScope<'_> {
    fn drop(&mut self) {
        self.session.coordinate_systems.pop();
    }
}

/// Guard returned by [`Session::style_scope`]. Pops its style template on drop.
#[derive(Debug)]
pub struct StyleScope<'a> {
    session: &'a mut Session,
}

impl Deref for StyleScope<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for StyleScope<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for StyleScope<'_> {
    fn drop(&mut self) {
        self.session.templates.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/session.rs"]
mod tests;
