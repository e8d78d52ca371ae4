use super::*;
use crate::geometry::coordinate::{Component, px};
use crate::paint::color::Color;

fn scaled() -> CoordinateSystem {
    CoordinateSystem::IDENTITY.with_scale(2.0, 2.0)
}

#[test]
fn ids_are_unique() {
    let a = Element::circle(CoordinateSystem::IDENTITY, Style::new(), (0.0, 0.0), 1.0);
    let b = Element::circle(CoordinateSystem::IDENTITY, Style::new(), (0.0, 0.0), 1.0);
    assert_ne!(a.id(), b.id());
}

#[test]
fn circle_bbox_uses_apply_and_stretch() {
    let c = Element::circle(scaled(), Style::new(), (1.0, 2.0), 3.0);
    let bb = c.bbox();
    assert_eq!(bb.p1(), Coordinate::new(-4.0, -2.0));
    assert_eq!(bb.p2(), Coordinate::new(8.0, 10.0));
}

#[test]
fn line_bbox_is_normalized() {
    let l = Element::line(scaled(), Style::new(), (3.0, 0.0), (1.0, 4.0));
    assert_eq!(l.bbox().p1(), Coordinate::new(2.0, 0.0));
    assert_eq!(l.bbox().p2(), Coordinate::new(6.0, 8.0));
}

#[test]
fn pixel_literal_radius_ignores_scale() {
    let c = Element::circle(scaled(), Style::new(), (0.0, 0.0), px(5.0));
    assert_eq!(c.bbox().width(), 10.0);
}

#[test]
fn image_bbox_is_in_screen_pixels() {
    let raster = Rc::new(Raster::new(4, 2, Color::BLACK).unwrap());
    let img = Element::image(scaled(), Style::new(), (10.0, 20.0), raster, None).unwrap();
    assert_eq!(img.bbox().p1(), Coordinate::new(10.0, 20.0));
    assert_eq!(img.bbox().p2(), Coordinate::new(14.0, 22.0));
}

#[test]
fn image_scale_resamples_at_construction() {
    let raster = Rc::new(Raster::new(8, 4, Color::BLACK).unwrap());
    let img = Element::image(
        CoordinateSystem::IDENTITY,
        Style::new(),
        (0.0, 0.0),
        raster.clone(),
        Some(0.5),
    )
    .unwrap();
    let Shape::Image { raster: scaled, .. } = &img.shape else {
        panic!("not an image");
    };
    assert_eq!(scaled.size(), (4, 2));
    assert_eq!(raster.size(), (8, 4));
}

#[test]
fn grid_rejects_non_positive_steps() {
    let err = Element::grid(
        CoordinateSystem::IDENTITY,
        Style::new(),
        (0.0, 0.0),
        (4.0, 4.0),
        1.0,
        0.0,
    )
    .unwrap_err();
    assert!(matches!(err, DynfigureError::Validation(_)));
}

#[test]
fn setters_reject_fields_the_kind_lacks() {
    let mut c = Element::circle(CoordinateSystem::IDENTITY, Style::new(), (0.0, 0.0), 1.0);
    assert!(c.set_position((5.0, 5.0)).is_ok());
    assert!(c.set_start((1.0, 1.0)).is_err());

    let mut l = Element::line(CoordinateSystem::IDENTITY, Style::new(), (0.0, 0.0), (1.0, 1.0));
    l.set_stop((7.0, 7.0)).unwrap();
    assert_eq!(l.bbox().p2(), Coordinate::new(7.0, 7.0));
    assert!(l.set_position((0.0, 0.0)).is_err());
}

#[test]
fn shared_handle_mutation_is_visible_everywhere() {
    let a = ElementRef::new(Element::circle(
        CoordinateSystem::IDENTITY,
        Style::new(),
        (0.0, 0.0),
        1.0,
    ));
    let b = a.clone();
    b.set_position((3.0, 0.0)).unwrap();
    assert_eq!(a.bbox().center(), Coordinate::new(3.0, 0.0));
    assert!(a.ptr_eq(&b));
    assert_eq!(a.id(), b.id());
}

#[test]
fn place_moves_north_west_corner_onto_anchor() {
    let mut r = Element::rectangle(scaled(), Style::new(), (1.0, 1.0), (3.0, 2.0));
    r.place(Coordinate::new(10.0, 10.0)).unwrap();
    let bb = r.bbox();
    assert_eq!(bb.north_west(), Coordinate::new(10.0, 10.0));
    assert_eq!(bb.width(), 4.0);
    assert_eq!(bb.height(), 2.0);
}

#[test]
fn place_moves_pixel_literals_by_the_screen_offset() {
    let mut c = Element::circle(
        CoordinateSystem::IDENTITY,
        Style::new(),
        (px(10.0), Component::World(0.0)),
        1.0,
    );
    c.place(Coordinate::new(0.0, 0.0)).unwrap();
    assert_eq!(c.bbox().north_west(), Coordinate::new(0.0, 0.0));
    let Shape::Circle { position, .. } = c.shape else {
        panic!("expected a circle");
    };
    assert!(position.x.is_px());
    assert!(!position.y.is_px());
}

#[test]
fn place_lands_mixed_literal_lines_under_a_scaled_system() {
    let mut l = Element::line(
        scaled(),
        Style::new(),
        (px(2.0), Component::World(1.0)),
        (5.0, 3.0),
    );
    let before = l.bbox();
    l.place(Coordinate::new(20.0, 20.0)).unwrap();
    let after = l.bbox();
    assert_eq!(after.north_west(), Coordinate::new(20.0, 20.0));
    assert_eq!(after.width(), before.width());
    assert_eq!(after.height(), before.height());
}

struct CirclesOnly(usize);

impl ElementRenderer for CirclesOnly {
    fn draw_circle(&mut self, _element: &Element) -> DynfigureResult<()> {
        self.0 += 1;
        Ok(())
    }
}

#[test]
fn renderer_defaults_report_unsupported_kinds() {
    let mut r = CirclesOnly(0);
    let c = Element::circle(CoordinateSystem::IDENTITY, Style::new(), (0.0, 0.0), 1.0);
    let l = Element::line(CoordinateSystem::IDENTITY, Style::new(), (0.0, 0.0), (1.0, 1.0));
    r.draw(&c).unwrap();
    assert_eq!(r.0, 1);

    let err = r.draw(&l).unwrap_err();
    assert!(matches!(err, DynfigureError::Unsupported(_)));
    assert!(err.to_string().contains("Line"));
}
