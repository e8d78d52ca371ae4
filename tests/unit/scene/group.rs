use super::*;
use crate::geometry::coordinate_system::CoordinateSystem;
use crate::paint::style::Style;
use crate::scene::element::Element;

fn circle(x: f64, y: f64, r: f64) -> ElementRef {
    ElementRef::new(Element::circle(
        CoordinateSystem::IDENTITY,
        Style::new(),
        (x, y),
        r,
    ))
}

#[derive(Default)]
struct Recorder(Vec<ElementId>);

impl ElementRenderer for Recorder {
    fn draw_circle(&mut self, element: &crate::scene::element::Element) -> DynfigureResult<()> {
        self.0.push(element.id());
        Ok(())
    }
}

#[test]
fn draw_visits_children_in_insertion_order() {
    let (a, b, c) = (circle(0.0, 0.0, 1.0), circle(1.0, 0.0, 1.0), circle(2.0, 0.0, 1.0));
    let inner = Group::new();
    inner.put(b.clone()).unwrap();

    let root = Group::new();
    root.put(a.clone()).unwrap();
    root.put(inner).unwrap();
    root.put(c.clone()).unwrap();

    let mut rec = Recorder::default();
    root.draw(&mut rec).unwrap();
    assert_eq!(rec.0, vec![a.id(), b.id(), c.id()]);
}

#[test]
fn bbox_is_union_of_children() {
    let g = Group::new();
    assert!(g.bbox().is_none());

    g.put_all([circle(0.0, 0.0, 1.0), circle(10.0, 5.0, 2.0)]).unwrap();
    let bb = g.bbox().unwrap();
    assert_eq!(bb.p1(), Coordinate::new(-1.0, -1.0));
    assert_eq!(bb.p2(), Coordinate::new(12.0, 7.0));
}

#[test]
fn nested_empty_group_does_not_affect_bbox() {
    let g = Group::new();
    g.put(circle(0.0, 0.0, 1.0)).unwrap();
    g.put(Group::new()).unwrap();
    assert_eq!(g.bbox().unwrap().width(), 2.0);
}

#[test]
fn find_and_remove_by_id() {
    let g = Group::new();
    let a = circle(0.0, 0.0, 1.0);
    let b = circle(1.0, 1.0, 1.0);
    g.put_all([a.clone(), b.clone()]).unwrap();

    let found = g.find(b.id()).unwrap();
    assert!(found.as_element().unwrap().ptr_eq(&b));

    let removed = g.remove(a.id()).unwrap();
    assert_eq!(removed.id(), a.id());
    assert_eq!(g.len(), 1);
    assert!(g.find(a.id()).is_none());
    assert!(g.remove(a.id()).is_none());
}

#[test]
fn caller_mutations_show_through_the_group() {
    let g = Group::new();
    let a = circle(0.0, 0.0, 1.0);
    g.put(a.clone()).unwrap();
    a.set_position((5.0, 0.0)).unwrap();
    assert_eq!(g.bbox().unwrap().center(), Coordinate::new(5.0, 0.0));
}

#[test]
fn cycles_are_rejected() {
    let outer = Group::new();
    let inner = Group::new();
    outer.put(inner.clone()).unwrap();

    assert!(matches!(outer.put(outer.clone()), Err(DynfigureError::Validation(_))));
    assert!(matches!(inner.put(outer.clone()), Err(DynfigureError::Validation(_))));
    assert_eq!(inner.len(), 0);
}

#[test]
fn groups_cannot_be_placed() {
    let node = Node::from(Group::new());
    let err = node.place(Coordinate::ORIGIN).unwrap_err();
    assert!(err.to_string().contains("groups cannot be placed"));

    let leaf = Node::from(circle(0.0, 0.0, 1.0));
    leaf.place(Coordinate::new(3.0, 3.0)).unwrap();
    assert_eq!(leaf.bbox().unwrap().north_west(), Coordinate::new(3.0, 3.0));
}

#[test]
fn draw_error_stops_traversal() {
    let g = Group::new();
    g.put(ElementRef::new(Element::line(
        CoordinateSystem::IDENTITY,
        Style::new(),
        (0.0, 0.0),
        (1.0, 1.0),
    )))
    .unwrap();
    g.put(circle(0.0, 0.0, 1.0)).unwrap();

    let mut rec = Recorder::default();
    assert!(matches!(g.draw(&mut rec), Err(DynfigureError::Unsupported(_))));
    assert!(rec.0.is_empty());
}

#[test]
fn children_expose_leaves_and_nested_groups() {
    let leaf = circle(0.0, 0.0, 1.0);
    let inner = Group::new();
    let root = Group::new();
    root.put_all([Node::from(leaf.clone()), Node::from(inner.clone())])
        .unwrap();

    let kids = root.children();
    assert!(kids[0].as_element().unwrap().ptr_eq(&leaf));
    assert!(kids[0].as_group().is_none());
    assert!(kids[1].as_group().unwrap().ptr_eq(&inner));
    assert!(kids[1].as_element().is_none());
}
