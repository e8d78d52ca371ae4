use super::*;
use crate::geometry::coordinate::px;

fn world(v: &[f64]) -> Vec<Component> {
    v.iter().copied().map(Component::World).collect()
}

#[test]
fn apply_scales_positions() {
    let cs = CoordinateSystem::IDENTITY.with_scale(2.0, 2.0);
    assert_eq!(cs.apply(&world(&[3.0, 4.0])), vec![6.0, 8.0]);
    assert_eq!(
        cs.apply_position(Position::new(3.0, 4.0)),
        Coordinate::new(6.0, 8.0)
    );
}

#[test]
fn apply_shifts_before_scaling() {
    let cs = CoordinateSystem::new([2.0, 3.0, 4.0], [1.0, -1.0, 0.5]);
    assert_eq!(cs.apply(&world(&[1.0, 1.0, 1.0])), vec![4.0, 0.0, 6.0]);
}

#[test]
fn stretch_ignores_shift() {
    let cs = CoordinateSystem::IDENTITY
        .with_scale(2.0, 2.0)
        .with_shift(100.0, 100.0);
    assert_eq!(cs.stretch(&world(&[5.0])), vec![10.0]);
    assert_eq!(
        cs.stretch_radius(Radius::from(5.0)),
        Coordinate::new(10.0, 10.0)
    );
}

#[test]
fn pixel_literal_bypasses_scale_and_shift() {
    let cs = CoordinateSystem::new([2.0, 2.0, 2.0], [7.0, 7.0, 7.0]);
    let lit: Component = "50px".parse().unwrap();
    assert_eq!(cs.apply(&[lit]), vec![50.0]);
    assert_eq!(cs.stretch(&[lit]), vec![50.0]);
    assert_eq!(
        cs.stretch_radius(Radius::from(lit)),
        Coordinate::new(50.0, 50.0)
    );
}

#[test]
fn mixed_literal_and_world_components_transform_independently() {
    let cs = CoordinateSystem::IDENTITY
        .with_scale(2.0, 3.0)
        .with_shift(1.0, 1.0);
    assert_eq!(
        cs.apply(&[px(10.0), Component::World(2.0)]),
        vec![10.0, 9.0]
    );
    assert_eq!(
        cs.apply_position(Position::new(4.0, px(10.0))),
        Coordinate::new(10.0, 10.0)
    );
    assert_eq!(
        cs.stretch_radius(Radius::PerAxis(px(3.0), Component::World(3.0))),
        Coordinate::new(3.0, 9.0)
    );
}

#[test]
fn components_past_the_third_pass_through() {
    let cs = CoordinateSystem::new([2.0, 2.0, 2.0], [1.0, 1.0, 1.0]);
    assert_eq!(
        cs.apply(&world(&[0.0, 0.0, 0.0, 9.0])),
        vec![2.0, 2.0, 2.0, 9.0]
    );
}

#[test]
fn deserializes_from_json() {
    let cs: CoordinateSystem =
        serde_json::from_str(r#"{"scale":[2,2,1],"shift":[0,-50,0]}"#).unwrap();
    assert_eq!(cs, CoordinateSystem::IDENTITY.with_scale(2.0, 2.0).with_shift(0.0, -50.0));
}
