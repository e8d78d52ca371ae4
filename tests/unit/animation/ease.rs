use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn linear_midpoint_is_exact() {
    let t = Tween::with_range(Ease::Linear, 10, 0.0, 10.0).unwrap();
    assert_eq!(t.at(5.0), 5.0);
}

#[test]
fn elastic_boundaries_are_exact() {
    let t = Tween::with_range(Ease::OutElastic, 10, 3.0, 7.0).unwrap();
    assert_eq!(t.at(0.0), 3.0);
    assert_eq!(t.at(10.0), 7.0);

    let unit = Tween::new(Ease::OutElastic, 10).unwrap();
    assert_eq!(unit.at(0.0), 0.0);
    assert_eq!(unit.at(10.0), 1.0);
}

#[test]
fn elastic_with_zero_span_holds_the_start_value() {
    let t = Tween::with_range(Ease::OutElastic, 10, 4.0, 4.0).unwrap();
    assert!(t.generate().all(|v| v == 4.0));
}

#[test]
fn curves_match_their_reference_formulas() {
    let (b, c, d) = (2.0, 5.0, 10.0);
    let t = 3.0;

    assert_eq!(Ease::Linear.apply(t, b, c, d), c * (t / d) + b);
    assert_eq!(Ease::InQuad.apply(t, b, c, d), c * (t / d) * (t / d) + b);
    assert_eq!(
        Ease::InSine.apply(t, b, c, d),
        -c * ((t / d) * (PI / 2.0)).cos() + c + b
    );

    let half = t / (d / 2.0);
    assert_eq!(Ease::OutCubic.apply(t, b, c, d), c / 2.0 * half * half * half + b);

    // 5 / 10 falls in the second bounce segment.
    let u = 5.0 / d - 1.5 / 2.75;
    assert_eq!(
        Ease::OutBounce.apply(5.0, b, c, d),
        c * (7.5625 * u * u + 0.75) + b
    );

    let p = d * 0.3;
    let s = p / (2.0 * PI) * 1f64.asin();
    let n = t / d;
    assert_eq!(
        Ease::OutElastic.apply(t, b, c, d),
        c * 2f64.powf(-10.0 * n) * ((n * d - s) * (2.0 * PI) / p).sin() + c + b
    );
}

#[test]
fn curves_start_at_the_start_value() {
    for ease in Ease::ALL {
        let t = Tween::with_range(ease, 20, -1.0, 3.0).unwrap();
        assert!(close(t.at(0.0), -1.0), "{ease:?}");
    }
}

#[test]
fn curves_end_near_the_end_value() {
    for ease in Ease::ALL {
        let t = Tween::with_range(ease, 20, -1.0, 3.0).unwrap();
        assert!(close(t.at(20.0), 3.0), "{ease:?}: {}", t.at(20.0));
    }
}

#[test]
fn out_cubic_is_continuous_at_the_pivot() {
    let d = 10.0;
    let f = |t: f64| Ease::OutCubic.apply(t, 0.0, 1.0, d);
    let h = 1e-6;

    // Both sides approach the pivot value within O(h).
    assert!(close(f(5.0), 0.5));
    assert!((f(5.0 - h) - f(5.0)).abs() < 1e-5);
    assert!((f(5.0 + h) - f(5.0)).abs() < 1e-5);

    let left_slope = (f(5.0) - f(5.0 - h)) / h;
    let right_slope = (f(5.0 + h) - f(5.0)) / h;
    assert!((left_slope - right_slope).abs() < 1e-4);
}

#[test]
fn out_bounce_segments_meet_at_thresholds() {
    let d = 2.75;
    let f = |t: f64| Ease::OutBounce.apply(t, 0.0, 1.0, d);
    let h = 1e-9;
    for edge in [1.0, 2.0, 2.5] {
        assert!((f(edge - h) - f(edge + h)).abs() < 1e-6, "edge {edge}");
    }
}

#[test]
fn generate_yields_duration_values_and_restarts() {
    let t = Tween::with_range(Ease::InQuad, 7, 0.0, 49.0).unwrap();
    let a: Vec<f64> = t.generate().collect();
    let b: Vec<f64> = t.generate().collect();
    assert_eq!(a.len(), 7);
    assert_eq!(t.generate().len(), 7);
    assert_eq!(a, b);
    assert_eq!(a[0], 0.0);
    assert!(close(a[6], 36.0));
}

#[test]
fn zero_duration_is_rejected() {
    assert!(matches!(
        Tween::new(Ease::Linear, 0),
        Err(DynfigureError::Validation(_))
    ));
}

#[test]
fn ease_names_round_trip_through_serde() {
    let e: Ease = serde_json::from_str("\"OutBounce\"").unwrap();
    assert_eq!(e, Ease::OutBounce);
}
