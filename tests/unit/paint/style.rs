use super::*;

#[test]
fn defaults_are_thin_and_opaque() {
    let s = Style::default();
    assert_eq!(s.line_width, 1.0);
    assert_eq!(s.opacity, 255);
    assert!(s.pen().is_none());
    assert!(s.brush().is_none());
}

#[test]
fn parse_resolves_both_colors() {
    let s = Style::parse(Some("red"), Some("red!0.5!white")).unwrap();
    assert_eq!(s.color, Some(Color::rgb(255, 0, 0)));
    assert_eq!(s.fill_color, Some(Color::rgba(255, 127, 127, 255)));
    assert!(Style::parse(Some("nope"), None).is_err());
}

#[test]
fn pen_and_brush_follow_style_fields() {
    let s = Style::new()
        .with_color(Color::BLACK)
        .with_fill(Color::rgb(0, 0, 255))
        .with_line_width(3.0)
        .with_opacity(128);
    assert_eq!(
        s.pen(),
        Some(Pen {
            color: Color::BLACK,
            width: 3.0
        })
    );
    assert_eq!(
        s.brush(),
        Some(Brush {
            color: Color::rgba(0, 0, 255, 128)
        })
    );
}

#[test]
fn copies_do_not_share_edits() {
    let template = Style::new().with_color(Color::BLACK);
    let mut copy = template;
    copy.line_width = 9.0;
    copy.color = Some(Color::WHITE);
    assert_eq!(template.line_width, 1.0);
    assert_eq!(template.color, Some(Color::BLACK));
}

#[test]
fn display_lists_set_fields() {
    let s = Style::new().with_color(Color::BLACK);
    assert_eq!(s.to_string(), "draw=#000000ff, line width=1, opacity=255");
}

#[test]
fn deserializes_with_defaults() {
    let s: Style = serde_json::from_str(r#"{"color":"red","line_width":2.5}"#).unwrap();
    assert_eq!(s.color, Some(Color::rgb(255, 0, 0)));
    assert_eq!(s.fill_color, None);
    assert_eq!(s.line_width, 2.5);
    assert_eq!(s.opacity, 255);
}
