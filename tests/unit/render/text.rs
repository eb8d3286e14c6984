use super::*;

fn engine() -> TextEngine {
    TextEngine::new().unwrap()
}

#[test]
fn bundled_font_registers() {
    let e = engine();
    assert!(!e.family_name.is_empty());
}

#[test]
fn width_scales_with_size() {
    let mut e = engine();
    let a = e.measure("88", 36.0).unwrap();
    let b = e.measure("88", 72.0).unwrap();
    assert!(a > 0.0);
    assert!((b - 2.0 * a).abs() < 1.0, "{a} vs {b}");
}

#[test]
fn face_is_monospaced() {
    let mut e = engine();
    let one = e.measure("8", 36.0).unwrap();
    assert!((e.measure("11", 36.0).unwrap() - 2.0 * one).abs() < 0.5);
    assert!((e.measure("WM", 36.0).unwrap() - 2.0 * one).abs() < 0.5);
}

#[test]
fn fit_size_only_shrinks() {
    let mut e = engine();
    assert_eq!(e.fit_size("03", 36.0, 1000.0).unwrap(), 36.0);
    let s = e.fit_size("HEURES", 60.0, 40.0).unwrap();
    assert!(s < 60.0);
    assert!(e.measure("HEURES", s).unwrap() <= 40.5);
}

#[test]
fn placed_text_is_centered_on_the_anchor() {
    let mut e = engine();
    let anchor = Point::new(100.0, 50.0);
    let t = e
        .place("00", 36.0, 1000.0, anchor, VAlign::Middle, [1, 2, 3, 255])
        .unwrap();
    let w = f64::from(t.layout.width());
    let h = f64::from(t.layout.height());
    assert!((t.origin.x + w / 2.0 - 100.0).abs() < 1e-3);
    assert!((t.origin.y + h / 2.0 - 50.0).abs() < 1e-3);

    let top = e
        .place("SEC", 12.0, 1000.0, Point::new(40.0, 20.0), VAlign::Top, [0; 4])
        .unwrap();
    assert!((top.origin.y - 20.0).abs() < 1e-9);
}

#[test]
fn accented_and_lowercase_text_shapes() {
    let mut e = engine();
    let t = e
        .place(
            "Offre terminée",
            23.0,
            1000.0,
            Point::new(0.0, 0.0),
            VAlign::Middle,
            [0, 0, 0, 255],
        )
        .unwrap();
    let mut runs = 0;
    for line in t.layout.lines() {
        for item in line.items() {
            if let parley::layout::PositionedLayoutItem::GlyphRun(_) = item {
                runs += 1;
            }
        }
    }
    assert!(runs > 0);
}

#[test]
fn non_positive_size_is_rejected() {
    let mut e = engine();
    assert!(e.measure("1", 0.0).unwrap_err().is_validation());
    assert!(e.measure("1", f64::NAN).unwrap_err().is_validation());
}
