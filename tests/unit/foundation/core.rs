use super::*;

#[test]
fn canvas_height_is_derived_from_width() {
    assert_eq!(
        Canvas::for_width(400),
        Canvas {
            width: 400,
            height: 112
        }
    );
    assert_eq!(Canvas::for_width(200).height, 56);
    assert_eq!(Canvas::for_width(800).height, 224);
    // 0.28 * 333 = 93.24
    assert_eq!(Canvas::for_width(333).height, 93);
}

#[test]
fn canvas_rgba_len_matches_dimensions() {
    assert_eq!(Canvas::for_width(400).rgba_len(), 400 * 112 * 4);
}

#[test]
fn canvas_to_u16_rejects_oversized() {
    let c = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(c.to_u16().is_err());
    assert_eq!(Canvas::for_width(400).to_u16().unwrap(), (400, 112));
}

#[test]
fn rgb8_alpha_helpers() {
    let c = Rgb8::new(0x25, 0x63, 0xeb);
    assert_eq!(c.to_rgba8(), [0x25, 0x63, 0xeb, 0xff]);
    assert_eq!(c.with_alpha(0x88), [0x25, 0x63, 0xeb, 0x88]);
}
