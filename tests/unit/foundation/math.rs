use super::*;

#[test]
fn flatten_keeps_opaque_and_fills_clear_with_backdrop() {
    assert_eq!(flatten_premul_u8(200, 255, 7), 200);
    assert_eq!(flatten_premul_u8(0, 0, 7), 7);
    // Half coverage of 200 (premultiplied 100) over white.
    let out = flatten_premul_u8(100, 128, 255);
    assert!((i16::from(out) - 227).abs() <= 1, "{out}");
    // Nearly opaque edge pixels stay put.
    assert_eq!(flatten_premul_u8(254, 254, 255), 255);
}

#[test]
fn round_px_rounds_half_up_and_floors_negatives() {
    assert_eq!(round_px(2.5), 3);
    assert_eq!(round_px(2.49), 2);
    assert_eq!(round_px(-4.0), 0);
}
