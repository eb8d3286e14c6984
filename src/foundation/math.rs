/// Composite one premultiplied channel with coverage `a` over an opaque backdrop channel.
pub(crate) fn flatten_premul_u8(c: u8, a: u8, backdrop: u8) -> u8 {
    let under = (u32::from(backdrop) * u32::from(255 - a) + 127) / 255;
    (u32::from(c) + under).min(255) as u8
}

/// Round a non-negative pixel measure to the nearest integer, halves up.
pub(crate) fn round_px(v: f64) -> u32 {
    v.max(0.0).round() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
