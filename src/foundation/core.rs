use crate::foundation::error::{CountdownError, CountdownResult};

/// Height-to-width ratio of every countdown canvas.
pub const HEIGHT_RATIO: f64 = 0.28;

/// Absolute 0-based frame index within one animation loop.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas for a countdown of `width` pixels; the height is always derived.
    pub fn for_width(width: u32) -> Self {
        Self {
            width,
            height: (f64::from(width) * HEIGHT_RATIO).round() as u32,
        }
    }

    /// Dimensions as `u16`, the size type of the raster backend.
    pub fn to_u16(self) -> CountdownResult<(u16, u16)> {
        let w = u16::try_from(self.width)
            .map_err(|_| CountdownError::validation("canvas width exceeds u16"))?;
        let h = u16::try_from(self.height)
            .map_err(|_| CountdownError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Number of bytes of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Opaque sRGB color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Straight-alpha RGBA8 with the given alpha.
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Fully opaque straight RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.with_alpha(255)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
