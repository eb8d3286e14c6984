use std::collections::HashMap;

use color_quant::NeuQuant;

use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::backend::Bitmap;

/// Colors in the shared palette.
pub const PALETTE_SIZE: usize = 256;
/// Inclusive NeuQuant sampling factor range; 1 is slowest and most faithful.
pub const PALETTE_QUALITY_RANGE: (i32, i32) = (1, 30);
/// Default sampling factor.
pub const DEFAULT_PALETTE_QUALITY: i32 = 10;
/// Most frames sampled when learning the palette.
pub const MAX_SAMPLE_FRAMES: usize = 16;

/// One reduced color table shared by every frame of an animation.
///
/// Quantization is lossy: each input color maps to its nearest learned palette entry.
pub struct SharedPalette {
    quant: NeuQuant,
    rgb: Vec<u8>,
    lookup: HashMap<[u8; 4], u8>,
}

pub(crate) fn validate_quality(quality: i32) -> CountdownResult<()> {
    let (lo, hi) = PALETTE_QUALITY_RANGE;
    if !(lo..=hi).contains(&quality) {
        return Err(CountdownError::validation(format!(
            "palette quality must be within [{lo}, {hi}], got {quality}"
        )));
    }
    Ok(())
}

/// Learn a palette from a representative subset of `frames`.
///
/// At most [`MAX_SAMPLE_FRAMES`] frames, evenly spread over the sequence, are sampled.
pub fn quantize_shared_palette(frames: &[Bitmap], quality: i32) -> CountdownResult<SharedPalette> {
    validate_quality(quality)?;
    if frames.is_empty() {
        return Err(CountdownError::encoding(
            "cannot learn a palette from zero frames",
        ));
    }

    let step = frames.len().div_ceil(MAX_SAMPLE_FRAMES);
    let sampled: Vec<&Bitmap> = frames.iter().step_by(step).collect();
    let mut samples = Vec::with_capacity(sampled.iter().map(|f| f.data().len()).sum());
    for frame in &sampled {
        samples.extend_from_slice(frame.data());
    }

    let quant = NeuQuant::new(quality, PALETTE_SIZE, &samples);
    let rgb = quant.color_map_rgb();
    tracing::debug!(
        sampled_frames = sampled.len(),
        colors = rgb.len() / 3,
        "learned shared palette"
    );
    Ok(SharedPalette {
        quant,
        rgb,
        lookup: HashMap::new(),
    })
}

impl SharedPalette {
    /// Packed `r, g, b` triples.
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.rgb.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.rgb.is_empty()
    }

    /// Map every pixel of `frame` to its palette index.
    pub fn index_frame(&mut self, frame: &Bitmap) -> Vec<u8> {
        let Self { quant, lookup, .. } = self;
        frame
            .data()
            .chunks_exact(4)
            .map(|px| {
                *lookup
                    .entry([px[0], px[1], px[2], px[3]])
                    .or_insert_with(|| quant.index_of(px) as u8)
            })
            .collect()
    }

    /// Palette color at `index`.
    pub fn color(&self, index: u8) -> Option<[u8; 3]> {
        let i = usize::from(index) * 3;
        let c = self.rgb.get(i..i + 3)?;
        Some([c[0], c[1], c[2]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/palette.rs"]
mod tests;
