use std::borrow::Cow;

use crate::encode::palette::{DEFAULT_PALETTE_QUALITY, quantize_shared_palette, validate_quality};
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::backend::Bitmap;

/// Longest per-frame delay a GIF can express (65535 centiseconds).
pub const MAX_FRAME_DELAY_MS: u32 = 655_350;

/// Options for [`encode_gif`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifEncodeOpts {
    /// Display time of every frame, in milliseconds. GIF stores centiseconds, so the value is
    /// rounded to the nearest 10 ms.
    pub frame_delay_ms: u32,
    /// Write a loop-control block asking decoders to repeat forever.
    pub loop_forever: bool,
    /// NeuQuant sampling factor in `[1, 30]`; lower is slower and more faithful.
    pub palette_quality: i32,
}

impl Default for GifEncodeOpts {
    fn default() -> Self {
        Self {
            frame_delay_ms: 1_000,
            loop_forever: true,
            palette_quality: DEFAULT_PALETTE_QUALITY,
        }
    }
}

impl GifEncodeOpts {
    pub fn validate(&self) -> CountdownResult<()> {
        if !(5..=MAX_FRAME_DELAY_MS).contains(&self.frame_delay_ms) {
            return Err(CountdownError::validation(format!(
                "frame delay must be within [5, {MAX_FRAME_DELAY_MS}] ms, got {}",
                self.frame_delay_ms
            )));
        }
        validate_quality(self.palette_quality)
    }

    fn delay_centis(&self) -> u16 {
        let cs = (self.frame_delay_ms + 5) / 10;
        cs.clamp(1, u32::from(u16::MAX)) as u16
    }
}

/// A finished animated GIF.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedAnimation {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    frame_count: usize,
}

impl EncodedAnimation {
    /// Content type for transports.
    pub const MIME_TYPE: &'static str = "image/gif";

    /// Response headers that keep clients and proxies from caching a live countdown.
    pub const NO_CACHE_HEADERS: [(&'static str, &'static str); 3] = [
        ("Cache-Control", "no-cache, no-store, must-revalidate"),
        ("Pragma", "no-cache"),
        ("Expires", "0"),
    ];

    /// Encoded bytes, from the `GIF89a` signature through the trailer.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Logical screen width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical screen height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of image blocks.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

/// Encode `frames`, in order, into one animated GIF with a single global palette.
///
/// Fails with [`CountdownError::Encoding`] on an empty sequence and with
/// [`CountdownError::DimensionMismatch`] when a frame's size differs from the first frame's.
/// The output is a pure function of the inputs.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn encode_gif(frames: &[Bitmap], opts: &GifEncodeOpts) -> CountdownResult<EncodedAnimation> {
    let Some(first) = frames.first() else {
        return Err(CountdownError::encoding("no frames to encode"));
    };
    opts.validate()?;

    let expected = (first.width(), first.height());
    for (index, frame) in frames.iter().enumerate() {
        let found = (frame.width(), frame.height());
        if found != expected {
            return Err(CountdownError::DimensionMismatch {
                index,
                expected,
                found,
            });
        }
    }
    let (width, height) = first
        .canvas()
        .to_u16()
        .map_err(|e| CountdownError::encoding(format!("frame too large for GIF: {e}")))?;

    let mut palette = quantize_shared_palette(frames, opts.palette_quality)?;

    let mut encoder = gif::Encoder::new(Vec::new(), width, height, palette.rgb())
        .map_err(|e| CountdownError::encoding(format!("failed to write GIF header: {e}")))?;
    if opts.loop_forever {
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| CountdownError::encoding(format!("failed to write loop block: {e}")))?;
    }

    let delay = opts.delay_centis();
    for (index, frame) in frames.iter().enumerate() {
        let block = gif::Frame {
            width,
            height,
            delay,
            dispose: gif::DisposalMethod::Keep,
            buffer: Cow::Owned(palette.index_frame(frame)),
            ..gif::Frame::default()
        };
        encoder.write_frame(&block).map_err(|e| {
            CountdownError::encoding(format!("failed to write frame {index}: {e}"))
        })?;
    }

    let bytes = encoder
        .into_inner()
        .map_err(|e| CountdownError::encoding(format!("failed to finish GIF: {e}")))?;
    tracing::debug!(bytes = bytes.len(), "encoded countdown gif");

    Ok(EncodedAnimation {
        bytes,
        width: u32::from(width),
        height: u32::from(height),
        frame_count: frames.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
