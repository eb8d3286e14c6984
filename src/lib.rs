//! countdown-gif renders a digital countdown to a target instant as a looping animated GIF.
//!
//! The public API is session-oriented:
//!
//! - Build a [`RenderRequest`] directly, or from loose user input via [`CountdownParams`]
//! - Create a [`CountdownSession`]
//! - Render single frames, every frame of the loop, or the encoded GIF
//!
//! Nothing in the pipeline reads the clock: `now_ms` is always an argument, so output for a fixed
//! `(request, now_ms)` is byte-for-byte reproducible.
#![forbid(unsafe_code)]

mod foundation;

/// Animated GIF encoding.
pub mod encode;
pub(crate) mod eval;
/// Frame rasterization.
pub mod render;
pub(crate) mod request;
/// Session-oriented rendering API.
pub mod session;

pub use crate::foundation::core::{Canvas, FrameIndex, HEIGHT_RATIO, Rgb8};
pub use crate::foundation::error::{CountdownError, CountdownResult};

pub use crate::encode::gif::{EncodedAnimation, GifEncodeOpts, encode_gif};
pub use crate::encode::palette::{SharedPalette, quantize_shared_palette};
pub use crate::eval::remaining::{RemainingDuration, frame_instant_ms, remaining_at};
pub use crate::render::backend::Bitmap;
pub use crate::render::cpu::rasterize;
pub use crate::render::layout::StyleDerivedLayout;
pub use crate::render::pipeline::{RenderStats, RenderThreading, render_frames};
pub use crate::request::model::{
    DEFAULT_BACKGROUND, DEFAULT_FONT_SIZE, DEFAULT_FOREGROUND, DEFAULT_WIDTH_PX, FONT_SIZE_RANGE,
    Labels, RenderRequest, WIDTH_RANGE_PX,
};
pub use crate::request::params::{CountdownParams, InstantDef, NumberDef, parse_instant_ms};
pub use crate::session::render_session::{CountdownSession, RenderOptions, render_countdown_gif};
