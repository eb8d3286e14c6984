use crate::encode::gif::{EncodedAnimation, GifEncodeOpts, encode_gif};
use crate::eval::remaining::{frame_instant_ms, remaining_at};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::backend::Bitmap;
use crate::render::cpu::CpuRasterizer;
use crate::render::pipeline::{RenderStats, RenderThreading, render_frames};
use crate::request::model::RenderRequest;

/// Default number of one-second frames per animation loop.
pub const DEFAULT_FRAME_COUNT: u64 = 10;
/// Upper bound on frames per animation (two minutes of one-second frames).
pub const MAX_FRAME_COUNT: u64 = 120;

/// Options controlling a [`CountdownSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Frames per loop; frame `i` samples the countdown at `now + i` seconds.
    pub frame_count: u64,
    pub encode: GifEncodeOpts,
    pub threading: RenderThreading,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame_count: DEFAULT_FRAME_COUNT,
            encode: GifEncodeOpts::default(),
            threading: RenderThreading::default(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> CountdownResult<()> {
        if !(1..=MAX_FRAME_COUNT).contains(&self.frame_count) {
            return Err(CountdownError::validation(format!(
                "frame_count must be within [1, {MAX_FRAME_COUNT}], got {}",
                self.frame_count
            )));
        }
        self.encode.validate()?;
        self.threading.validate()
    }
}

/// Renderer bound to one validated request.
///
/// The session is a pure function of `(request, options, now_ms)`: it never reads the clock.
pub struct CountdownSession {
    request: RenderRequest,
    opts: RenderOptions,
    raster: CpuRasterizer,
}

impl CountdownSession {
    /// Validate `request` and `opts` and build a session.
    pub fn new(request: RenderRequest, opts: RenderOptions) -> CountdownResult<Self> {
        request.validate()?;
        opts.validate()?;
        Ok(Self {
            request,
            opts,
            raster: CpuRasterizer::new(),
        })
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    /// Render the single frame at `frame` for an animation starting at `now_ms`.
    pub fn render_frame(&mut self, now_ms: i64, frame: FrameIndex) -> CountdownResult<Bitmap> {
        if frame.0 >= self.opts.frame_count {
            return Err(CountdownError::validation(format!(
                "frame {} is outside the {}-frame animation",
                frame.0, self.opts.frame_count
            )));
        }
        let remaining = remaining_at(self.request.target_ms, frame_instant_ms(now_ms, frame));
        self.raster.rasterize(&remaining, &self.request)
    }

    /// Render every frame of the animation, in order.
    pub fn render_frames(&self, now_ms: i64) -> CountdownResult<(Vec<Bitmap>, RenderStats)> {
        render_frames(
            &self.request,
            now_ms,
            self.opts.frame_count,
            &self.opts.threading,
        )
    }

    /// Render the animation and encode it as a looping GIF.
    #[tracing::instrument(skip(self), fields(frames = self.opts.frame_count))]
    pub fn render_gif(&self, now_ms: i64) -> CountdownResult<EncodedAnimation> {
        let (frames, stats) = self.render_frames(now_ms)?;
        let anim = encode_gif(&frames, &self.opts.encode)?;
        tracing::info!(
            bytes = anim.len(),
            width = anim.width(),
            height = anim.height(),
            rendered = stats.frames_rendered,
            elided = stats.frames_elided,
            "rendered countdown gif"
        );
        Ok(anim)
    }
}

/// Render `request` as a 10-frame, one-second, infinitely looping GIF starting at `now_ms`.
pub fn render_countdown_gif(
    request: &RenderRequest,
    now_ms: i64,
) -> CountdownResult<EncodedAnimation> {
    CountdownSession::new(request.clone(), RenderOptions::default())?.render_gif(now_ms)
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
