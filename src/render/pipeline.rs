use std::collections::HashMap;

use rayon::prelude::*;

use crate::eval::remaining::{RemainingDuration, frame_instant_ms, remaining_at};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CountdownError, CountdownResult};
use crate::render::backend::Bitmap;
use crate::render::cpu::CpuRasterizer;
use crate::request::model::RenderRequest;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Threading controls for multi-frame rendering.
pub struct RenderThreading {
    /// Rasterize frames in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Rasterize frames with identical remaining time only once.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            static_frame_elision: true,
        }
    }
}

impl RenderThreading {
    pub fn validate(&self) -> CountdownResult<()> {
        if self.threads == Some(0) {
            return Err(CountdownError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated rendering counters.
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

/// Evaluate and rasterize `frame_count` frames starting at `now_ms`, in frame order.
///
/// Frame `i` shows the time left at `now_ms + i` seconds. Parallel mode only changes who
/// rasterizes; the returned order and pixels are identical to sequential mode.
#[tracing::instrument(skip(request, threading))]
pub fn render_frames(
    request: &RenderRequest,
    now_ms: i64,
    frame_count: u64,
    threading: &RenderThreading,
) -> CountdownResult<(Vec<Bitmap>, RenderStats)> {
    threading.validate()?;

    let evals: Vec<RemainingDuration> = (0..frame_count)
        .map(|i| remaining_at(request.target_ms, frame_instant_ms(now_ms, FrameIndex(i))))
        .collect();

    let mut unique_indices = Vec::<usize>::with_capacity(evals.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(evals.len());
    if threading.static_frame_elision {
        let mut first = HashMap::<RemainingDuration, usize>::new();
        for (idx, eval) in evals.iter().enumerate() {
            if let Some(existing) = first.get(eval).copied() {
                frame_to_unique.push(existing);
            } else {
                let slot = unique_indices.len();
                unique_indices.push(idx);
                first.insert(*eval, slot);
                frame_to_unique.push(slot);
            }
        }
    } else {
        for idx in 0..evals.len() {
            frame_to_unique.push(idx);
            unique_indices.push(idx);
        }
    }

    let unique_frames = if threading.parallel && unique_indices.len() > 1 {
        let pool = build_thread_pool(threading.threads)?;
        let rendered = pool.install(|| {
            unique_indices
                .par_iter()
                .map_init(CpuRasterizer::new, |raster, &eval_idx| {
                    raster.rasterize(&evals[eval_idx], request)
                })
                .collect::<Vec<_>>()
        });
        rendered.into_iter().collect::<CountdownResult<Vec<_>>>()?
    } else {
        let mut raster = CpuRasterizer::new();
        unique_indices
            .iter()
            .map(|&eval_idx| raster.rasterize(&evals[eval_idx], request))
            .collect::<CountdownResult<Vec<_>>>()?
    };

    let stats = RenderStats {
        frames_total: frame_count,
        frames_rendered: unique_frames.len() as u64,
        frames_elided: frame_count.saturating_sub(unique_frames.len() as u64),
    };
    tracing::debug!(
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "rasterized countdown frames"
    );

    Ok((expand_unique(unique_frames, &frame_to_unique)?, stats))
}

fn expand_unique(unique: Vec<Bitmap>, frame_to_unique: &[usize]) -> CountdownResult<Vec<Bitmap>> {
    let mut remaining = vec![0usize; unique.len()];
    for &u in frame_to_unique {
        remaining[u] += 1;
    }

    let mut unique = unique.into_iter().map(Some).collect::<Vec<_>>();
    let mut out = Vec::<Bitmap>::with_capacity(frame_to_unique.len());
    for &u in frame_to_unique {
        let frame = if remaining[u] == 1 {
            unique[u].take()
        } else {
            unique[u].clone()
        };
        out.push(frame.ok_or_else(|| {
            CountdownError::Other(anyhow::anyhow!("unique frame {u} missing during expansion"))
        })?);
        remaining[u] -= 1;
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> CountdownResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        CountdownError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
