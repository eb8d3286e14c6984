//! Frame rasterization.
//!
//! A frame is a pure function of a [`RemainingDuration`](crate::RemainingDuration) and a
//! [`RenderRequest`](crate::RenderRequest): every call paints a fresh [`Bitmap`] from a blank
//! background, so independent frames can be rasterized on any thread.

/// Rendered frame buffer.
pub mod backend;
/// CPU rasterizer.
pub mod cpu;
/// Tile geometry.
pub mod layout;
/// Multi-frame rendering.
pub mod pipeline;
pub(crate) mod text;

pub use backend::Bitmap;
pub use cpu::{CpuRasterizer, TILE_FILL, rasterize};
pub use layout::StyleDerivedLayout;
pub use pipeline::{RenderStats, RenderThreading, render_frames};
