//! Animated GIF encoding.
//!
//! Frames are quantized against one shared palette and written as a GIF89a stream.

/// GIF89a writer and encoder options.
pub mod gif;
/// Shared-palette quantization.
pub mod palette;
