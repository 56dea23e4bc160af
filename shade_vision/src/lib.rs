// THEORY:
// This file is the entry point for the `shade_vision` library crate. The crate answers
// a single question about a decoded bitmap, "is it dark?", so UI code can choose light
// or dark foreground content without building a luminance histogram.
//
// The public API is the `DarknessClassifier` and its `ClassifierConfig`, plus the
// `is_dark` shortcut with the default policy. `core_modules` holds the building blocks
// (pixels, frame views, error types). `parallel` scales the same scan across threads
// or tasks, and `image_adapter` lets callers pass `image::RgbaImage` values directly.
//
// The crate never decodes images and never logs through anything but the `log` facade;
// binaries decide where log records go.

pub mod classifier;
pub mod core_modules;
pub mod image_adapter;
pub mod parallel;

pub use classifier::{
    ClassifierConfig, DEFAULT_DARK_PIXEL_BUDGET, DEFAULT_LUMINANCE_CUTOFF, DarknessClassifier, Verdict,
};
pub use core_modules::error::{ConfigError, FrameError};
pub use core_modules::frame::{Frame, OwnedFrame};
pub use core_modules::pixel::{Pixel, luminance};
pub use image_adapter::is_dark_image;
pub use parallel::{ParallelClassifier, classify_batch};

/// Returns `true` when more than 45% of the pixels in `bytes` have luminance below 150.
///
/// `bytes` is row-major RGBA8 (`width * height * 4` bytes). Any buffer that does not
/// match its dimensions, or is empty, yields `false`.
pub fn is_dark(bytes: &[u8], width: u32, height: u32) -> bool {
    DarknessClassifier::default().is_dark(bytes, width, height)
}
