// THEORY:
// The `classifier` module is the public face of the crate. It answers one question
// about a decoded bitmap: is it "dark" enough that light foreground content should be
// drawn over it?
//
// The answer is a counting problem, not a statistics problem. Each pixel is either
// below the luminance cutoff or not; once strictly more than `floor(pixels * budget)`
// pixels are below it, the image is dark and the scan stops. No histogram, no mean.
// An unambiguously dark image therefore terminates after visiting a fraction of its
// pixels, which matters because callers run this synchronously next to UI code.
//
// Two entry points share the same scan:
// - `is_dark` is the fail-soft contract: any buffer that cannot be read as a frame
//   classifies as "not dark", and no error ever reaches the caller.
// - `classify` returns a `Verdict` that keeps the counts and the reason a buffer was
//   rejected, for callers and tests that want to see why.

use crate::core_modules::error::{ConfigError, FrameError};
use crate::core_modules::frame::Frame;
use crate::core_modules::pixel::{CHANNELS, Luminance, Pixel, luminance};
use log::{debug, trace};

/// Pixels whose luminance falls below this value count as dark.
pub const DEFAULT_LUMINANCE_CUTOFF: Luminance = 150.0;
/// Fraction of all pixels that may be dark before the whole image is dark.
pub const DEFAULT_DARK_PIXEL_BUDGET: f64 = 0.45;

const MAX_LUMINANCE: Luminance = 255.0;

/// Policy constants for the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Per-pixel cutoff on the 0..255 luminance scale. Strictly below is dark.
    pub luminance_cutoff: Luminance,
    /// Fraction (0..=1) of the pixel count that the dark count must exceed.
    pub dark_pixel_budget: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            luminance_cutoff: DEFAULT_LUMINANCE_CUTOFF,
            dark_pixel_budget: DEFAULT_DARK_PIXEL_BUDGET,
        }
    }
}

impl ClassifierConfig {
    pub fn new(luminance_cutoff: Luminance, dark_pixel_budget: f64) -> Result<Self, ConfigError> {
        let config = Self {
            luminance_cutoff,
            dark_pixel_budget,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_luminance_cutoff(self, luminance_cutoff: Luminance) -> Result<Self, ConfigError> {
        Self::new(luminance_cutoff, self.dark_pixel_budget)
    }

    pub fn with_dark_pixel_budget(self, dark_pixel_budget: f64) -> Result<Self, ConfigError> {
        Self::new(self.luminance_cutoff, dark_pixel_budget)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.luminance_cutoff.is_finite() || !(0.0..=MAX_LUMINANCE).contains(&self.luminance_cutoff) {
            return Err(ConfigError::CutoffOutOfRange(self.luminance_cutoff));
        }
        if !self.dark_pixel_budget.is_finite() || !(0.0..=1.0).contains(&self.dark_pixel_budget) {
            return Err(ConfigError::BudgetOutOfRange(self.dark_pixel_budget));
        }
        Ok(())
    }

    /// The dark-pixel count a frame of `pixel_count` pixels must strictly exceed.
    pub fn dark_pixel_threshold(&self, pixel_count: usize) -> usize {
        (pixel_count as f64 * self.dark_pixel_budget).floor() as usize
    }

    #[inline]
    pub fn is_dark_rgb(&self, red: u8, green: u8, blue: u8) -> bool {
        luminance(red, green, blue) < self.luminance_cutoff
    }

    pub fn is_dark_pixel(&self, pixel: &Pixel) -> bool {
        pixel.luminance() < self.luminance_cutoff
    }
}

/// Outcome of classifying one buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The dark count exceeded the threshold after `scanned_pixels` pixels.
    Dark {
        dark_pixels: usize,
        scanned_pixels: usize,
    },
    /// The whole frame was scanned without exceeding the threshold.
    Light { dark_pixels: usize },
    /// The buffer could not be read as a frame; treated as not dark.
    Unreadable(FrameError),
}

impl Verdict {
    pub fn is_dark(&self) -> bool {
        matches!(self, Verdict::Dark { .. })
    }
}

/// Decides whether decoded RGBA bitmaps are predominantly dark.
#[derive(Debug, Clone, Default)]
pub struct DarknessClassifier {
    config: ClassifierConfig,
}

impl DarknessClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Fail-soft check: malformed or empty input yields `false`.
    pub fn is_dark(&self, bytes: &[u8], width: u32, height: u32) -> bool {
        self.classify(bytes, width, height).is_dark()
    }

    pub fn classify(&self, bytes: &[u8], width: u32, height: u32) -> Verdict {
        match Frame::new(bytes, width, height) {
            Ok(frame) => self.classify_frame(&frame),
            Err(error) => {
                debug!("treating {width}x{height} buffer as not dark: {error}");
                Verdict::Unreadable(error)
            }
        }
    }

    /// Early-exit scan over an already validated frame.
    pub fn classify_frame(&self, frame: &Frame<'_>) -> Verdict {
        let threshold = self.config.dark_pixel_threshold(frame.pixel_count());
        let mut dark_pixels = 0usize;

        for (index, rgba) in frame.as_bytes().chunks_exact(CHANNELS).enumerate() {
            if self.config.is_dark_rgb(rgba[0], rgba[1], rgba[2]) {
                dark_pixels += 1;
                if dark_pixels > threshold {
                    trace!(
                        "dark after {} of {} pixels (threshold {threshold})",
                        index + 1,
                        frame.pixel_count()
                    );
                    return Verdict::Dark {
                        dark_pixels,
                        scanned_pixels: index + 1,
                    };
                }
            }
        }

        Verdict::Light { dark_pixels }
    }

    /// Full scan without early exit. `count > threshold` agrees with `classify_frame`.
    pub fn count_dark_pixels(&self, frame: &Frame<'_>) -> usize {
        frame
            .pixels()
            .filter(|pixel| self.config.is_dark_pixel(pixel))
            .count()
    }
}
