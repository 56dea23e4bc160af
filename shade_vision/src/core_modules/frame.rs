// THEORY:
// A `Frame` is the borrowed, validated view of a decoded bitmap: the raw bytes plus
// the dimensions the caller claims they describe. Validation happens once, in
// `Frame::new`, so everything downstream can walk the bytes without re-checking the
// layout. The frame never copies or mutates the buffer; it only lends out read-only
// slices and `Pixel`s.
//
// `OwnedFrame` is the counterpart for crossing thread or task boundaries. It shares
// its bytes through an `Arc<[u8]>`, so cloning a frame for a worker is a refcount
// bump rather than a buffer copy.

use crate::core_modules::error::FrameError;
use crate::core_modules::pixel::{Byte, CHANNELS, Pixel};
use std::sync::Arc;

/// Number of bytes a `width` x `height` RGBA frame must occupy.
pub fn expected_len(width: u32, height: u32) -> Result<usize, FrameError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(FrameError::DimensionOverflow { width, height })
}

/// A read-only, row-major RGBA buffer whose length matches its dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    bytes: &'a [Byte],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    pub fn new(bytes: &'a [Byte], width: u32, height: u32) -> Result<Self, FrameError> {
        if bytes.is_empty() {
            return Err(FrameError::EmptyBuffer);
        }
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }
        let expected = expected_len(width, height)?;
        if bytes.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.bytes.len() / CHANNELS
    }

    pub fn as_bytes(&self) -> &'a [Byte] {
        self.bytes
    }

    /// Pixels in buffer order.
    pub fn pixels(self) -> impl Iterator<Item = Pixel> + 'a {
        self.bytes
            .chunks_exact(CHANNELS)
            .map(|rgba| Pixel::new(rgba[0], rgba[1], rgba[2], rgba[3]))
    }

    /// Splits the buffer into at most `count` contiguous runs of whole pixels.
    /// Every run except possibly the last holds the same number of pixels.
    pub fn bands(self, count: usize) -> impl Iterator<Item = &'a [Byte]> + 'a {
        let pixel_count = self.pixel_count();
        let count = count.clamp(1, pixel_count);
        let pixels_per_band = pixel_count.div_ceil(count);
        self.bytes.chunks(pixels_per_band * CHANNELS)
    }
}

/// An owned frame snapshot that can be handed to other threads or tasks.
#[derive(Debug, Clone)]
pub struct OwnedFrame {
    pub data: Arc<[Byte]>,
    pub width: u32,
    pub height: u32,
}

impl OwnedFrame {
    pub fn new(data: impl Into<Arc<[Byte]>>, width: u32, height: u32) -> Self {
        Self {
            data: data.into(),
            width,
            height,
        }
    }

    /// Borrows the snapshot as a validated `Frame`.
    pub fn view(&self) -> Result<Frame<'_>, FrameError> {
        Frame::new(&self.data, self.width, self.height)
    }
}
