// THEORY:
// The `Pixel` module is the smallest unit the classifier reasons about. A pixel is a
// "dumb" RGBA container plus the single heuristic the classifier needs from it:
// perceived brightness. Nothing here knows about neighbors, frames, or thresholds.
//
// Luminance uses the Rec. 601 luma weights over raw 0..255 channel values, in f64.
// No gamma decoding happens: the values are compared against a cutoff expressed on
// the same 0..255 scale, so linearizing would only shift where the cutoff lands.
// Alpha is carried for completeness and never read by the heuristic.

use crate::core_modules::error::FrameError;

pub type Byte = u8;
pub type Channel = Byte;
pub type Luminance = f64;

/// Bytes per pixel in every buffer this crate reads (R, G, B, A).
pub const CHANNELS: usize = 4;

const RED_WEIGHT: Luminance = 0.299;
const GREEN_WEIGHT: Luminance = 0.587;
const BLUE_WEIGHT: Luminance = 0.114;

/// Rec. 601 luma of an RGB triple on the 0..255 scale.
#[inline]
pub fn luminance(red: Channel, green: Channel, blue: Channel) -> Luminance {
    RED_WEIGHT * red as Luminance + GREEN_WEIGHT * green as Luminance + BLUE_WEIGHT * blue as Luminance
}

/// A "dumb" data container representing a single RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    /// The red channel value (0-255).
    pub red: Channel,
    /// The green channel value (0-255).
    pub green: Channel,
    /// The blue channel value (0-255).
    pub blue: Channel,
    /// The alpha (transparency) channel value (0-255). Ignored by `luminance`.
    pub alpha: Channel,
}

impl Pixel {
    pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn from_rgba(bytes: &[Byte; CHANNELS]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Opaque gray pixel, handy for building fixtures.
    pub fn gray(level: Channel) -> Self {
        Self::new(level, level, level, 255)
    }

    /// Perceived brightness on the 0..255 scale.
    pub fn luminance(&self) -> Luminance {
        luminance(self.red, self.green, self.blue)
    }

    pub fn to_bytes(self) -> [Byte; CHANNELS] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl TryFrom<&[Byte]> for Pixel {
    type Error = FrameError;

    fn try_from(bytes: &[Byte]) -> Result<Self, Self::Error> {
        let rgba: &[Byte; CHANNELS] = bytes.try_into().map_err(|_| FrameError::SizeMismatch {
            expected: CHANNELS,
            actual: bytes.len(),
        })?;
        Ok(Self::from_rgba(rgba))
    }
}

impl From<Pixel> for [Byte; CHANNELS] {
    fn from(pixel: Pixel) -> Self {
        pixel.to_bytes()
    }
}
