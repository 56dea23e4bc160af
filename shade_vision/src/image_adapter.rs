// Bridges `image::RgbaImage` into the classifier without copying its pixels.
// `RgbaImage` already stores row-major RGBA8 bytes, which is exactly the frame layout.

use crate::classifier::{DarknessClassifier, Verdict};
use crate::core_modules::frame::OwnedFrame;
use image::RgbaImage;

impl DarknessClassifier {
    pub fn classify_image(&self, image: &RgbaImage) -> Verdict {
        self.classify(image.as_raw(), image.width(), image.height())
    }
}

impl OwnedFrame {
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height)
    }
}

/// Default-policy check for an already decoded image.
pub fn is_dark_image(image: &RgbaImage) -> bool {
    DarknessClassifier::default().classify_image(image).is_dark()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn solid_images() {
        let black = RgbaImage::from_pixel(16, 9, Rgba([0, 0, 0, 255]));
        let white = RgbaImage::from_pixel(16, 9, Rgba([255, 255, 255, 255]));
        assert!(is_dark_image(&black));
        assert!(!is_dark_image(&white));
    }

    #[test]
    fn split_image_around_threshold() {
        // 10x10 with the top rows dark: 40 dark pixels then 50.
        let mostly_light = RgbaImage::from_fn(10, 10, |_, y| {
            if y < 4 { Rgba([0, 0, 0, 255]) } else { Rgba([255, 255, 255, 255]) }
        });
        let half_dark = RgbaImage::from_fn(10, 10, |_, y| {
            if y < 5 { Rgba([0, 0, 0, 255]) } else { Rgba([255, 255, 255, 255]) }
        });
        assert!(!is_dark_image(&mostly_light));
        assert!(is_dark_image(&half_dark));
    }

    #[test]
    fn empty_image_is_unreadable() {
        let empty = RgbaImage::new(0, 0);
        assert!(matches!(
            DarknessClassifier::default().classify_image(&empty),
            Verdict::Unreadable(_)
        ));
        assert!(!is_dark_image(&empty));
    }

    #[test]
    fn owned_frame_keeps_dimensions() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let frame = OwnedFrame::from_image(image);
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.data.len(), 24);
    }
}
