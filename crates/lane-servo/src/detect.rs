use crate::core::{ChannelOrder, FrameView, Mask, ShapeError};
use crate::markings::{GroundMaskProvider, LaneMarkingDetector, LaneMarkings};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Borrow an `image::RgbImage` as a detector frame.
pub fn frame_from_rgb_image(img: &::image::RgbImage) -> FrameView<'_> {
    FrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        order: ChannelOrder::Rgb,
        data: img.as_raw(),
    }
}

/// Wrap a raw BGR buffer, as delivered by most camera drivers.
pub fn frame_from_bgr_slice(
    width: usize,
    height: usize,
    data: &[u8],
) -> Result<FrameView<'_>, ShapeError> {
    FrameView::new(width, height, ChannelOrder::Bgr, data)
}

/// Render a mask as an 8-bit image: 255 where set, 0 elsewhere.
pub fn mask_to_gray_image(mask: &Mask) -> ::image::GrayImage {
    ::image::GrayImage::from_fn(mask.width as u32, mask.height as u32, |x, y| {
        ::image::Luma([if mask.get(x as usize, y as usize) {
            255
        } else {
            0
        }])
    })
}

/// Run lane-marking detection on an `image::RgbImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, detector), fields(width = img.width(), height = img.height()))
)]
pub fn detect_lane_markings_image<G: GroundMaskProvider>(
    img: &::image::RgbImage,
    detector: &LaneMarkingDetector<G>,
) -> Result<LaneMarkings, ShapeError> {
    detector.detect(&frame_from_rgb_image(img))
}

/// Convenience overload using the default detector.
pub fn detect_lane_markings_image_default(
    img: &::image::RgbImage,
) -> Result<LaneMarkings, ShapeError> {
    detect_lane_markings_image(img, &LaneMarkingDetector::with_defaults())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn rgb_image_view_matches_layout() {
        let img = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
        let view = frame_from_rgb_image(&img);
        assert_eq!(view.shape(), (2, 3));
        assert_eq!(view.order, ChannelOrder::Rgb);
        assert_eq!(view.rgb(2, 1), [1, 2, 3]);
    }

    #[test]
    fn bgr_slice_is_validated() {
        let data = [0u8; 12];
        assert!(frame_from_bgr_slice(2, 2, &data).is_ok());
        assert!(frame_from_bgr_slice(3, 2, &data).is_err());
    }

    #[test]
    fn mask_renders_as_binary_image() {
        let mask = Mask::from_fn(3, 2, |x, y| x == y);
        let img = mask_to_gray_image(&mask);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(1, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 1).0, [255]);
    }
}
