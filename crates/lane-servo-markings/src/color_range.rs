use lane_servo_core::{Hsv, HsvImage, Mask};
use serde::{Deserialize, Serialize};

/// Inclusive per-channel HSV bounds.
///
/// Bounds above the channel range (hue above 179) are allowed and simply
/// never exclude anything on that channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, px: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&px.h)
            && (self.lower.s..=self.upper.s).contains(&px.s)
            && (self.lower.v..=self.upper.v).contains(&px.v)
    }

    /// Pixels of `img` inside the range.
    pub fn mask(&self, img: &HsvImage) -> Mask {
        Mask::from_values(img.width, img.height, &img.data, |px| self.contains(px))
    }
}
