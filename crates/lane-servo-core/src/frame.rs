use serde::{Deserialize, Serialize};

use crate::ShapeError;

/// Number of interleaved channels in every frame.
pub const FRAME_CHANNELS: usize = 3;

/// Order of the three interleaved 8-bit channels in a frame buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrder {
    /// Blue, green, red (camera driver convention).
    #[default]
    Bgr,
    /// Red, green, blue (decoded image convention).
    Rgb,
}

impl ChannelOrder {
    /// Reorder one raw pixel into `[r, g, b]`.
    #[inline]
    pub fn to_rgb(self, px: [u8; 3]) -> [u8; 3] {
        match self {
            ChannelOrder::Bgr => [px[2], px[1], px[0]],
            ChannelOrder::Rgb => px,
        }
    }
}

/// Borrowed camera frame: `height` rows of `width` interleaved 3-channel pixels.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub order: ChannelOrder,
    pub data: &'a [u8], // row-major, len = w*h*3
}

impl<'a> FrameView<'a> {
    /// Build a validated view over an interleaved 3-channel buffer.
    pub fn new(
        width: usize,
        height: usize,
        order: ChannelOrder,
        data: &'a [u8],
    ) -> Result<Self, ShapeError> {
        Self::with_channels(width, height, FRAME_CHANNELS, order, data)
    }

    /// Build a validated view, checking the caller-declared channel count.
    pub fn with_channels(
        width: usize,
        height: usize,
        channels: usize,
        order: ChannelOrder,
        data: &'a [u8],
    ) -> Result<Self, ShapeError> {
        if channels != FRAME_CHANNELS {
            return Err(ShapeError::ChannelCount { got: channels });
        }
        let view = Self {
            width,
            height,
            order,
            data,
        };
        view.validate()?;
        Ok(view)
    }

    /// Check dimensions and buffer length.
    ///
    /// Views built through struct literals skip the constructor checks, so
    /// every consumer calls this before touching pixels.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.width == 0 || self.height == 0 {
            return Err(ShapeError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(FRAME_CHANNELS))
            .ok_or(ShapeError::FrameTooLarge {
                width: self.width,
                height: self.height,
            })?;
        if self.data.len() != expected {
            return Err(ShapeError::BufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    /// `(height, width)` of the frame.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Pixel at `(x, y)` as `[r, g, b]`.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * FRAME_CHANNELS;
        self.order
            .to_rgb([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Iterate pixels in row-major order as `[r, g, b]`.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        let order = self.order;
        self.data
            .chunks_exact(FRAME_CHANNELS)
            .map(move |px| order.to_rgb([px[0], px[1], px[2]]))
    }
}

/// Owned camera frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub order: ChannelOrder,
    pub data: Vec<u8>,
}

impl Frame {
    /// Frame with every pixel set to the same raw channel triple.
    pub fn filled(
        width: usize,
        height: usize,
        order: ChannelOrder,
        px: [u8; 3],
    ) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 {
            return Err(ShapeError::EmptyFrame { width, height });
        }
        let data = px.repeat(width * height);
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// Take ownership of an interleaved buffer after validating it.
    pub fn from_raw(
        width: usize,
        height: usize,
        order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self, ShapeError> {
        FrameView::new(width, height, order, &data)?;
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// Overwrite the raw channel triple at `(x, y)`.
    #[inline]
    pub fn put(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = (y * self.width + x) * FRAME_CHANNELS;
        self.data[i..i + FRAME_CHANNELS].copy_from_slice(&px);
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            width: self.width,
            height: self.height,
            order: self.order,
            data: &self.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_wrong_channels() {
        assert_eq!(
            FrameView::new(0, 4, ChannelOrder::Bgr, &[]).unwrap_err(),
            ShapeError::EmptyFrame {
                width: 0,
                height: 4
            }
        );
        let buf = [0u8; 16];
        assert_eq!(
            FrameView::with_channels(2, 2, 4, ChannelOrder::Bgr, &buf).unwrap_err(),
            ShapeError::ChannelCount { got: 4 }
        );
        assert_eq!(
            FrameView::new(2, 2, ChannelOrder::Bgr, &buf).unwrap_err(),
            ShapeError::BufferLength {
                expected: 12,
                got: 16
            }
        );
    }

    #[test]
    fn overflowing_dimensions_are_too_large() {
        let view = FrameView {
            width: usize::MAX / 2,
            height: 3,
            order: ChannelOrder::Bgr,
            data: &[],
        };
        assert_eq!(
            view.validate().unwrap_err(),
            ShapeError::FrameTooLarge {
                width: usize::MAX / 2,
                height: 3
            }
        );
    }

    #[test]
    fn channel_order_is_applied_on_read() {
        let mut frame = Frame::filled(2, 1, ChannelOrder::Bgr, [0, 0, 0]).unwrap();
        frame.put(1, 0, [10, 20, 30]);
        assert_eq!(frame.view().rgb(1, 0), [30, 20, 10]);

        let rgb = Frame::from_raw(1, 1, ChannelOrder::Rgb, vec![10, 20, 30]).unwrap();
        assert_eq!(rgb.view().rgb(0, 0), [10, 20, 30]);
        assert_eq!(rgb.view().rgb_pixels().count(), 1);
    }
}
