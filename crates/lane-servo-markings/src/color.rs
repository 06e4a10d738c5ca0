//! Colour-space preparation: 8-bit HSV for colour filtering and BT.601 grey
//! for gradient analysis.

use lane_servo_core::{FrameView, GrayImage, Hsv, HsvImage, ShapeError};

// BT.601 luma weights in 14-bit fixed point.
const GRAY_SHIFT: u32 = 14;
const GRAY_R: u32 = 4899;
const GRAY_G: u32 = 9617;
const GRAY_B: u32 = 1868;

/// Colour representations derived from one frame.
#[derive(Clone, Debug)]
pub struct PreparedFrame {
    pub hsv: HsvImage,
    pub gray: GrayImage,
}

/// Grey level of one `[r, g, b]` pixel.
#[inline]
pub fn rgb_to_gray(px: [u8; 3]) -> u8 {
    let [r, g, b] = px.map(u32::from);
    let y = (r * GRAY_R + g * GRAY_G + b * GRAY_B + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT;
    y.min(255) as u8
}

/// 8-bit HSV of one `[r, g, b]` pixel.
///
/// Hue is half the hexcone angle (`0..180`); saturation and value span `0..=255`.
#[inline]
pub fn rgb_to_hsv(px: [u8; 3]) -> Hsv {
    let [r, g, b] = px.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { 255.0 * delta / v } else { 0.0 };

    let hue_deg = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let hue_deg = if hue_deg < 0.0 { hue_deg + 360.0 } else { hue_deg };

    let mut h = (hue_deg / 2.0).round() as u32;
    if h >= 180 {
        h -= 180;
    }

    Hsv::new(h as u8, s.round() as u8, v as u8)
}

pub fn to_hsv(frame: &FrameView<'_>) -> Result<HsvImage, ShapeError> {
    frame.validate()?;
    Ok(HsvImage {
        width: frame.width,
        height: frame.height,
        data: frame.rgb_pixels().map(rgb_to_hsv).collect(),
    })
}

pub fn to_gray(frame: &FrameView<'_>) -> Result<GrayImage, ShapeError> {
    frame.validate()?;
    Ok(GrayImage {
        width: frame.width,
        height: frame.height,
        data: frame.rgb_pixels().map(rgb_to_gray).collect(),
    })
}

/// Run both conversions in one pass over the frame.
pub fn prepare(frame: &FrameView<'_>) -> Result<PreparedFrame, ShapeError> {
    frame.validate()?;
    let n = frame.width * frame.height;
    let mut hsv = Vec::with_capacity(n);
    let mut gray = Vec::with_capacity(n);
    for px in frame.rgb_pixels() {
        hsv.push(rgb_to_hsv(px));
        gray.push(rgb_to_gray(px));
    }
    Ok(PreparedFrame {
        hsv: HsvImage {
            width: frame.width,
            height: frame.height,
            data: hsv,
        },
        gray: GrayImage {
            width: frame.width,
            height: frame.height,
            data: gray,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_servo_core::{ChannelOrder, Frame};

    #[test]
    fn gray_uses_bt601_weights() {
        assert_eq!(rgb_to_gray([0, 0, 0]), 0);
        assert_eq!(rgb_to_gray([255, 255, 255]), 255);
        assert_eq!(rgb_to_gray([255, 0, 0]), 76);
        assert_eq!(rgb_to_gray([0, 255, 0]), 150);
        assert_eq!(rgb_to_gray([0, 0, 255]), 29);
    }

    #[test]
    fn hsv_primaries_and_greys() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), Hsv::new(0, 255, 255));
        assert_eq!(rgb_to_hsv([0, 255, 0]), Hsv::new(60, 255, 255));
        assert_eq!(rgb_to_hsv([0, 0, 255]), Hsv::new(120, 255, 255));
        assert_eq!(rgb_to_hsv([255, 255, 0]), Hsv::new(30, 255, 255));
        assert_eq!(rgb_to_hsv([128, 128, 128]), Hsv::new(0, 0, 128));
        assert_eq!(rgb_to_hsv([0, 0, 0]), Hsv::new(0, 0, 0));
    }

    #[test]
    fn hue_near_full_turn_wraps_to_zero() {
        // 359.x degrees rounds to 180, which wraps.
        assert_eq!(rgb_to_hsv([255, 0, 1]).h, 0);
        assert!(rgb_to_hsv([255, 0, 40]).h < 180);
    }

    #[test]
    fn lane_yellow_lands_in_yellow_hue_band() {
        let hsv = rgb_to_hsv([230, 200, 30]);
        assert_eq!(hsv, Hsv::new(26, 222, 230));
    }

    #[test]
    fn prepare_honours_channel_order() {
        let bgr = Frame::filled(2, 2, ChannelOrder::Bgr, [0, 0, 255]).unwrap();
        let rgb = Frame::filled(2, 2, ChannelOrder::Rgb, [255, 0, 0]).unwrap();
        let a = prepare(&bgr.view()).unwrap();
        let b = prepare(&rgb.view()).unwrap();
        assert_eq!(a.hsv, b.hsv);
        assert_eq!(a.gray, b.gray);
        assert_eq!(a.gray.data, vec![76; 4]);
        assert_eq!(to_hsv(&bgr.view()).unwrap(), a.hsv);
        assert_eq!(to_gray(&bgr.view()).unwrap(), a.gray);
    }

    #[test]
    fn empty_frame_is_a_shape_error() {
        let view = FrameView {
            width: 0,
            height: 3,
            order: ChannelOrder::Bgr,
            data: &[],
        };
        assert!(matches!(
            prepare(&view),
            Err(ShapeError::EmptyFrame { .. })
        ));
    }
}
