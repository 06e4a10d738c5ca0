//! Boolean pixel masks and element-wise mask algebra.

use crate::{check_same_shape, ShapeError};

/// `height x width` grid of booleans, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<bool>,
}

impl Mask {
    /// Mask with every entry set to `value`.
    pub fn filled(width: usize, height: usize, value: bool) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Evaluate `pred(x, y)` at every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut pred: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(pred(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Evaluate `pred` on every element of a row-major buffer of the same shape.
    pub fn from_values<T: Copy>(
        width: usize,
        height: usize,
        values: &[T],
        pred: impl Fn(T) -> bool,
    ) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            data: values.iter().map(|&v| pred(v)).collect(),
        }
    }

    /// `(height, width)` of the mask.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.data[y * self.width + x] = value;
    }

    /// Element-wise conjunction with a mask of identical shape.
    pub fn and(&self, other: &Mask) -> Result<Mask, ShapeError> {
        let mut out = self.clone();
        out.and_assign(other)?;
        Ok(out)
    }

    /// In-place element-wise conjunction.
    pub fn and_assign(&mut self, other: &Mask) -> Result<(), ShapeError> {
        check_same_shape(self.shape(), other.shape())?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a &= b;
        }
        Ok(())
    }

    /// Conjunction of every mask in `masks`; all must share one shape.
    ///
    /// Returns `None` for an empty list.
    pub fn all_of(masks: &[&Mask]) -> Option<Result<Mask, ShapeError>> {
        let (first, rest) = masks.split_first()?;
        let mut out = (*first).clone();
        for m in rest {
            if let Err(e) = out.and_assign(m) {
                return Some(Err(e));
            }
        }
        Some(Ok(out))
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Coordinates `(x, y)` of set pixels in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(move |(i, _)| (i % w, i / w))
    }

    /// 0/1 view of the mask.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| u8::from(v)).collect()
    }
}
