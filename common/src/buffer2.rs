//! Row-major 2D grid used for scalar fields and per-pixel vectors.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2<T> {
    values: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, values: Vec<T>) -> Self {
        assert_eq!(
            values.len(),
            width * height,
            "values length must equal width * height"
        );
        Self {
            values,
            width,
            height,
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self::new(width, height, values)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn same_shape<U>(&self, other: &Buffer2<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.width && y < self.height);
        &self.values[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        debug_assert!(x < self.width && y < self.height);
        &mut self.values[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        &self.values[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        &mut self.values[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Applies `f` to every cell, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Buffer2<U> {
        Buffer2 {
            values: self.values.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            values: vec![value; width * height],
            width,
            height,
        }
    }
}

impl Buffer2<f32> {
    /// Largest value in the grid, `None` for an empty grid.
    pub fn max_value(&self) -> Option<f32> {
        self.values.iter().copied().reduce(f32::max)
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.values[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.values[y * self.width + x]
    }
}

impl<'a, T> IntoIterator for &'a Buffer2<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_fills_row_major() {
        let buf = Buffer2::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(buf.values(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(buf.row(1), &[10, 11, 12]);
        assert_eq!(buf[(2, 1)], 12);
    }

    #[test]
    #[should_panic(expected = "values length must equal width * height")]
    fn new_rejects_wrong_length() {
        Buffer2::new(2, 2, vec![1, 2, 3]);
    }

    #[test]
    fn map_keeps_shape() {
        let buf = Buffer2::new(2, 1, vec![1.0f32, -2.0]);
        let doubled = buf.map(|v| v * 2.0);
        assert!(doubled.same_shape(&buf));
        assert_eq!(doubled.values(), &[2.0, -4.0]);
    }

    #[test]
    fn max_value_handles_negatives_and_empty() {
        let buf = Buffer2::new(3, 1, vec![-5.0f32, -1.5, -3.0]);
        assert_eq!(buf.max_value(), Some(-1.5));

        let empty: Buffer2<f32> = Buffer2::new(0, 0, Vec::new());
        assert_eq!(empty.max_value(), None);
    }

    #[test]
    fn row_mut_writes_through() {
        let mut buf = Buffer2::new_filled(2, 2, 0u8);
        buf.row_mut(1)[0] = 7;
        assert_eq!(*buf.get(0, 1), 7);
        *buf.get_mut(1, 0) = 3;
        assert_eq!(buf[(1, 0)], 3);
    }
}
