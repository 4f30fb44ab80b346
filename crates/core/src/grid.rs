//! Main Grid type

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use std::fmt::Debug;

/// Trait for types that can be stored in a grid cell.
///
/// Bounds the element types used throughout the pipeline: continuous
/// truth fields and intensity images (`f32`/`f64`), boolean category
/// masks (`bool`), and label planes (`u8`, `usize`).
pub trait GridElement: Copy + Clone + Debug + Default + PartialEq + Send + Sync + 'static {}

impl GridElement for bool {}
impl GridElement for u8 {}
impl GridElement for u16 {}
impl GridElement for u32 {}
impl GridElement for i32 {}
impl GridElement for i64 {}
impl GridElement for usize {}
impl GridElement for f32 {}
impl GridElement for f64 {}

/// A 2-D pixel grid.
///
/// `Grid<T>` stores values of type `T` in row-major order. It backs the
/// continuous truth fields, the normalized intensity images and the
/// boolean category masks derived from them.
///
/// # Example
///
/// ```ignore
/// use spotset_core::Grid;
///
/// let mut grid: Grid<f64> = Grid::new(100, 100);
/// grid.set(10, 20, 0.8)?;
/// let value = grid.get(10, 20)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    /// Grid data stored in row-major order (row, col)
    data: Array2<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid filled with the element's default value
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), T::default()),
        }
    }

    /// Create a new grid filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a grid from existing data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a grid from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Create a grid with the same dimensions, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: Array2::from_elem(self.data.dim(), fill_value),
        }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Pad the grid by `pad` cells on every edge, mirroring values
    /// across the boundary without repeating the edge sample.
    ///
    /// A row `[a, b, c, d]` padded by 2 becomes `[c, b, a, b, c, d, c, b]`.
    /// Requires `pad < min(rows, cols)` so every mirrored index resolves
    /// in a single reflection.
    pub fn reflect_pad(&self, pad: usize) -> Result<Grid<T>> {
        if pad == 0 {
            return Ok(self.clone());
        }

        let (rows, cols) = self.shape();
        if pad >= rows || pad >= cols {
            return Err(Error::InvalidParameter {
                name: "pad",
                value: pad.to_string(),
                reason: format!("padding must be smaller than both dimensions ({rows}, {cols})"),
            });
        }

        let offset = pad as isize;
        let data = Array2::from_shape_fn((rows + 2 * pad, cols + 2 * pad), |(r, c)| {
            let rr = mirror_index(r as isize - offset, rows);
            let cc = mirror_index(c as isize - offset, cols);
            self.data[(rr, cc)]
        });

        Ok(Grid::from_array(data))
    }
}

impl Grid<f64> {
    /// Mean and population standard deviation over all cells
    pub fn mean_std(&self) -> (f64, f64) {
        let n = self.len() as f64;
        if self.is_empty() {
            return (0.0, 0.0);
        }
        let mean = self.data.iter().sum::<f64>() / n;
        let variance = self.data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, variance.sqrt())
    }
}

/// Mirror an index into `0..n`, reflecting about the first and last cell.
/// Valid for indices within one grid length of the boundary.
fn mirror_index(i: isize, n: usize) -> usize {
    let n = n as isize;
    if i < 0 {
        (-i) as usize
    } else if i >= n {
        (2 * (n - 1) - i) as usize
    } else {
        i as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid: Grid<f32> = Grid::new(100, 200);
        assert_eq!(grid.rows(), 100);
        assert_eq!(grid.cols(), 200);
        assert_eq!(grid.shape(), (100, 200));
    }

    #[test]
    fn test_grid_access() {
        let mut grid: Grid<f32> = Grid::new(10, 10);
        grid.set(5, 5, 42.0).unwrap();
        assert_eq!(grid.get(5, 5).unwrap(), 42.0);
        assert!(grid.get(10, 0).is_err());
    }

    #[test]
    fn test_mask_grid_defaults_false() {
        let mask: Grid<bool> = Grid::new(4, 4);
        assert!(!mask.get(0, 0).unwrap());
    }

    #[test]
    fn test_mean_std() {
        let grid = Grid::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let (mean, std) = grid.mean_std();
        assert!((mean - 2.5).abs() < 1e-12);
        // population std of [1,2,3,4] = sqrt(1.25)
        assert!((std - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_pad_values() {
        let grid = Grid::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], 3, 3).unwrap();
        let padded = grid.reflect_pad(2).unwrap();
        assert_eq!(padded.shape(), (7, 7));
        // Interior is preserved
        assert_eq!(padded.get(2, 2).unwrap(), 1.0);
        assert_eq!(padded.get(4, 4).unwrap(), 9.0);
        // Mirrored without repeating the edge: row [1,2,3] -> [3,2,1,2,3,2,1]
        assert_eq!(padded.get(2, 0).unwrap(), 3.0);
        assert_eq!(padded.get(2, 1).unwrap(), 2.0);
        assert_eq!(padded.get(2, 5).unwrap(), 2.0);
        assert_eq!(padded.get(2, 6).unwrap(), 1.0);
    }

    #[test]
    fn test_reflect_pad_too_wide() {
        let grid: Grid<f64> = Grid::new(3, 3);
        assert!(grid.reflect_pad(3).is_err());
        assert!(grid.reflect_pad(2).is_ok());
    }
}
