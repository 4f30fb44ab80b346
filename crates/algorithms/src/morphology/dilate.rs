//! Binary morphological dilation
//!
//! Sets each pixel true if any pixel under the structuring element is
//! true. Grows true regions outward by one structuring-element radius
//! per iteration.

use crate::maybe_rayon::*;
use spotset_core::grid::Grid;
use spotset_core::{Algorithm, Error, Result};

use super::element::StructuringElement;

/// Parameters for binary dilation
#[derive(Debug, Clone)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
    /// Number of times the dilation is applied
    pub iterations: usize,
}

impl Default for DilateParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            iterations: 1,
        }
    }
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Binary dilation (logical OR over structuring element neighborhood)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate(&input, &params.element, params.iterations)
    }
}

/// Perform binary dilation on a mask.
///
/// Each output pixel is true if any input pixel within the structuring
/// element neighborhood is true. Taps falling outside the mask read as
/// false, so true regions never wrap or bleed in from the boundary.
///
/// # Arguments
/// * `mask` - Input boolean mask
/// * `element` - Structuring element defining the neighborhood shape
/// * `iterations` - How many times to apply the dilation (must be >= 1)
pub fn dilate(mask: &Grid<bool>, element: &StructuringElement, iterations: usize) -> Result<Grid<bool>> {
    element.validate()?;
    validate_iterations(iterations)?;

    let offsets = element.offsets();
    let mut current = dilate_once(mask, &offsets)?;
    for _ in 1..iterations {
        current = dilate_once(&current, &offsets)?;
    }
    Ok(current)
}

fn dilate_once(mask: &Grid<bool>, offsets: &[(isize, isize)]) -> Result<Grid<bool>> {
    let (rows, cols) = mask.shape();

    let output_data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![false; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let r = row as isize;
                let c = col as isize;

                for &(dr, dc) in offsets {
                    let nr = r + dr;
                    let nc = c + dc;
                    // Out-of-bounds taps are treated as false
                    if nr < 0 || nr >= rows as isize || nc < 0 || nc >= cols as isize {
                        continue;
                    }
                    if unsafe { mask.get_unchecked(nr as usize, nc as usize) } {
                        *out = true;
                        break;
                    }
                }
            }

            row_data
        })
        .collect();

    Grid::from_vec(output_data, rows, cols)
}

pub(super) fn validate_iterations(iterations: usize) -> Result<()> {
    if iterations == 0 {
        return Err(Error::InvalidParameter {
            name: "iterations",
            value: "0".to_string(),
            reason: "at least one iteration is required".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel_mask(rows: usize, cols: usize, r: usize, c: usize) -> Grid<bool> {
        let mut mask = Grid::new(rows, cols);
        mask.set(r, c, true).unwrap();
        mask
    }

    #[test]
    fn test_dilate_single_pixel() {
        let mask = single_pixel_mask(7, 7, 3, 3);
        let result = dilate(&mask, &StructuringElement::Square(1), 1).unwrap();

        // Full 3x3 neighborhood becomes true, including diagonals
        for r in 2..=4 {
            for c in 2..=4 {
                assert!(result.get(r, c).unwrap(), "({}, {}) should be true", r, c);
            }
        }
        assert!(!result.get(1, 3).unwrap());
        assert!(!result.get(3, 5).unwrap());
    }

    #[test]
    fn test_dilate_iterations_grow_linearly() {
        let mask = single_pixel_mask(11, 11, 5, 5);
        let result = dilate(&mask, &StructuringElement::Square(1), 3).unwrap();

        // After 3 iterations the true region is a 7x7 square
        assert!(result.get(2, 2).unwrap());
        assert!(result.get(8, 8).unwrap());
        assert!(!result.get(1, 5).unwrap());
        assert!(!result.get(5, 9).unwrap());
    }

    #[test]
    fn test_dilate_edge_clipping() {
        let mask = single_pixel_mask(5, 5, 0, 0);
        let result = dilate(&mask, &StructuringElement::Square(1), 1).unwrap();

        // Out-of-bounds taps read false; the in-bounds neighborhood grows
        assert!(result.get(0, 0).unwrap());
        assert!(result.get(1, 1).unwrap());
        assert!(!result.get(2, 2).unwrap());
    }

    #[test]
    fn test_dilate_empty_mask_stays_empty() {
        let mask: Grid<bool> = Grid::new(6, 6);
        let result = dilate(&mask, &StructuringElement::Square(1), 5).unwrap();
        assert!(result.data().iter().all(|&v| !v));
    }

    #[test]
    fn test_dilate_zero_iterations_rejected() {
        let mask: Grid<bool> = Grid::new(6, 6);
        assert!(dilate(&mask, &StructuringElement::Square(1), 0).is_err());
    }

    #[test]
    fn test_dilate_algorithm_wrapper() {
        let mask = single_pixel_mask(7, 7, 3, 3);
        let result = Dilate.execute_default(mask).unwrap();
        assert!(result.get(2, 2).unwrap());
    }
}
