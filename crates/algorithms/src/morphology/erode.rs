//! Binary morphological erosion
//!
//! Sets each pixel true only if every pixel under the structuring
//! element is true. Shrinks true regions inward by one
//! structuring-element radius per iteration.

use crate::maybe_rayon::*;
use spotset_core::grid::Grid;
use spotset_core::{Algorithm, Error, Result};

use super::dilate::validate_iterations;
use super::element::StructuringElement;

/// Parameters for binary erosion
#[derive(Debug, Clone)]
pub struct ErodeParams {
    /// Structuring element shape
    pub element: StructuringElement,
    /// Number of times the erosion is applied
    pub iterations: usize,
}

impl Default for ErodeParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            iterations: 1,
        }
    }
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Binary erosion (logical AND over structuring element neighborhood)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode(&input, &params.element, params.iterations)
    }
}

/// Perform binary erosion on a mask.
///
/// Each output pixel is true only if every input pixel within the
/// structuring element neighborhood is true. Taps falling outside the
/// mask read as false, so true regions touching the boundary erode.
///
/// # Arguments
/// * `mask` - Input boolean mask
/// * `element` - Structuring element defining the neighborhood shape
/// * `iterations` - How many times to apply the erosion (must be >= 1)
pub fn erode(mask: &Grid<bool>, element: &StructuringElement, iterations: usize) -> Result<Grid<bool>> {
    element.validate()?;
    validate_iterations(iterations)?;

    let offsets = element.offsets();
    let mut current = erode_once(mask, &offsets)?;
    for _ in 1..iterations {
        current = erode_once(&current, &offsets)?;
    }
    Ok(current)
}

fn erode_once(mask: &Grid<bool>, offsets: &[(isize, isize)]) -> Result<Grid<bool>> {
    let (rows, cols) = mask.shape();

    let output_data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![false; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let r = row as isize;
                let c = col as isize;

                let mut all_true = true;
                for &(dr, dc) in offsets {
                    let nr = r + dr;
                    let nc = c + dc;
                    // Out-of-bounds taps are treated as false
                    if nr < 0 || nr >= rows as isize || nc < 0 || nc >= cols as isize {
                        all_true = false;
                        break;
                    }
                    if !unsafe { mask.get_unchecked(nr as usize, nc as usize) } {
                        all_true = false;
                        break;
                    }
                }
                *out = all_true;
            }

            row_data
        })
        .collect();

    Grid::from_vec(output_data, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_mask(rows: usize, cols: usize, r0: usize, r1: usize, c0: usize, c1: usize) -> Grid<bool> {
        let mut mask = Grid::new(rows, cols);
        for r in r0..r1 {
            for c in c0..c1 {
                mask.set(r, c, true).unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_erode_shrinks_block() {
        let mask = block_mask(9, 9, 2, 7, 2, 7);
        let result = erode(&mask, &StructuringElement::Square(1), 1).unwrap();

        // 5x5 block erodes to 3x3
        assert!(result.get(3, 3).unwrap());
        assert!(result.get(5, 5).unwrap());
        assert!(!result.get(2, 2).unwrap());
        assert!(!result.get(6, 6).unwrap());
    }

    #[test]
    fn test_erode_single_pixel_vanishes() {
        let mut mask: Grid<bool> = Grid::new(7, 7);
        mask.set(3, 3, true).unwrap();
        let result = erode(&mask, &StructuringElement::Square(1), 1).unwrap();
        assert!(result.data().iter().all(|&v| !v));
    }

    #[test]
    fn test_erode_boundary_region() {
        // A full mask erodes at the boundary because taps outside read false
        let mask = Grid::filled(5, 5, true);
        let result = erode(&mask, &StructuringElement::Square(1), 1).unwrap();
        assert!(!result.get(0, 0).unwrap());
        assert!(!result.get(0, 2).unwrap());
        assert!(result.get(2, 2).unwrap());
    }
}
