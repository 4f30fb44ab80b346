//! Binary morphological closing (dilation followed by erosion)
//!
//! Fills gaps smaller than the structuring element while preserving
//! the overall extent of larger true regions. Used by the mask builder
//! to connect isolated damaged pixels into contiguous damaged regions.

use spotset_core::grid::Grid;
use spotset_core::{Algorithm, Error, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for binary closing
#[derive(Debug, Clone)]
pub struct ClosingParams {
    /// Structuring element shape
    pub element: StructuringElement,
    /// Number of dilation passes, matched by the same number of erosion passes
    pub iterations: usize,
}

impl Default for ClosingParams {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            iterations: 1,
        }
    }
}

/// Closing algorithm
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = Grid<bool>;
    type Output = Grid<bool>;
    type Params = ClosingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Binary closing (dilation then erosion) to fill small gaps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        closing(&input, &params.element, params.iterations)
    }
}

/// Perform binary closing on a mask.
///
/// Closing = dilate then erode, each applied `iterations` times.
/// Fills false gaps smaller than the structuring element while leaving
/// larger false regions open.
///
/// # Arguments
/// * `mask` - Input boolean mask
/// * `element` - Structuring element defining the neighborhood shape
/// * `iterations` - Passes for each of the two phases (must be >= 1)
pub fn closing(mask: &Grid<bool>, element: &StructuringElement, iterations: usize) -> Result<Grid<bool>> {
    let dilated = dilate(mask, element, iterations)?;
    erode(&dilated, element, iterations)
}
