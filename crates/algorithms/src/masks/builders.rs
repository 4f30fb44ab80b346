//! Category mask derivation from a continuous truth field
//!
//! The truth field encodes spot coverage per pixel: 1.0 inside an
//! intact spot, 0.0 on background, intermediate values on damage or
//! partial coverage. The builders below turn one field into the six
//! boolean category masks through thresholding and binary morphology.
//!
//! The masks are not mutually exclusive; `outside_damaged` and
//! `between` in particular can overlap. Downstream sampling treats
//! each category independently, so the overlap is accepted.

use ndarray::Zip;
use spotset_core::grid::Grid;
use spotset_core::Result;

use crate::morphology::{closing, dilate, StructuringElement};

use super::category::CategoryMap;

/// Truth values above this are inside a spot
pub const INSIDE_THRESHOLD: f64 = 0.75;

/// Truth values below this are background
pub const OUTSIDE_THRESHOLD: f64 = 0.25;

/// Dilation passes from a damaged spot to its surrounding background
pub const OUTSIDE_DAMAGED_ITERATIONS: usize = 5;

/// Dilation passes defining the inner exclusion zone of the block border
pub const VERY_NEAR_BLOCK_ITERATIONS: usize = 3;

/// Dilation passes defining the outer reach of the block border
pub const NEAR_BLOCK_ITERATIONS: usize = 15;

/// Dilation passes defining the between-spots reach
pub const NEAR_SPOT_ITERATIONS: usize = 4;

fn full_3x3() -> StructuringElement {
    StructuringElement::Square(1)
}

fn threshold(truth: &Grid<f64>, predicate: impl Fn(f64) -> bool) -> Grid<bool> {
    Grid::from_array(truth.data().mapv(|v| predicate(v)))
}

// Combining helpers; inputs always derive from the same truth field,
// so their shapes agree.
fn and(a: &Grid<bool>, b: &Grid<bool>) -> Grid<bool> {
    Grid::from_array(
        Zip::from(a.data())
            .and(b.data())
            .map_collect(|&x, &y| x && y),
    )
}

fn and_not(a: &Grid<bool>, b: &Grid<bool>) -> Grid<bool> {
    Grid::from_array(
        Zip::from(a.data())
            .and(b.data())
            .map_collect(|&x, &y| x && !y),
    )
}

/// Pixels inside a spot: `truth > 0.75`
pub fn inside_mask(truth: &Grid<f64>) -> Grid<bool> {
    threshold(truth, |v| v > INSIDE_THRESHOLD)
}

/// Background pixels: `truth < 0.25`
pub fn outside_mask(truth: &Grid<f64>) -> Grid<bool> {
    threshold(truth, |v| v < OUTSIDE_THRESHOLD)
}

/// Pixels in the damage value range: `0.75 < truth < 1`
fn damaged_pixel_mask(truth: &Grid<f64>) -> Grid<bool> {
    threshold(truth, |v| v > INSIDE_THRESHOLD && v < 1.0)
}

/// Pixels inside damaged spots.
///
/// Closing connects isolated damaged pixels into contiguous damaged
/// regions; the re-intersection with the damage value range restricts
/// the filled region back to genuinely damaged pixels.
pub fn damaged_spot_mask(truth: &Grid<f64>) -> Result<Grid<bool>> {
    let damaged_pixel = damaged_pixel_mask(truth);
    let damaged_area = closing(&damaged_pixel, &full_3x3(), 1)?;
    Ok(and(&damaged_area, &damaged_pixel))
}

/// Background pixels immediately surrounding damaged spots
pub fn outside_damaged_mask(truth: &Grid<f64>) -> Result<Grid<bool>> {
    let damaged_spot = damaged_spot_mask(truth)?;
    let near_damaged_spot = dilate(&damaged_spot, &full_3x3(), OUTSIDE_DAMAGED_ITERATIONS)?;
    Ok(and(&near_damaged_spot, &outside_mask(truth)))
}

/// Annulus around a block of spots, excluding a near buffer
pub fn block_border_mask(truth: &Grid<f64>) -> Result<Grid<bool>> {
    let inside = inside_mask(truth);
    let very_near_block = dilate(&inside, &full_3x3(), VERY_NEAR_BLOCK_ITERATIONS)?;
    let near_block = dilate(&inside, &full_3x3(), NEAR_BLOCK_ITERATIONS)?;
    Ok(and_not(&near_block, &very_near_block))
}

/// Background pixels a short distance from any spot
pub fn between_mask(truth: &Grid<f64>) -> Result<Grid<bool>> {
    let near_spot = dilate(&inside_mask(truth), &full_3x3(), NEAR_SPOT_ITERATIONS)?;
    Ok(and(&near_spot, &outside_mask(truth)))
}

/// All six category masks for one truth field.
///
/// Shares the intermediate threshold masks between categories instead
/// of recomputing them per builder.
pub fn category_masks(truth: &Grid<f64>) -> Result<CategoryMap<Grid<bool>>> {
    let inside = inside_mask(truth);
    let outside = outside_mask(truth);

    let damaged_spot = damaged_spot_mask(truth)?;
    let near_damaged_spot = dilate(&damaged_spot, &full_3x3(), OUTSIDE_DAMAGED_ITERATIONS)?;
    let outside_damaged = and(&near_damaged_spot, &outside);

    let very_near_block = dilate(&inside, &full_3x3(), VERY_NEAR_BLOCK_ITERATIONS)?;
    let near_block = dilate(&inside, &full_3x3(), NEAR_BLOCK_ITERATIONS)?;
    let block_border = and_not(&near_block, &very_near_block);

    let near_spot = dilate(&inside, &full_3x3(), NEAR_SPOT_ITERATIONS)?;
    let between = and(&near_spot, &outside);

    Ok(CategoryMap::build(
        inside,
        outside,
        damaged_spot,
        outside_damaged,
        block_border,
        between,
    ))
}
