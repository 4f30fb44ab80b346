//! Pixel categories and the mask builders that derive them
//!
//! A continuous truth field is turned into six boolean category masks:
//! `inside`, `outside`, `inside_damaged`, `outside_damaged`,
//! `block_border` and `between`. Masks drive coordinate extraction and
//! carry a fixed classifier label per category.

mod builders;
mod category;

pub use builders::{
    between_mask, block_border_mask, category_masks, damaged_spot_mask, inside_mask, outside_mask,
    outside_damaged_mask, INSIDE_THRESHOLD, NEAR_BLOCK_ITERATIONS, NEAR_SPOT_ITERATIONS,
    OUTSIDE_DAMAGED_ITERATIONS, OUTSIDE_THRESHOLD, VERY_NEAR_BLOCK_ITERATIONS,
};
pub use category::{Category, CategoryMap};
