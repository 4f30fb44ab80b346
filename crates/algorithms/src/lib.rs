//! # Spotset Algorithms
//!
//! Mask derivation and sampling algorithms for the spotset
//! training-set builder.
//!
//! ## Modules
//!
//! - **morphology**: binary dilation, erosion and closing on boolean masks
//! - **masks**: the six pixel categories and their mask builders
//! - **sampling**: coordinate extraction, pooling and balanced sampling

pub mod masks;
pub mod morphology;
pub mod sampling;

pub(crate) mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::masks::{category_masks, Category, CategoryMap};
    pub use crate::morphology::{closing, dilate, erode, StructuringElement};
    pub use crate::sampling::{
        aggregate_centers, extract_centers, make_labeled_sets, CenterSet, LabeledSet,
        SamplerParams,
    };
    pub use spotset_core::prelude::*;
}
