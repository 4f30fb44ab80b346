//! Coordinate extraction, corpus aggregation and balanced sampling
//!
//! The sampling pipeline for one run:
//! 1. **extract**: per-image, per-category center sets from the masks
//! 2. **aggregate**: concatenate per-image sets into category pools
//! 3. **balanced**: draw quotas with replacement, label, shuffle, split

mod aggregate;
mod balanced;
mod extract;

pub use aggregate::aggregate_centers;
pub use balanced::{make_labeled_sets, LabeledSet, SamplerParams};
pub use extract::{extract_centers, CenterSet, AXIS_COL, AXIS_IMAGE, AXIS_ROW};
