//! # Spotset Dataset
//!
//! Collaborator boundaries and the end-to-end pipeline of the spotset
//! training-set builder:
//!
//! - **source**: loading simulated image / truth pairs (`SimulatedSource`,
//!   with a TIFF-backed implementation)
//! - **store**: the persisted window database (`WindowStore`, `StoreReader`)
//! - **pipeline**: normalization, padding, extraction, sampling and export

pub mod pipeline;
pub mod source;
pub mod store;

pub use pipeline::{
    build_datasets, export_windows, training_ids, BuildSummary, TRAINING_ID_PREFIX,
    TRAINING_IMAGE_COUNT, WINDOW_WIDTH,
};
pub use source::{SimulatedImage, SimulatedSource, TiffSource};
pub use store::{StoreReader, WindowStore};
