//! Binary morphology for boolean category masks
//!
//! Classical morphological operations on boolean grids:
//! - **Erosion**: logical AND over the neighborhood (shrinks true regions)
//! - **Dilation**: logical OR over the neighborhood (grows true regions)
//! - **Closing**: dilation then erosion (fills small gaps)
//!
//! Structuring-element taps that fall outside the grid read as false.

mod closing;
mod dilate;
mod element;
mod erode;

pub use closing::{closing, Closing, ClosingParams};
pub use dilate::{dilate, Dilate, DilateParams};
pub use element::StructuringElement;
pub use erode::{erode, Erode, ErodeParams};
