//! Structuring element definitions for binary morphology
//!
//! A structuring element defines the neighborhood shape used in
//! binary erosion, dilation and closing. The mask pipeline uses the
//! full 3x3 (8-connected) square throughout.

use spotset_core::{Error, Result};

/// Shape of a structuring element for binary morphological operations
#[derive(Debug, Clone, PartialEq)]
pub enum StructuringElement {
    /// Square element of given radius (side = 2*radius + 1)
    Square(usize),
    /// Cross (plus-shaped) element of given radius
    Cross(usize),
    /// User-provided boolean mask (must be odd-sized and square)
    Custom(Vec<Vec<bool>>),
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::Square(1)
    }
}

impl StructuringElement {
    /// Validate the structuring element, returning an error for invalid configurations
    pub fn validate(&self) -> Result<()> {
        match self {
            StructuringElement::Square(r) | StructuringElement::Cross(r) => {
                if *r == 0 {
                    return Err(Error::InvalidParameter {
                        name: "radius",
                        value: "0".to_string(),
                        reason: "structuring element radius must be at least 1".to_string(),
                    });
                }
                Ok(())
            }
            StructuringElement::Custom(mask) => {
                if mask.is_empty() {
                    return Err(Error::InvalidParameter {
                        name: "custom_mask",
                        value: "empty".to_string(),
                        reason: "custom mask must not be empty".to_string(),
                    });
                }
                let size = mask.len();
                if size % 2 == 0 {
                    return Err(Error::InvalidParameter {
                        name: "custom_mask",
                        value: format!("{}x{}", size, size),
                        reason: "custom mask size must be odd".to_string(),
                    });
                }
                for row in mask {
                    if row.len() != size {
                        return Err(Error::InvalidParameter {
                            name: "custom_mask",
                            value: format!("row length {}", row.len()),
                            reason: format!("custom mask must be square (expected {})", size),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    /// Get the radius of the structuring element
    pub fn radius(&self) -> usize {
        match self {
            StructuringElement::Square(r) | StructuringElement::Cross(r) => *r,
            StructuringElement::Custom(mask) => mask.len() / 2,
        }
    }

    /// Compute (dr, dc) offsets relative to center for all active cells
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        match self {
            StructuringElement::Square(r) => {
                let r = *r as isize;
                let mut offsets = Vec::new();
                for dr in -r..=r {
                    for dc in -r..=r {
                        offsets.push((dr, dc));
                    }
                }
                offsets
            }
            StructuringElement::Cross(r) => {
                let r = *r as isize;
                let mut offsets = Vec::new();
                for d in -r..=r {
                    offsets.push((d, 0)); // vertical arm
                    if d != 0 {
                        offsets.push((0, d)); // horizontal arm (skip center duplicate)
                    }
                }
                offsets
            }
            StructuringElement::Custom(mask) => {
                let center = mask.len() / 2;
                let mut offsets = Vec::new();
                for (r, row) in mask.iter().enumerate() {
                    for (c, &active) in row.iter().enumerate() {
                        if active {
                            offsets
                                .push((r as isize - center as isize, c as isize - center as isize));
                        }
                    }
                }
                offsets
            }
        }
    }
}
