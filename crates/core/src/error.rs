//! Error types for spotset

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spotset operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Could not load simulated image '{id}': {reason}")]
    Load { id: String, reason: String },

    #[error("Image/truth shape mismatch for '{id}': image is ({ir}, {ic}), truth is ({tr}, {tc})")]
    ShapeMismatch {
        id: String,
        ir: usize,
        ic: usize,
        tr: usize,
        tc: usize,
    },

    #[error("Category '{category}' has no eligible coordinates but a positive quota was requested")]
    EmptyCategoryPool { category: &'static str },

    #[error("Dataset export failed at '{path}': {reason}")]
    Export { path: PathBuf, reason: String },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for spotset operations
pub type Result<T> = std::result::Result<T, Error>;
