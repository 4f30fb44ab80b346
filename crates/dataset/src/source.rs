//! Simulated-image loading
//!
//! `SimulatedSource` is the collaborator boundary for image input: one
//! call per file identifier returns the intensity image and its
//! ground-truth field. `TiffSource` is the on-disk implementation,
//! reading grayscale TIFF pairs from a directory.

use std::fs::File;
use std::path::{Path, PathBuf};
use tiff::decoder::{Decoder, DecodingResult};

use spotset_core::grid::Grid;
use spotset_core::{Error, Result};

/// One simulated image: intensity plus same-shaped ground truth
#[derive(Debug, Clone)]
pub struct SimulatedImage {
    /// Raw intensity image
    pub image: Grid<f64>,
    /// Ground-truth spot coverage in [0, 1]
    pub truth: Grid<f64>,
}

/// Source of simulated images, keyed by file identifier
pub trait SimulatedSource {
    /// Load the image and truth field for one file identifier
    fn load(&self, file_id: &str) -> Result<SimulatedImage>;
}

/// Directory-backed source reading TIFF pairs.
///
/// For a file id `exp_low (3)` the source reads `exp_low (3).tif` for
/// the intensity image and `exp_low (3)_truth.tif` for the truth field.
#[derive(Debug, Clone)]
pub struct TiffSource {
    dir: PathBuf,
}

impl TiffSource {
    /// Create a source rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_gray(&self, path: &Path, file_id: &str) -> Result<Grid<f64>> {
        let file = File::open(path).map_err(|e| Error::Load {
            id: file_id.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })?;

        let mut decoder = Decoder::new(file).map_err(|e| Error::Load {
            id: file_id.to_string(),
            reason: format!("TIFF decode error: {}", e),
        })?;

        let (width, height) = decoder.dimensions().map_err(|e| Error::Load {
            id: file_id.to_string(),
            reason: format!("cannot read dimensions: {}", e),
        })?;
        let rows = height as usize;
        let cols = width as usize;

        let result = decoder.read_image().map_err(|e| Error::Load {
            id: file_id.to_string(),
            reason: format!("cannot read image data: {}", e),
        })?;

        let data: Vec<f64> = match result {
            DecodingResult::F32(buf) => cast_buffer(&buf),
            DecodingResult::F64(buf) => cast_buffer(&buf),
            DecodingResult::U8(buf) => cast_buffer(&buf),
            DecodingResult::U16(buf) => cast_buffer(&buf),
            DecodingResult::U32(buf) => cast_buffer(&buf),
            DecodingResult::I8(buf) => cast_buffer(&buf),
            DecodingResult::I16(buf) => cast_buffer(&buf),
            DecodingResult::I32(buf) => cast_buffer(&buf),
            _ => {
                return Err(Error::Load {
                    id: file_id.to_string(),
                    reason: "unsupported TIFF pixel format".to_string(),
                })
            }
        };

        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        Grid::from_vec(data, rows, cols)
    }
}

fn cast_buffer<T: num_traits::NumCast + Copy>(buf: &[T]) -> Vec<f64> {
    buf.iter()
        .map(|&v| num_traits::cast(v).unwrap_or(f64::NAN))
        .collect()
}

impl SimulatedSource for TiffSource {
    fn load(&self, file_id: &str) -> Result<SimulatedImage> {
        let image_path = self.dir.join(format!("{file_id}.tif"));
        let truth_path = self.dir.join(format!("{file_id}_truth.tif"));

        let image = self.read_gray(&image_path, file_id)?;
        let truth = self.read_gray(&truth_path, file_id)?;

        Ok(SimulatedImage { image, truth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_load_error() {
        let source = TiffSource::new("/nonexistent/simulated");
        let err = source.load("exp_low (1)").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("exp_low (1)"));
    }
}
