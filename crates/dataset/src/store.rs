//! Persisted window database
//!
//! A database is a directory holding sequentially keyed training
//! windows and labels:
//! - `windows.bin`: `count * width * width` little-endian f32 values
//! - `labels.bin`: `count` bytes, one label per window
//! - `manifest.json`: count, window width and format version
//!
//! `WindowStore` is the write side used by the exporter; `StoreReader`
//! reads a database back for inspection and tests.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use spotset_core::{Error, Result};

const WINDOWS_FILE: &str = "windows.bin";
const LABELS_FILE: &str = "labels.bin";
const MANIFEST_FILE: &str = "manifest.json";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    format_version: u32,
    count: usize,
    width: usize,
}

fn export_error(path: &Path, reason: impl ToString) -> Error {
    Error::Export {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Write side of a window database
pub struct WindowStore {
    dir: PathBuf,
    windows: BufWriter<File>,
    labels: BufWriter<File>,
    width: usize,
    count: usize,
}

impl WindowStore {
    /// Create a database directory, truncating any existing content
    pub fn create(dir: impl Into<PathBuf>, width: usize) -> Result<Self> {
        let dir = dir.into();
        if width == 0 {
            return Err(Error::InvalidParameter {
                name: "width",
                value: "0".to_string(),
                reason: "window width must be positive".to_string(),
            });
        }

        fs::create_dir_all(&dir).map_err(|e| export_error(&dir, e))?;
        let windows = File::create(dir.join(WINDOWS_FILE)).map_err(|e| export_error(&dir, e))?;
        let labels = File::create(dir.join(LABELS_FILE)).map_err(|e| export_error(&dir, e))?;

        Ok(Self {
            dir,
            windows: BufWriter::new(windows),
            labels: BufWriter::new(labels),
            width,
            count: 0,
        })
    }

    /// Window side length
    pub fn width(&self) -> usize {
        self.width
    }

    /// Windows written so far
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no windows have been written yet
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append one window and its label under the next sequential key
    pub fn push(&mut self, window: ArrayView2<'_, f64>, label: u8) -> Result<()> {
        if window.dim() != (self.width, self.width) {
            return Err(export_error(
                &self.dir,
                format!(
                    "window shape {:?} does not match configured width {}",
                    window.dim(),
                    self.width
                ),
            ));
        }

        for &value in window.iter() {
            self.windows
                .write_all(&(value as f32).to_le_bytes())
                .map_err(|e| export_error(&self.dir, e))?;
        }
        self.labels
            .write_all(&[label])
            .map_err(|e| export_error(&self.dir, e))?;
        self.count += 1;
        Ok(())
    }

    /// Flush everything and write the manifest, finalizing the database
    pub fn finish(mut self) -> Result<usize> {
        self.windows.flush().map_err(|e| export_error(&self.dir, e))?;
        self.labels.flush().map_err(|e| export_error(&self.dir, e))?;

        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            count: self.count,
            width: self.width,
        };
        let file =
            File::create(self.dir.join(MANIFEST_FILE)).map_err(|e| export_error(&self.dir, e))?;
        serde_json::to_writer_pretty(file, &manifest).map_err(|e| export_error(&self.dir, e))?;

        Ok(self.count)
    }
}

/// Read side of a window database
pub struct StoreReader {
    windows: Vec<f32>,
    labels: Vec<u8>,
    width: usize,
}

impl StoreReader {
    /// Open a finalized database directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        let manifest_file =
            File::open(dir.join(MANIFEST_FILE)).map_err(|e| export_error(&dir, e))?;
        let manifest: Manifest =
            serde_json::from_reader(manifest_file).map_err(|e| export_error(&dir, e))?;
        if manifest.format_version != FORMAT_VERSION {
            return Err(export_error(
                &dir,
                format!("unsupported format version {}", manifest.format_version),
            ));
        }

        let mut window_bytes = Vec::new();
        File::open(dir.join(WINDOWS_FILE))
            .and_then(|mut f| f.read_to_end(&mut window_bytes))
            .map_err(|e| export_error(&dir, e))?;

        let mut labels = Vec::new();
        File::open(dir.join(LABELS_FILE))
            .and_then(|mut f| f.read_to_end(&mut labels))
            .map_err(|e| export_error(&dir, e))?;

        let expected = manifest.count * manifest.width * manifest.width * 4;
        if window_bytes.len() != expected || labels.len() != manifest.count {
            return Err(export_error(
                &dir,
                format!(
                    "database is truncated: {} window bytes (expected {}), {} labels (expected {})",
                    window_bytes.len(),
                    expected,
                    labels.len(),
                    manifest.count
                ),
            ));
        }

        let windows = window_bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        Ok(Self {
            windows,
            labels,
            width: manifest.width,
        })
    }

    /// Number of stored windows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the database holds no windows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Window side length
    pub fn width(&self) -> usize {
        self.width
    }

    /// The window stored under key `i`
    pub fn window(&self, i: usize) -> Result<Array2<f32>> {
        if i >= self.len() {
            return Err(Error::IndexOutOfBounds {
                row: i,
                col: 0,
                rows: self.len(),
                cols: 0,
            });
        }
        let cells = self.width * self.width;
        let slice = self.windows[i * cells..(i + 1) * cells].to_vec();
        Array2::from_shape_vec((self.width, self.width), slice)
            .map_err(|e| Error::Other(e.to_string()))
    }

    /// The label stored under key `i`
    pub fn label(&self, i: usize) -> Result<u8> {
        self.labels.get(i).copied().ok_or(Error::IndexOutOfBounds {
            row: i,
            col: 0,
            rows: self.len(),
            cols: 0,
        })
    }

    /// Count of labels equal to `label`
    pub fn label_count(&self, label: u8) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}
