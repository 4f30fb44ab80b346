//! End-to-end training-set construction
//!
//! Loads every simulated image once, normalizes and reflect-pads it,
//! extracts per-category centers from the padded truth fields, pools
//! them across the image set, draws balanced labeled train/test sets
//! and exports fixed-width windows into two window databases.

use ndarray::s;
use std::path::Path;
use tracing::{debug, info};

use spotset_algorithms::sampling::{
    aggregate_centers, extract_centers, make_labeled_sets, LabeledSet, SamplerParams,
};
use spotset_core::grid::Grid;
use spotset_core::{Error, Result};

use crate::source::SimulatedSource;
use crate::store::WindowStore;

/// Side length of exported image windows.
///
/// Half of this doubles as the reflect-padding amount and as the
/// border-exclusion margin during coordinate extraction, so every
/// window fits inside the padded image.
pub const WINDOW_WIDTH: usize = 41;

/// Default number of simulated input images
pub const TRAINING_IMAGE_COUNT: usize = 24;

/// Default file-identifier prefix of the simulated image set
pub const TRAINING_ID_PREFIX: &str = "exp_low";

/// File identifiers of the simulated images used to build the sets.
///
/// `training_ids("exp_low", 24)` yields `exp_low (1)` .. `exp_low (24)`.
pub fn training_ids(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix} ({i})")).collect()
}

/// Outcome of one pipeline run
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Number of source images consumed
    pub images: usize,
    /// Windows written to the training database
    pub training_count: usize,
    /// Windows written to the test database
    pub test_count: usize,
}

/// Normalize an image to zero mean and unit standard deviation
fn normalize(image: &Grid<f64>, file_id: &str) -> Result<Grid<f64>> {
    let (mean, std) = image.mean_std();
    if !std.is_finite() || std == 0.0 {
        return Err(Error::Algorithm(format!(
            "image '{}' cannot be normalized (std = {})",
            file_id, std
        )));
    }
    Ok(Grid::from_array(image.data().mapv(|v| (v - mean) / std)))
}

/// Build the training and test window databases.
///
/// Each file identifier is loaded once; its image is normalized and
/// both image and truth are reflect-padded by `width / 2`. Centers are
/// extracted with the same margin, pooled per category, sampled per
/// `sampler` and exported to `training_path` and `test_path`.
///
/// Randomness (sampling choices and the shuffle permutation) comes
/// entirely from `rng`, so a seeded generator makes runs reproducible.
pub fn build_datasets<S, R>(
    source: &S,
    ids: &[String],
    width: usize,
    sampler: &SamplerParams,
    rng: &mut R,
    training_path: &Path,
    test_path: &Path,
) -> Result<BuildSummary>
where
    S: SimulatedSource,
    R: rand::Rng + ?Sized,
{
    let half = width / 2;

    let mut images = Vec::with_capacity(ids.len());
    let mut per_image = Vec::with_capacity(ids.len());

    for (index, id) in ids.iter().enumerate() {
        let simulated = source.load(id)?;

        let (ir, ic) = simulated.image.shape();
        let (tr, tc) = simulated.truth.shape();
        if (ir, ic) != (tr, tc) {
            return Err(Error::ShapeMismatch {
                id: id.clone(),
                ir,
                ic,
                tr,
                tc,
            });
        }

        let image = normalize(&simulated.image, id)?.reflect_pad(half)?;
        let truth = simulated.truth.reflect_pad(half)?;

        let centers = extract_centers(&truth, index, half)?;
        debug!(image = %id, rows = ir, cols = ic, "extracted centers");

        images.push(image);
        per_image.push(centers);
    }

    let pools = aggregate_centers(&per_image)?;
    for (category, pool) in pools.iter() {
        info!(category = %category, centers = pool.len(), "aggregated pool");
    }

    let (training, test) = make_labeled_sets(&pools, sampler, rng)?;
    info!(
        training = training.len(),
        test = test.len(),
        "drew balanced sample sets"
    );

    let training_count = export_windows(training_path, &images, &training, width)?;
    info!(path = %training_path.display(), windows = training_count, "wrote training database");

    let test_count = export_windows(test_path, &images, &test, width)?;
    info!(path = %test_path.display(), windows = test_count, "wrote test database");

    Ok(BuildSummary {
        images: images.len(),
        training_count,
        test_count,
    })
}

/// Export one labeled set as a window database.
///
/// For every sample, a `width x width` window centered on the sample's
/// coordinate is cropped from the padded image it came from and stored
/// with the sample's label, keyed sequentially in set order.
pub fn export_windows(
    path: &Path,
    images: &[Grid<f64>],
    set: &LabeledSet,
    width: usize,
) -> Result<usize> {
    let half = width / 2;
    let mut store = WindowStore::create(path, width)?;

    for i in 0..set.len() {
        let (row, col, image_index) = set.point(i)?;
        let image = images.get(image_index).ok_or_else(|| Error::Export {
            path: path.to_path_buf(),
            reason: format!("sample {} references unknown image {}", i, image_index),
        })?;

        let (rows, cols) = image.shape();
        if row < half || col < half || row - half + width > rows || col - half + width > cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }

        let window = image
            .data()
            .slice(s![row - half..row - half + width, col - half..col - half + width]);
        store.push(window, set.labels[i])?;
    }

    store.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_ids_format() {
        let ids = training_ids(TRAINING_ID_PREFIX, 3);
        assert_eq!(ids, vec!["exp_low (1)", "exp_low (2)", "exp_low (3)"]);
        assert_eq!(training_ids(TRAINING_ID_PREFIX, TRAINING_IMAGE_COUNT).len(), 24);
    }

    #[test]
    fn test_normalize_zero_mean_unit_std() {
        let image = Grid::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let normalized = normalize(&image, "test").unwrap();
        let (mean, std) = normalized.mean_std();
        assert!(mean.abs() < 1e-12);
        assert!((std - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_rejects_flat_image() {
        let image = Grid::filled(4, 4, 3.0);
        assert!(normalize(&image, "flat").is_err());
    }
}
