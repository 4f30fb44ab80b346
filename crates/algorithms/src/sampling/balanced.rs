//! Balanced sampling, shuffling and train/test splitting
//!
//! Draws a fixed quota of centers per category (with replacement),
//! assigns the category's classifier label to every drawn sample,
//! shuffles coordinates and labels with a single shared permutation
//! and splits the result into train and test sets.

use ndarray::{concatenate, Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use spotset_core::{Error, Result};

use crate::masks::{Category, CategoryMap};

use super::extract::CenterSet;

/// Parameters for balanced sampling
#[derive(Debug, Clone)]
pub struct SamplerParams {
    /// Samples to draw per category, with replacement
    pub quotas: CategoryMap<usize>,
    /// Fraction of the shuffled pool assigned to the test set
    pub test_split: f64,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            quotas: CategoryMap::build(200_000, 100_000, 200_000, 100_000, 100_000, 100_000),
            test_split: 0.1,
        }
    }
}

/// Coordinates paired with classifier labels.
///
/// `centers` is a 3xN coordinate array (row, col, image index);
/// `labels` holds the label of the same-position column.
#[derive(Debug, Clone)]
pub struct LabeledSet {
    pub centers: Array2<usize>,
    pub labels: Array1<u8>,
}

impl LabeledSet {
    /// Number of samples in the set
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The (row, col, image index) triple of one sample
    pub fn point(&self, i: usize) -> Result<(usize, usize, usize)> {
        if i >= self.len() {
            return Err(Error::IndexOutOfBounds {
                row: 0,
                col: i,
                rows: 3,
                cols: self.len(),
            });
        }
        Ok((
            self.centers[(0, i)],
            self.centers[(1, i)],
            self.centers[(2, i)],
        ))
    }
}

/// Draw balanced training and test sets from the category pools.
///
/// For each category, `quota` centers are drawn uniformly at random
/// with replacement and labeled with the category's fixed label. The
/// concatenated samples are shuffled once, keeping coordinates and
/// labels paired, then split at `floor((1 - test_split) * total)`:
/// the prefix becomes the training set, the suffix the test set.
///
/// A category with a positive quota but an empty pool is an error;
/// a pool smaller than its quota is fine since replacement is used.
pub fn make_labeled_sets<R: Rng + ?Sized>(
    pools: &CategoryMap<CenterSet>,
    params: &SamplerParams,
    rng: &mut R,
) -> Result<(LabeledSet, LabeledSet)> {
    if !(0.0..=1.0).contains(&params.test_split) {
        return Err(Error::InvalidParameter {
            name: "test_split",
            value: params.test_split.to_string(),
            reason: "test split must lie in [0, 1]".to_string(),
        });
    }

    let mut drawn: Vec<CenterSet> = Vec::with_capacity(Category::ALL.len());
    let mut labels: Vec<u8> = Vec::new();

    for category in Category::ALL {
        let quota = *params.quotas.get(category);
        let pool = pools.get(category);

        if quota == 0 {
            continue;
        }
        if pool.is_empty() {
            return Err(Error::EmptyCategoryPool {
                category: category.name(),
            });
        }

        let indices: Vec<usize> = (0..quota).map(|_| rng.gen_range(0..pool.len())).collect();
        drawn.push(pool.select(&indices));
        labels.extend(std::iter::repeat(category.label()).take(quota));
    }

    let centers = if drawn.is_empty() {
        Array2::zeros((3, 0))
    } else {
        let views: Vec<_> = drawn.iter().map(|s| s.data().view()).collect();
        concatenate(Axis(1), &views).map_err(|e| Error::Other(e.to_string()))?
    };
    let labels = Array1::from_vec(labels);

    let total = labels.len();
    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(rng);

    // One permutation applied to both arrays keeps pairs intact
    let centers = centers.select(Axis(1), &order);
    let labels = labels.select(Axis(0), &order);

    let n_training = ((1.0 - params.test_split) * total as f64) as usize;

    let training = LabeledSet {
        centers: centers.slice(ndarray::s![.., ..n_training]).to_owned(),
        labels: labels.slice(ndarray::s![..n_training]).to_owned(),
    };
    let test = LabeledSet {
        centers: centers.slice(ndarray::s![.., n_training..]).to_owned(),
        labels: labels.slice(ndarray::s![n_training..]).to_owned(),
    };

    Ok((training, test))
}
