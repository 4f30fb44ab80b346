//! End-to-end pipeline tests against an in-memory image source

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use spotset_algorithms::masks::{Category, CategoryMap};
use spotset_algorithms::sampling::SamplerParams;
use spotset_core::grid::Grid;
use spotset_core::Error;
use spotset_dataset::{build_datasets, training_ids, SimulatedImage, SimulatedSource, StoreReader};

/// In-memory source serving the same synthetic image for every id
struct SyntheticSource {
    image: Grid<f64>,
    truth: Grid<f64>,
}

impl SimulatedSource for SyntheticSource {
    fn load(&self, _file_id: &str) -> Result<SimulatedImage, Error> {
        Ok(SimulatedImage {
            image: self.image.clone(),
            truth: self.truth.clone(),
        })
    }
}

/// 60x60 truth with a single centered 10x10 block of 1.0
fn block_truth() -> Grid<f64> {
    let mut truth: Grid<f64> = Grid::new(60, 60);
    for r in 25..35 {
        for c in 25..35 {
            truth.set(r, c, 1.0).unwrap();
        }
    }
    truth
}

fn quotas(values: [usize; 6]) -> CategoryMap<usize> {
    CategoryMap::build(values[0], values[1], values[2], values[3], values[4], values[5])
}

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spotset-pipeline-{}-{}", tag, std::process::id()))
}

#[test]
fn build_datasets_end_to_end() {
    let truth = block_truth();
    let source = SyntheticSource {
        // Intensity follows the truth, so window centers reflect labels
        image: truth.clone(),
        truth,
    };

    let width = 10;
    let params = SamplerParams {
        quotas: quotas([40, 40, 0, 0, 20, 20]),
        test_split: 0.25,
    };
    let mut rng = StdRng::seed_from_u64(11);

    let train_dir = temp_dir("train");
    let test_dir = temp_dir("test");
    let ids = training_ids("synthetic", 2);

    let summary = build_datasets(
        &source, &ids, width, &params, &mut rng, &train_dir, &test_dir,
    )
    .unwrap();

    assert_eq!(summary.images, 2);
    assert_eq!(summary.training_count + summary.test_count, 120);
    assert_eq!(summary.training_count, 90); // floor(0.75 * 120)

    for (dir, expected) in [(&train_dir, 90), (&test_dir, 30)] {
        let reader = StoreReader::open(dir).unwrap();
        assert_eq!(reader.len(), expected);
        assert_eq!(reader.width(), width);

        for i in 0..reader.len() {
            let label = reader.label(i).unwrap();
            assert!(label <= 1);

            // The image equals the truth, so after normalization the
            // window center is positive exactly for label-1 samples
            let window = reader.window(i).unwrap();
            let center = window[(width / 2, width / 2)];
            if label == 1 {
                assert!(center > 0.0, "sample {}: center {} for label 1", i, center);
            } else {
                assert!(center < 0.0, "sample {}: center {} for label 0", i, center);
            }
        }
    }

    std::fs::remove_dir_all(&train_dir).ok();
    std::fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn undamaged_truth_has_empty_damage_pools() {
    let truth = block_truth();
    let source = SyntheticSource {
        image: truth.clone(),
        truth,
    };

    // Default quotas request damaged samples, but a clean truth field
    // has no values in (0.75, 1): the run must fail loudly
    let params = SamplerParams::default();
    let mut rng = StdRng::seed_from_u64(0);
    let ids = training_ids("synthetic", 1);

    let train_dir = temp_dir("damage-train");
    let test_dir = temp_dir("damage-test");

    let err = build_datasets(
        &source, &ids, 10, &params, &mut rng, &train_dir, &test_dir,
    )
    .unwrap_err();

    match err {
        Error::EmptyCategoryPool { category } => {
            assert_eq!(category, Category::InsideDamaged.name());
        }
        other => panic!("expected EmptyCategoryPool, got {:?}", other),
    }

    std::fs::remove_dir_all(&train_dir).ok();
    std::fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn shape_mismatch_is_detected() {
    let source = SyntheticSource {
        image: Grid::new(50, 60),
        truth: Grid::new(60, 60),
    };
    let params = SamplerParams::default();
    let mut rng = StdRng::seed_from_u64(0);
    let ids = training_ids("synthetic", 1);

    let err = build_datasets(
        &source,
        &ids,
        10,
        &params,
        &mut rng,
        &temp_dir("mismatch-train"),
        &temp_dir("mismatch-test"),
    )
    .unwrap_err();

    match err {
        Error::ShapeMismatch { id, ir, tr, .. } => {
            assert_eq!(id, "synthetic (1)");
            assert_eq!(ir, 50);
            assert_eq!(tr, 60);
        }
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}
