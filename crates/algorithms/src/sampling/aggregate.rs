//! Corpus aggregation across images
//!
//! Merges per-image center sets into one pool per category. Image
//! order is preserved within each pool but carries no meaning; the
//! balanced sampler reshuffles everything downstream.

use spotset_core::{Error, Result};

use crate::masks::CategoryMap;

use super::extract::CenterSet;

/// Concatenate per-image center sets into per-category pools.
///
/// `per_image` must be ordered by image index: the set at position `i`
/// is expected to carry image index `i`, as produced by extracting
/// images in input order.
pub fn aggregate_centers(per_image: &[CategoryMap<CenterSet>]) -> Result<CategoryMap<CenterSet>> {
    if per_image.is_empty() {
        return Err(Error::InvalidParameter {
            name: "per_image",
            value: "[]".to_string(),
            reason: "at least one image is required".to_string(),
        });
    }

    CategoryMap::try_from_fn(|category| {
        let sets: Vec<&CenterSet> = per_image.iter().map(|m| m.get(category)).collect();
        CenterSet::concat(&sets)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masks::Category;

    fn map_with_counts(image_index: usize, count: usize) -> CategoryMap<CenterSet> {
        CategoryMap::from_fn(|category| {
            let points: Vec<(usize, usize)> = (0..count + category.index())
                .map(|i| (i + 10, i + 20))
                .collect();
            CenterSet::from_points(&points, image_index)
        })
    }

    #[test]
    fn test_pool_sizes_are_sums() {
        let per_image = vec![map_with_counts(0, 3), map_with_counts(1, 5), map_with_counts(2, 2)];
        let pools = aggregate_centers(&per_image).unwrap();

        for (category, pool) in pools.iter() {
            let expected = (3 + category.index()) + (5 + category.index()) + (2 + category.index());
            assert_eq!(pool.len(), expected, "category {}", category);
        }
    }

    #[test]
    fn test_image_order_preserved() {
        let per_image = vec![map_with_counts(0, 2), map_with_counts(1, 2)];
        let pools = aggregate_centers(&per_image).unwrap();

        let inside = pools.get(Category::Inside);
        assert_eq!(inside.point(0).unwrap().2, 0);
        assert_eq!(inside.point(1).unwrap().2, 0);
        assert_eq!(inside.point(2).unwrap().2, 1);
        assert_eq!(inside.point(3).unwrap().2, 1);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(aggregate_centers(&[]).is_err());
    }

    #[test]
    fn test_empty_pools_survive_aggregation() {
        let per_image = vec![
            CategoryMap::from_fn(|_| CenterSet::empty()),
            CategoryMap::from_fn(|_| CenterSet::empty()),
        ];
        let pools = aggregate_centers(&per_image).unwrap();
        for (_, pool) in pools.iter() {
            assert!(pool.is_empty());
        }
    }
}
