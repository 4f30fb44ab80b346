//! Coordinate extraction from category masks
//!
//! Converts the masks of one image into per-category coordinate sets,
//! tagged with the source-image index and restricted to pixels at
//! least `border` cells away from every edge.

use ndarray::{concatenate, Array2, Axis};
use spotset_core::grid::Grid;
use spotset_core::{Error, Result};

use crate::masks::{category_masks, CategoryMap};

/// Row index within a center set's coordinate array
pub const AXIS_ROW: usize = 0;
/// Column index within a center set's coordinate array
pub const AXIS_COL: usize = 1;
/// Source-image index within a center set's coordinate array
pub const AXIS_IMAGE: usize = 2;

/// A set of pixel centers as a 3xK array.
///
/// Row 0 holds the row index, row 1 the column index and row 2 the
/// source-image index of each center. The layout matches what the
/// window exporter consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterSet {
    data: Array2<usize>,
}

impl CenterSet {
    /// A set with no centers
    pub fn empty() -> Self {
        Self {
            data: Array2::zeros((3, 0)),
        }
    }

    /// Build a set from (row, col) points, all from the same image
    pub fn from_points(points: &[(usize, usize)], image_index: usize) -> Self {
        let mut data = Array2::zeros((3, points.len()));
        for (i, &(row, col)) in points.iter().enumerate() {
            data[(AXIS_ROW, i)] = row;
            data[(AXIS_COL, i)] = col;
            data[(AXIS_IMAGE, i)] = image_index;
        }
        Self { data }
    }

    /// Wrap an existing 3xK coordinate array
    pub fn from_array(data: Array2<usize>) -> Result<Self> {
        if data.nrows() != 3 {
            return Err(Error::InvalidDimensions {
                width: data.ncols(),
                height: data.nrows(),
            });
        }
        Ok(Self { data })
    }

    /// Number of centers in the set
    pub fn len(&self) -> usize {
        self.data.ncols()
    }

    /// Whether the set holds no centers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The (row, col, image index) triple of one center
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
            self.data[(AXIS_ROW, i)],
            self.data[(AXIS_COL, i)],
            self.data[(AXIS_IMAGE, i)],
        ))
    }

    /// The underlying 3xK array
    pub fn data(&self) -> &Array2<usize> {
        &self.data
    }

    /// Select centers by column index, with repetition allowed
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            data: self.data.select(Axis(1), indices),
        }
    }

    /// Concatenate several sets into one, preserving input order
    pub fn concat(sets: &[&CenterSet]) -> Result<Self> {
        let views: Vec<_> = sets.iter().map(|s| s.data.view()).collect();
        let data = concatenate(Axis(1), &views).map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data })
    }
}

/// Extract per-category center sets from one truth field.
///
/// Every returned coordinate satisfies
/// `border <= index < dimension - border` on both axes.
///
/// # Arguments
/// * `truth` - Continuous truth field of one simulated image
/// * `image_index` - Position of the image within the input set
/// * `border` - Margin excluded along every edge
pub fn extract_centers(
    truth: &Grid<f64>,
    image_index: usize,
    border: usize,
) -> Result<CategoryMap<CenterSet>> {
    let masks = category_masks(truth)?;
    Ok(masks.map(|_, mask| centers_from_mask(mask, image_index, border)))
}

/// Centers of all true pixels of one mask, away from the border
fn centers_from_mask(mask: &Grid<bool>, image_index: usize, border: usize) -> CenterSet {
    let (rows, cols) = mask.shape();
    let mut points = Vec::new();

    for row in border..rows.saturating_sub(border) {
        for col in border..cols.saturating_sub(border) {
            if unsafe { mask.get_unchecked(row, col) } {
                points.push((row, col));
            }
        }
    }

    CenterSet::from_points(&points, image_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masks::Category;

    fn block_truth(rows: usize, cols: usize, r0: usize, r1: usize, c0: usize, c1: usize) -> Grid<f64> {
        let mut truth: Grid<f64> = Grid::new(rows, cols);
        for r in r0..r1 {
            for c in c0..c1 {
                truth.set(r, c, 1.0).unwrap();
            }
        }
        truth
    }

    #[test]
    fn test_centers_respect_border() {
        let truth = block_truth(40, 40, 0, 40, 0, 40); // all inside
        let centers = extract_centers(&truth, 0, 6).unwrap();

        let inside = centers.get(Category::Inside);
        assert_eq!(inside.len(), (40 - 12) * (40 - 12));
        for i in 0..inside.len() {
            let (row, col, _) = inside.point(i).unwrap();
            assert!((6..34).contains(&row));
            assert!((6..34).contains(&col));
        }
    }

    #[test]
    fn test_image_index_tagging() {
        let truth = block_truth(20, 20, 5, 15, 5, 15);
        let centers = extract_centers(&truth, 7, 2).unwrap();

        let inside = centers.get(Category::Inside);
        assert!(!inside.is_empty());
        for i in 0..inside.len() {
            let (_, _, image) = inside.point(i).unwrap();
            assert_eq!(image, 7);
        }
    }

    #[test]
    fn test_inside_and_outside_counts() {
        let truth = block_truth(20, 20, 8, 12, 8, 12);
        let centers = extract_centers(&truth, 0, 1).unwrap();

        // 4x4 block lies fully inside the border-excluded interior
        assert_eq!(centers.get(Category::Inside).len(), 16);
        // Interior is 18x18; outside = interior minus the block
        assert_eq!(centers.get(Category::Outside).len(), 18 * 18 - 16);
    }

    #[test]
    fn test_oversized_border_yields_empty_sets() {
        let truth = block_truth(10, 10, 0, 10, 0, 10);
        let centers = extract_centers(&truth, 0, 5).unwrap();
        for (_, set) in centers.iter() {
            assert!(set.is_empty());
        }
    }

    #[test]
    fn test_select_with_repetition() {
        let set = CenterSet::from_points(&[(1, 2), (3, 4), (5, 6)], 0);
        let picked = set.select(&[2, 0, 2]);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked.point(0).unwrap(), (5, 6, 0));
        assert_eq!(picked.point(1).unwrap(), (1, 2, 0));
        assert_eq!(picked.point(2).unwrap(), (5, 6, 0));
    }

    #[test]
    fn test_from_array_rejects_wrong_row_count() {
        let data = Array2::zeros((2, 4));
        assert!(CenterSet::from_array(data).is_err());
    }
}
