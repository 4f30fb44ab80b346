//! The closed set of pixel categories and a map keyed by them

/// Semantic pixel categories used for labeling.
///
/// Each pixel of a simulated image falls into zero or more of these
/// six categories; the classifier label for each is fixed (`label`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Inside a spot (truth > 0.75)
    Inside,
    /// Background far from any structure (truth < 0.25)
    Outside,
    /// Inside a damaged spot
    InsideDamaged,
    /// Background immediately surrounding a damaged spot
    OutsideDamaged,
    /// Annulus around a block of spots
    BlockBorder,
    /// Background a short distance from any spot
    Between,
}

impl Category {
    /// All categories in their canonical order
    pub const ALL: [Category; 6] = [
        Category::Inside,
        Category::Outside,
        Category::InsideDamaged,
        Category::OutsideDamaged,
        Category::BlockBorder,
        Category::Between,
    ];

    /// Position within the canonical order
    pub fn index(self) -> usize {
        match self {
            Category::Inside => 0,
            Category::Outside => 1,
            Category::InsideDamaged => 2,
            Category::OutsideDamaged => 3,
            Category::BlockBorder => 4,
            Category::Between => 5,
        }
    }

    /// Classifier label for samples of this category.
    ///
    /// Pixels inside a spot (damaged or not) are positive; every other
    /// category is negative.
    pub fn label(self) -> u8 {
        match self {
            Category::Inside | Category::InsideDamaged => 1,
            Category::Outside
            | Category::OutsideDamaged
            | Category::BlockBorder
            | Category::Between => 0,
        }
    }

    /// Stable lower-case name, used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            Category::Inside => "inside",
            Category::Outside => "outside",
            Category::InsideDamaged => "inside_damaged",
            Category::OutsideDamaged => "outside_damaged",
            Category::BlockBorder => "block_border",
            Category::Between => "between",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value per category, indexed exhaustively.
///
/// Replaces a string-keyed map so that a missing category is a compile
/// error rather than a runtime lookup failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMap<T> {
    values: [T; 6],
}

impl<T> CategoryMap<T> {
    /// Build a map from one value per category, in named order
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        inside: T,
        outside: T,
        inside_damaged: T,
        outside_damaged: T,
        block_border: T,
        between: T,
    ) -> Self {
        Self {
            values: [
                inside,
                outside,
                inside_damaged,
                outside_damaged,
                block_border,
                between,
            ],
        }
    }

    /// Build a map by evaluating `f` for every category
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            values: Category::ALL.map(&mut f),
        }
    }

    /// Build a map by evaluating a fallible `f` for every category
    pub fn try_from_fn<E>(mut f: impl FnMut(Category) -> Result<T, E>) -> Result<Self, E> {
        let mut values = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            values.push(f(category)?);
        }
        match values.try_into() {
            Ok(values) => Ok(Self { values }),
            Err(_) => unreachable!("exactly six categories were pushed"),
        }
    }

    /// Value for one category
    pub fn get(&self, category: Category) -> &T {
        &self.values[category.index()]
    }

    /// Mutable value for one category
    pub fn get_mut(&mut self, category: Category) -> &mut T {
        &mut self.values[category.index()]
    }

    /// Iterate categories with their values, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.iter().copied().zip(self.values.iter())
    }

    /// Map every value to a new map, preserving category association
    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|category| f(category, self.get(category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(Category::Inside.label(), 1);
        assert_eq!(Category::InsideDamaged.label(), 1);
        assert_eq!(Category::Outside.label(), 0);
        assert_eq!(Category::OutsideDamaged.label(), 0);
        assert_eq!(Category::BlockBorder.label(), 0);
        assert_eq!(Category::Between.label(), 0);
    }

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_category_map_round_trip() {
        let map = CategoryMap::from_fn(|c| c.name().len());
        assert_eq!(*map.get(Category::Inside), "inside".len());
        assert_eq!(*map.get(Category::OutsideDamaged), "outside_damaged".len());

        let doubled = map.map(|_, v| v * 2);
        assert_eq!(*doubled.get(Category::Between), "between".len() * 2);
    }

    #[test]
    fn test_try_from_fn_propagates_error() {
        let result: Result<CategoryMap<usize>, &str> = CategoryMap::try_from_fn(|c| {
            if c == Category::BlockBorder {
                Err("boom")
            } else {
                Ok(0)
            }
        });
        assert!(result.is_err());
    }
}
