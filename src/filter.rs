use std::collections::{BTreeSet, HashSet};

use crate::loader::Dataset;
use crate::types::{FilterSummary, SalesRecord};

/// The three filterable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    City,
    Category,
    Region,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::City, Column::Category, Column::Region];

    pub fn value_of(self, r: &SalesRecord) -> &str {
        match self {
            Column::City => &r.city,
            Column::Category => &r.category,
            Column::Region => &r.region,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::City => "Store(s)",
            Column::Category => "Product Category(s)",
            Column::Region => "Region(s)",
        }
    }
}

/// Current multi-select state.
///
/// `None` means no selection was made, which defaults to every value.
/// `Some` of an empty set means nothing is selected and nothing passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub cities: Option<BTreeSet<String>>,
    pub categories: Option<BTreeSet<String>>,
    pub regions: Option<BTreeSet<String>>,
}

impl Selection {
    pub fn get(&self, column: Column) -> Option<&BTreeSet<String>> {
        match column {
            Column::City => self.cities.as_ref(),
            Column::Category => self.categories.as_ref(),
            Column::Region => self.regions.as_ref(),
        }
    }

    pub fn set(&mut self, column: Column, values: Option<BTreeSet<String>>) {
        match column {
            Column::City => self.cities = values,
            Column::Category => self.categories = values,
            Column::Region => self.regions = values,
        }
    }

    pub fn matches(&self, r: &SalesRecord) -> bool {
        Column::ALL.iter().all(|&c| match self.get(c) {
            None => true,
            Some(allowed) => allowed.contains(c.value_of(r)),
        })
    }

    pub fn summary(&self) -> FilterSummary {
        let list = |c: Column| -> Option<Vec<String>> {
            self.get(c).map(|s| s.iter().cloned().collect())
        };
        FilterSummary {
            cities: list(Column::City),
            categories: list(Column::Category),
            regions: list(Column::Region),
        }
    }
}

/// Rows passing all three membership predicates, in dataset order.
pub fn apply<'a>(dataset: &'a Dataset, selection: &Selection) -> Vec<&'a SalesRecord> {
    dataset
        .records
        .iter()
        .filter(|r| selection.matches(r))
        .collect()
}

/// Distinct values per filter column, as offered to the user.
pub type FilterOptions = Vec<(Column, Vec<String>)>;

pub fn options(dataset: &Dataset) -> FilterOptions {
    Column::ALL
        .iter()
        .map(|&c| (c, distinct_values(dataset, c)))
        .collect()
}

/// Distinct values of a column in first-appearance order.
pub fn distinct_values(dataset: &Dataset, column: Column) -> Vec<String> {
    let mut seen = HashSet::new();
    dataset
        .records
        .iter()
        .map(|r| column.value_of(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{fixture, three_rows};

    fn set(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn no_selection_keeps_everything() {
        let ds = fixture();
        let out = apply(&ds, &Selection::default());
        assert_eq!(out.len(), ds.records.len());
    }

    #[test]
    fn selecting_every_value_returns_dataset_unchanged() {
        let ds = fixture();
        let mut every = Selection::default();
        for (column, values) in options(&ds) {
            every.set(column, Some(values.into_iter().collect()));
        }
        let out = apply(&ds, &every);
        let expected: Vec<&SalesRecord> = ds.records.iter().collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_selection_on_any_column_yields_nothing() {
        let ds = fixture();
        for column in Column::ALL {
            let mut sel = Selection::default();
            sel.set(column, Some(BTreeSet::new()));
            assert!(apply(&ds, &sel).is_empty(), "{column:?}");
        }
    }

    #[test]
    fn predicates_combine_with_and() {
        let ds = three_rows();
        let sel = Selection {
            cities: set(&["A"]),
            categories: None,
            regions: set(&["East"]),
        };
        let out = apply(&ds, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].total_sales, 100.0);
    }

    #[test]
    fn unknown_values_match_nothing() {
        let ds = three_rows();
        let sel = Selection {
            regions: set(&["North"]),
            ..Selection::default()
        };
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let ds = fixture();
        assert_eq!(
            distinct_values(&ds, Column::City),
            vec!["Pune", "Delhi", "Mumbai", "Chennai"]
        );
        assert_eq!(distinct_values(&ds, Column::Region), vec!["West", "North", "South"]);
    }
}
