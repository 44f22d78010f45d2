use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoryValue, FilterColumn, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which distinct values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps filter column → set of selected values.
/// A column that is absent behaves like an empty selection (matches nothing).
pub type FilterState = BTreeMap<FilterColumn, BTreeSet<CategoryValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &SalaryDataset) -> FilterState {
    FilterColumn::ALL
        .iter()
        .map(|col| {
            let all = dataset.distinct_values.get(col).cloned().unwrap_or_default();
            (*col, all)
        })
        .collect()
}

/// Whether a record passes every column filter.
///
/// AND across the four columns, set membership within a column.
pub fn record_matches(record: &SalaryRecord, filters: &FilterState) -> bool {
    FilterColumn::ALL.iter().all(|col| {
        filters
            .get(col)
            .is_some_and(|selected| selected.contains(&col.value_of(record)))
    })
}

/// Return indices of records that pass all filters, in table order.
pub fn filtered_indices(dataset: &SalaryDataset, filters: &FilterState) -> Vec<usize> {
    // Nothing selected somewhere → nothing can pass.
    if FilterColumn::ALL
        .iter()
        .any(|col| filters.get(col).map_or(true, BTreeSet::is_empty))
    {
        return Vec::new();
    }

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| record_matches(rec, filters))
        .map(|(i, _)| i)
        .collect()
}
