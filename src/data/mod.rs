/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  URL / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse table → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalaryDataset │  Vec<SalaryRecord>, distinct values per filter column
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected-set predicates → visible indices (FilteredView)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  metrics, top job titles, histogram, remote-work shares
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod stats;
