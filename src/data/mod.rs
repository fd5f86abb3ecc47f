/// Data layer: launch records, loading, and the two chart queries.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RecordStore
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordStore │  Vec<LaunchRecord>, payload bounds, sites
///   └─────────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary  │   │  filter   │
///   └──────────┘   └──────────┘
///   pie slices      scatter points
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
