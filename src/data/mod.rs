/// Data layer: row types, loading, projection, lookup and label tables.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (rows + id index)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐        ┌──────────┐
///   │  lookup   │ ─────▶ │ project  │  row → FeatureVector
///   └──────────┘        └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  label    │  code → classification text (per view)
///   └──────────┘
/// ```

pub mod label;
pub mod loader;
pub mod lookup;
pub mod model;
pub mod project;
