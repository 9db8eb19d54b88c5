/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///  remote JSON / local .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Dataset (month - 1, base + variance)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  base temperature, Vec<VarianceRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  normalized records → .csv
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
