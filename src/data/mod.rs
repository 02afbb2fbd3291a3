/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TransactionTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ TransactionTable │  Vec<Transaction>, distinct values, age bounds
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → matching rows (order kept)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  totals, sales by category, sales by age group
///   └───────────┘
/// ```
///
/// `filter` and `aggregate` are pure and never touch the filesystem.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
