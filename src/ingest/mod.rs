//! 无状态导入: 原始列文本 / CSV -> 不可变商品集合
//!
//! 每个商品在这里完成唯一一次归一化, 之后 Matcher 只读 tokens。

pub mod columns;
pub mod csv_loader;
pub mod rows;

pub use columns::{ObservedColumns, ReferenceColumns};
pub use csv_loader::{load_observed_csv, load_observed_file, load_references_csv, load_references_file};
pub use rows::{ingest_observed, ingest_references, parse_price, IngestOptions, ObservedRow, ReferenceRow};
