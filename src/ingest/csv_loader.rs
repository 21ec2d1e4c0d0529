//! CSV 导入
//!
//! 带表头的 CSV, 列名与 `ReferenceRow` / `ObservedRow` 字段一致, 缺列视为缺省。
//! 参考: id, code, description, price, currency, incoterm, min_order_qty, size, feature
//! 观测: id, description, price, currency, min_price, max_price, retail_price,
//!       wholesale_price, source, region

use crate::error::Result;
use crate::ingest::rows::{ingest_observed, ingest_references, IngestOptions, ObservedRow, ReferenceRow};
use crate::models::{ObservedItem, ReferenceItem};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

pub fn load_references_csv<R: Read>(reader: R, options: &IngestOptions) -> Result<Vec<ReferenceItem>> {
    let rows: Vec<ReferenceRow> = read_rows(reader)?;
    ingest_references(rows, options)
}

pub fn load_observed_csv<R: Read>(reader: R) -> Result<Vec<ObservedItem>> {
    let rows: Vec<ObservedRow> = read_rows(reader)?;
    ingest_observed(rows)
}

pub fn load_references_file(path: impl AsRef<Path>, options: &IngestOptions) -> Result<Vec<ReferenceItem>> {
    let file = std::fs::File::open(path.as_ref())?;
    tracing::info!("读取参考商品文件: {}", path.as_ref().display());
    load_references_csv(file, options)
}

pub fn load_observed_file(path: impl AsRef<Path>) -> Result<Vec<ObservedItem>> {
    let file = std::fs::File::open(path.as_ref())?;
    tracing::info!("读取观测商品文件: {}", path.as_ref().display());
    load_observed_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PriceMatchError;

    #[test]
    fn loads_reference_csv_with_missing_columns() {
        let data = "code,description,price\nV-1,Standard Valve,10\nG-2, Super Glue 500ml ,\"1,200.50\"\n";
        let items = load_references_csv(data.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), "REF-1");
        assert_eq!(items[0].tokens(), ["standard", "valve"]);
        assert_eq!(items[1].description(), "Super Glue 500ml");
        assert_eq!(items[1].price(), 1200.5);
        assert_eq!(items[1].attributes().size, None);
    }

    #[test]
    fn loads_observed_csv_with_secondary_prices() {
        let data = "id,description,price,retail_price,source\nO-1,Valve Standard,11,14.99,shop\nO-2,Unrelated Widget,999,,\n";
        let items = load_observed_csv(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].secondary().retail, Some(14.99));
        assert_eq!(items[0].source(), Some("shop"));
        assert_eq!(items[1].secondary().retail, None);
        assert_eq!(items[1].source(), None);
    }

    #[test]
    fn duplicate_csv_ids_fail() {
        let data = "id,description,price\nA,Valve,1\nA,Pipe,2\n";
        let err = load_observed_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PriceMatchError::DuplicateId { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_observed_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, PriceMatchError::Io(_)));
    }
}
