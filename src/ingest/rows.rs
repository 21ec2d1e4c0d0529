use crate::error::{PriceMatchError, Result};
use crate::models::{
    ObservedFields, ObservedItem, ReferenceAttributes, ReferenceFields, ReferenceItem,
    SecondaryPrices, DEFAULT_CURRENCY,
};
use indexmap::IndexSet;
use serde::Deserialize;

/// 导入选项
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// size/feature 是否拼接到描述后参与分词
    pub include_attributes: bool,
}

/// 参考商品原始行 (所有单元格均可缺省, 同时作为 CSV 记录)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceRow {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub incoterm: Option<String>,
    pub min_order_qty: Option<String>,
    pub size: Option<String>,
    pub feature: Option<String>,
}

/// 观测商品原始行
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObservedRow {
    pub id: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub retail_price: Option<String>,
    pub wholesale_price: Option<String>,
    pub source: Option<String>,
    pub region: Option<String>,
}

/// 构建参考商品集合; 提供的ID重复时报错
pub fn ingest_references<I>(rows: I, options: &IngestOptions) -> Result<Vec<ReferenceItem>>
where
    I: IntoIterator<Item = ReferenceRow>,
{
    let rows: Vec<ReferenceRow> = rows.into_iter().collect();
    let ids = assign_ids(rows.iter().map(|r| r.id.as_deref()), "REF", "reference")?;
    let mut items = Vec::with_capacity(rows.len());

    for (row, id) in rows.into_iter().zip(ids) {
        let price = primary_price(row.price.as_deref(), &id);
        let fields = ReferenceFields {
            code: clean(row.code).unwrap_or_default(),
            description: clean(row.description).unwrap_or_default(),
            price,
            currency: currency(row.currency),
            attributes: ReferenceAttributes {
                incoterm: clean(row.incoterm),
                min_order_qty: clean(row.min_order_qty),
                size: clean(row.size),
                feature: clean(row.feature),
            },
            id,
        };
        items.push(ReferenceItem::from_fields(fields, options.include_attributes));
    }

    tracing::info!("导入参考商品: {} 条", items.len());
    Ok(items)
}

/// 构建观测商品集合
pub fn ingest_observed<I>(rows: I) -> Result<Vec<ObservedItem>>
where
    I: IntoIterator<Item = ObservedRow>,
{
    let rows: Vec<ObservedRow> = rows.into_iter().collect();
    let ids = assign_ids(rows.iter().map(|r| r.id.as_deref()), "OBS", "observed")?;
    let mut items = Vec::with_capacity(rows.len());

    for (row, id) in rows.into_iter().zip(ids) {
        let price = primary_price(row.price.as_deref(), &id);
        let fields = ObservedFields {
            description: clean(row.description).unwrap_or_default(),
            price,
            currency: currency(row.currency),
            secondary: SecondaryPrices {
                minimum: row.min_price.as_deref().and_then(parse_price),
                maximum: row.max_price.as_deref().and_then(parse_price),
                retail: row.retail_price.as_deref().and_then(parse_price),
                wholesale: row.wholesale_price.as_deref().and_then(parse_price),
            },
            source: clean(row.source),
            region: clean(row.region),
            id,
        };
        items.push(ObservedItem::from_fields(fields));
    }

    tracing::info!("导入观测商品: {} 条", items.len());
    Ok(items)
}

/// 解析价格文本: 去掉货币符号、空格和千分位逗号; 非有限值视为无法解析
///
/// 只接受 "." 作小数点。逗号必须是千分位 (每组3位数字, 位于小数点前),
/// "12,5" 这类小数逗号返回 None 而不是 125。
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let (integer, fraction) = match cleaned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (cleaned.as_str(), None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }
    let mut groups = integer.split(',');
    let head = groups.next().unwrap_or_default();
    if integer.contains(',') {
        let head_digits = head.trim_start_matches(['-', '+']);
        if head_digits.is_empty()
            || head_digits.len() > 3
            || !head_digits.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }

    digits.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// 主价格缺失或无法解析时记为 0.0 (统计阶段会被排除)
fn primary_price(raw: Option<&str>, id: &str) -> f64 {
    match raw.and_then(parse_price) {
        Some(price) => price,
        None => {
            tracing::warn!("Item {}: 价格缺失或无法解析 ({:?}), 记为 0", id, raw);
            0.0
        }
    }
}

/// 分配ID: 先收集全部提供的ID (重复报错), 再为缺失行生成 `{prefix}-{行号}`;
/// 生成的ID若已被占用, 依次尝试 `{prefix}-{行号}-2`, `-3` ...
fn assign_ids<'a, I>(raw_ids: I, prefix: &str, collection: &'static str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let supplied: Vec<Option<String>> = raw_ids
        .into_iter()
        .map(|raw| raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        .collect();

    let mut taken: IndexSet<String> = IndexSet::new();
    for id in supplied.iter().flatten() {
        if !taken.insert(id.clone()) {
            return Err(PriceMatchError::DuplicateId { collection, id: id.clone() });
        }
    }

    let mut ids = Vec::with_capacity(supplied.len());
    for (idx, id) in supplied.into_iter().enumerate() {
        match id {
            Some(id) => ids.push(id),
            None => {
                let base = format!("{}-{}", prefix, idx + 1);
                let mut candidate = base.clone();
                let mut suffix = 2;
                while taken.contains(&candidate) {
                    candidate = format!("{}-{}", base, suffix);
                    suffix += 1;
                }
                taken.insert(candidate.clone());
                ids.push(candidate);
            }
        }
    }
    Ok(ids)
}

fn clean(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn currency(cell: Option<String>) -> String {
    clean(cell)
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_row(id: Option<&str>, description: &str, price: &str) -> ReferenceRow {
        ReferenceRow {
            id: id.map(String::from),
            description: Some(description.into()),
            price: Some(price.into()),
            ..Default::default()
        }
    }

    #[test]
    fn parses_decorated_prices() {
        assert_eq!(parse_price("12.50"), Some(12.5));
        assert_eq!(parse_price(" $1,234.00 "), Some(1234.0));
        assert_eq!(parse_price("€ 9"), Some(9.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("n/a"), None);
        assert_eq!(parse_price("inf"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("1,234"), Some(1234.0));
        assert_eq!(parse_price("-1,000,000.25"), Some(-1_000_000.25));
    }

    #[test]
    fn decimal_comma_is_rejected() {
        assert_eq!(parse_price("12,5"), None);
        assert_eq!(parse_price("1,23"), None);
        assert_eq!(parse_price("1.234,56"), None);
        assert_eq!(parse_price(",500"), None);
    }

    #[test]
    fn generated_id_skips_supplied_ids() {
        let rows = vec![
            reference_row(Some("REF-2"), "Standard Valve", "10"),
            reference_row(None, "Brass Valve", "12"),
            reference_row(Some("REF-2-2"), "Glue", "3"),
            reference_row(None, "Pipe", "4"),
        ];
        let items = ingest_references(rows, &IngestOptions::default()).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["REF-2", "REF-2-3", "REF-2-2", "REF-4"]);

        let observed = vec![
            ObservedRow { id: None, description: Some("Valve".into()), ..Default::default() },
            ObservedRow { id: Some("OBS-1".into()), description: Some("Pipe".into()), ..Default::default() },
        ];
        let items = ingest_observed(observed).unwrap();
        assert_eq!(items[0].id(), "OBS-1-2");
        assert_eq!(items[1].id(), "OBS-1");
    }

    #[test]
    fn generates_missing_ids_by_position() {
        let rows = vec![
            reference_row(None, "Standard Valve", "10"),
            reference_row(Some("  SKU-9 "), "Brass Valve", "12"),
            reference_row(Some(""), "Glue", "3"),
        ];
        let items = ingest_references(rows, &IngestOptions::default()).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["REF-1", "SKU-9", "REF-3"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let rows = vec![
            reference_row(Some("A"), "Valve", "1"),
            reference_row(Some("A"), "Pipe", "2"),
        ];
        let err = ingest_references(rows, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, PriceMatchError::DuplicateId { collection: "reference", .. }));
    }

    #[test]
    fn unparseable_primary_price_defaults_to_zero() {
        let rows = vec![ObservedRow {
            description: Some("Valve".into()),
            price: Some("call us".into()),
            retail_price: Some("oops".into()),
            wholesale_price: Some("4.20".into()),
            currency: Some(" eur ".into()),
            ..Default::default()
        }];
        let items = ingest_observed(rows).unwrap();
        assert_eq!(items[0].id(), "OBS-1");
        assert_eq!(items[0].price(), 0.0);
        assert_eq!(items[0].currency(), "EUR");
        assert_eq!(items[0].secondary().retail, None);
        assert_eq!(items[0].secondary().wholesale, Some(4.2));
    }

    #[test]
    fn tokens_are_computed_at_ingestion() {
        let rows = vec![ReferenceRow {
            description: Some("Premium Ball Valve".into()),
            size: Some("50mm".into()),
            ..Default::default()
        }];
        let plain = ingest_references(rows.clone(), &IngestOptions::default()).unwrap();
        assert_eq!(plain[0].tokens(), ["valve", "ball"]);

        let options = IngestOptions { include_attributes: true };
        let enriched = ingest_references(rows, &options).unwrap();
        assert_eq!(enriched[0].tokens(), ["50", "millimeter", "valve", "ball"]);
        assert_eq!(enriched[0].currency(), "USD");
        assert_eq!(enriched[0].price(), 0.0);
    }
}
