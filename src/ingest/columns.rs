use crate::ingest::rows::{ObservedRow, ReferenceRow};

/// 参考商品的列文本 (每列一段多行文本, 按行号对齐)
#[derive(Debug, Clone, Default)]
pub struct ReferenceColumns {
    pub ids: Option<String>,
    pub codes: Option<String>,
    pub descriptions: Option<String>,
    pub prices: Option<String>,
    pub currencies: Option<String>,
    pub incoterms: Option<String>,
    pub min_order_qtys: Option<String>,
    pub sizes: Option<String>,
    pub features: Option<String>,
}

impl ReferenceColumns {
    /// 按行号组合成行; 全空行丢弃
    pub fn rows(&self) -> Vec<ReferenceRow> {
        let columns = [
            split_column(&self.ids),
            split_column(&self.codes),
            split_column(&self.descriptions),
            split_column(&self.prices),
            split_column(&self.currencies),
            split_column(&self.incoterms),
            split_column(&self.min_order_qtys),
            split_column(&self.sizes),
            split_column(&self.features),
        ];

        zip_rows(&columns)
            .map(|cells| {
                let [id, code, description, price, currency, incoterm, min_order_qty, size, feature] =
                    cells;
                ReferenceRow {
                    id,
                    code,
                    description,
                    price,
                    currency,
                    incoterm,
                    min_order_qty,
                    size,
                    feature,
                }
            })
            .collect()
    }
}

/// 观测商品的列文本
#[derive(Debug, Clone, Default)]
pub struct ObservedColumns {
    pub ids: Option<String>,
    pub descriptions: Option<String>,
    pub prices: Option<String>,
    pub currencies: Option<String>,
    pub min_prices: Option<String>,
    pub max_prices: Option<String>,
    pub retail_prices: Option<String>,
    pub wholesale_prices: Option<String>,
    pub sources: Option<String>,
    pub regions: Option<String>,
}

impl ObservedColumns {
    pub fn rows(&self) -> Vec<ObservedRow> {
        let columns = [
            split_column(&self.ids),
            split_column(&self.descriptions),
            split_column(&self.prices),
            split_column(&self.currencies),
            split_column(&self.min_prices),
            split_column(&self.max_prices),
            split_column(&self.retail_prices),
            split_column(&self.wholesale_prices),
            split_column(&self.sources),
            split_column(&self.regions),
        ];

        zip_rows(&columns)
            .map(|cells| {
                let [id, description, price, currency, min_price, max_price, retail_price, wholesale_price, source, region] =
                    cells;
                ObservedRow {
                    id,
                    description,
                    price,
                    currency,
                    min_price,
                    max_price,
                    retail_price,
                    wholesale_price,
                    source,
                    region,
                }
            })
            .collect()
    }
}

fn split_column(column: &Option<String>) -> Vec<&str> {
    column.as_deref().map(|text| text.lines().collect()).unwrap_or_default()
}

/// 行数取最长列; 缺失或空白单元格为 None
fn zip_rows<'a, const N: usize>(
    columns: &'a [Vec<&'a str>; N],
) -> impl Iterator<Item = [Option<String>; N]> + 'a {
    let row_count = columns.iter().map(Vec::len).max().unwrap_or(0);
    (0..row_count)
        .map(move |row| {
            std::array::from_fn(|col| {
                columns[col]
                    .get(row)
                    .map(|cell| cell.trim())
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
            })
        })
        .filter(|cells: &[Option<String>; N]| cells.iter().any(Option::is_some))
}
