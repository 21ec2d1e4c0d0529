use crate::models::{ObservedItem, PricingStats};
use serde::{Deserialize, Serialize};

/// 参与统计的观测价格点
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBasis {
    #[default]
    Price,
    Minimum,
    Maximum,
    Retail,
    Wholesale,
}

impl PriceBasis {
    /// 取观测商品对应价格点; 缺失则返回 None (该观测不参与统计)
    pub fn select(&self, item: &ObservedItem) -> Option<f64> {
        match self {
            PriceBasis::Price => Some(item.price()),
            PriceBasis::Minimum => item.secondary().minimum,
            PriceBasis::Maximum => item.secondary().maximum,
            PriceBasis::Retail => item.secondary().retail,
            PriceBasis::Wholesale => item.secondary().wholesale,
        }
    }
}

/// 已接受的匹配 (join 回观测商品后的视图)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedObservation {
    pub observed_id: String,
    pub description: String,
    pub score: f64,
    pub price: Option<f64>,
    pub currency: String,
    pub source: Option<String>,
    pub region: Option<String>,
}

/// 单个参考商品的比较结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceComparison {
    pub reference_id: String,
    pub code: String,
    pub description: String,
    pub reference_price: f64,
    pub currency: String,
    pub matches: Vec<MatchedObservation>,
    pub stats: PricingStats,
    /// 价格为 0/负数/非有限值而被排除的观测数量
    pub excluded_prices: usize,
}
