use serde::{Deserialize, Serialize};

/// 价格比较统计 (派生值, 不缓存)
///
/// count == 0 表示"无可比数据", 此时其余字段全部为 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
    pub variance_from_avg: f64,  // (参考价 - 均价) / 均价 * 100
    pub variance_from_min: f64,  // (参考价 - 最低价) / 最低价 * 100
}

impl PricingStats {
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}
