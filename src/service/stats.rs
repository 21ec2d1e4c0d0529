use crate::models::PricingStats;

/// 计算参考价相对观测价格列表的统计
///
/// 空列表返回全 0 (count == 0 即"无可比数据")。
/// 分母为 0 或结果非有限值时对应偏差记为 0.0, 保证所有字段有限。
pub fn aggregate(reference_price: f64, observed_prices: &[f64]) -> PricingStats {
    if observed_prices.is_empty() {
        return PricingStats::default();
    }

    let count = observed_prices.len();
    let min = observed_prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = observed_prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // 先除后加, 接近 f64::MAX 的价格求和也不会溢出
    let n = count as f64;
    let avg = observed_prices.iter().map(|p| p / n).sum::<f64>();

    PricingStats {
        min,
        max,
        avg,
        count,
        variance_from_avg: percent_variance(reference_price, avg),
        variance_from_min: percent_variance(reference_price, min),
    }
}

fn percent_variance(reference_price: f64, base: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    let variance = (reference_price - base) / base * 100.0;
    if variance.is_finite() {
        variance
    } else {
        0.0
    }
}
