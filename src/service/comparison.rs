use crate::error::{PriceMatchError, Result};
use crate::models::{
    MatchEdge, MatchedObservation, ObservedItem, PriceBasis, ReferenceComparison, ReferenceItem,
};
use crate::service::stats::aggregate;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// 匹配边集合 (已按 MATCH_FLOOR 过滤), 阈值调整时无需重新匹配
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    edges: Vec<MatchEdge>,
}

impl MatchSet {
    pub fn new(edges: Vec<MatchEdge>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[MatchEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// score >= threshold, 保持生成顺序
    pub fn above(&self, threshold: f64) -> impl Iterator<Item = &MatchEdge> {
        self.edges.iter().filter(move |e| e.score >= threshold)
    }

    /// 按分数降序 (同分保持生成顺序)
    pub fn ranked(&self) -> Vec<&MatchEdge> {
        let mut ranked: Vec<&MatchEdge> = self.edges.iter().collect();
        ranked.sort_by(|a, b| by_score_desc(a, b));
        ranked
    }

    /// 某参考商品在阈值以上的边, 按分数降序
    pub fn for_reference(&self, reference_id: &str, threshold: f64) -> Vec<&MatchEdge> {
        let mut edges: Vec<&MatchEdge> = self
            .above(threshold)
            .filter(|e| e.reference_id == reference_id)
            .collect();
        edges.sort_by(|a, b| by_score_desc(a, b));
        edges
    }
}

impl From<Vec<MatchEdge>> for MatchSet {
    fn from(edges: Vec<MatchEdge>) -> Self {
        Self::new(edges)
    }
}

fn by_score_desc(a: &MatchEdge, b: &MatchEdge) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=100.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(PriceMatchError::InvalidThreshold(threshold))
    }
}

/// 价格是否可参与统计 (0、负数、非有限值排除)
fn is_eligible_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// 按置信度阈值过滤边, join 回商品并逐个参考商品计算统计
///
/// 每次调用都重新计算, 不缓存跨阈值的结果。
pub fn compare(
    references: &[ReferenceItem],
    observed: &[ObservedItem],
    matches: &MatchSet,
    threshold: f64,
    basis: PriceBasis,
) -> Result<Vec<ReferenceComparison>> {
    let threshold = validate_threshold(threshold)?;

    let observed_by_id: IndexMap<&str, &ObservedItem> =
        observed.iter().map(|o| (o.id(), o)).collect();

    // 参考商品ID -> 阈值以上的边 (保持输入顺序)
    let mut edges_by_reference: IndexMap<&str, Vec<&MatchEdge>> = references
        .iter()
        .map(|r| (r.id(), Vec::new()))
        .collect();
    for edge in matches.above(threshold) {
        match edges_by_reference.get_mut(edge.reference_id.as_str()) {
            Some(list) => list.push(edge),
            None => {
                return Err(PriceMatchError::DanglingEdge {
                    collection: "reference",
                    id: edge.reference_id.clone(),
                })
            }
        }
    }

    let mut comparisons = Vec::with_capacity(references.len());
    for reference in references {
        let mut edges = edges_by_reference
            .get(reference.id())
            .cloned()
            .unwrap_or_default();
        edges.sort_by(|a, b| by_score_desc(a, b));

        let mut matched = Vec::with_capacity(edges.len());
        let mut prices = Vec::with_capacity(edges.len());
        let mut excluded_prices = 0;

        for edge in edges {
            let Some(item) = observed_by_id.get(edge.observed_id.as_str()) else {
                return Err(PriceMatchError::DanglingEdge {
                    collection: "observed",
                    id: edge.observed_id.clone(),
                });
            };

            let price = basis.select(item);
            match price {
                Some(p) if is_eligible_price(p) => prices.push(p),
                Some(_) => excluded_prices += 1,
                None => {}
            }

            matched.push(MatchedObservation {
                observed_id: item.id().to_string(),
                description: item.description().to_string(),
                score: edge.score,
                price,
                currency: item.currency().to_string(),
                source: item.source().map(String::from),
                region: item.region().map(String::from),
            });
        }

        if excluded_prices > 0 {
            tracing::warn!(
                "Reference {}: {} 个观测价格为 0 或无效, 不参与统计",
                reference.id(),
                excluded_prices
            );
        }

        comparisons.push(ReferenceComparison {
            reference_id: reference.id().to_string(),
            code: reference.code().to_string(),
            description: reference.description().to_string(),
            reference_price: reference.price(),
            currency: reference.currency().to_string(),
            matches: matched,
            stats: aggregate(reference.price(), &prices),
            excluded_prices,
        });
    }

    Ok(comparisons)
}
