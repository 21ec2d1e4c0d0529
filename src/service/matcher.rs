use crate::models::{MatchEdge, ObservedItem, ReferenceItem, MATCH_FLOOR};
use crate::service::similarity::{JaccardScorer, SimilarityScorer};
use rayon::prelude::*;

/// 全量交叉匹配 (参考商品 × 观测商品)
///
/// 不建索引、不做 best-match 裁剪: 多对多, 只按 MATCH_FLOOR 过滤。
/// 输出顺序即 (references × observed) 的迭代顺序。
pub struct Matcher<S = JaccardScorer> {
    scorer: S,
}

impl Matcher<JaccardScorer> {
    pub fn new() -> Self {
        Self { scorer: JaccardScorer }
    }
}

impl Default for Matcher<JaccardScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SimilarityScorer> Matcher<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// 顺序执行
    pub fn run(&self, references: &[ReferenceItem], observed: &[ObservedItem]) -> Vec<MatchEdge> {
        tracing::info!(
            "[Matcher] 开始匹配: {} 个参考商品 x {} 个观测商品",
            references.len(),
            observed.len()
        );

        let total = references.len();
        let mut edges = Vec::new();
        for (idx, reference) in references.iter().enumerate() {
            edges.extend(self.match_row(reference, observed));

            // 进度日志 (每100个参考商品或第一个)
            let current = idx + 1;
            if current % 100 == 0 || current == 1 {
                tracing::debug!("[Matcher] 进度: {}/{}, 已生成边: {}", current, total, edges.len());
            }
        }

        tracing::info!(
            "[Matcher] 匹配完成: 评估 {} 对, 保留 {} 条边",
            references.len() * observed.len(),
            edges.len()
        );
        edges
    }

    /// 单个参考商品对所有观测商品打分
    fn match_row(&self, reference: &ReferenceItem, observed: &[ObservedItem]) -> Vec<MatchEdge> {
        observed
            .iter()
            .filter_map(|item| {
                let score = self.scorer.score(reference.tokens(), item.tokens());
                // 严格大于: 正好 10.0 丢弃
                (score > MATCH_FLOOR).then(|| MatchEdge {
                    reference_id: reference.id().to_string(),
                    observed_id: item.id().to_string(),
                    score,
                })
            })
            .collect()
    }
}

impl<S: SimilarityScorer + Sync> Matcher<S> {
    /// 外层循环按参考商品并行; 各行按输入顺序拼接, 结果与 run 一致
    pub fn run_parallel(
        &self,
        references: &[ReferenceItem],
        observed: &[ObservedItem],
    ) -> Vec<MatchEdge> {
        tracing::info!(
            "[Matcher] 开始并行匹配: {} 个参考商品 x {} 个观测商品",
            references.len(),
            observed.len()
        );

        let rows: Vec<Vec<MatchEdge>> = references
            .par_iter()
            .map(|reference| self.match_row(reference, observed))
            .collect();
        let edges: Vec<MatchEdge> = rows.into_iter().flatten().collect();

        tracing::info!(
            "[Matcher] 并行匹配完成: 评估 {} 对, 保留 {} 条边",
            references.len() * observed.len(),
            edges.len()
        );
        edges
    }
}
