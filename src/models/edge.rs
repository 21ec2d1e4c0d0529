use serde::{Deserialize, Serialize};

/// 匹配边 (referenceId, observedId, score)
///
/// 只有 score 严格大于 MATCH_FLOOR 时才会生成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEdge {
    pub reference_id: String,
    pub observed_id: String,
    pub score: f64,
}

/// 存储下限 (不含): score <= 10.0 的配对永远不落地
pub const MATCH_FLOOR: f64 = 10.0;
