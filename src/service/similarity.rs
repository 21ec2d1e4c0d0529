use std::collections::HashSet;

/// 相似度评分接口 (0-100)
///
/// Matcher 通过该接口打分, 测试中可替换为计数/固定分值的实现。
pub trait SimilarityScorer {
    fn score(&self, a: &[String], b: &[String]) -> f64;
}

/// 默认实现: token 集合上的 Jaccard 指数
#[derive(Debug, Clone, Copy, Default)]
pub struct JaccardScorer;

impl SimilarityScorer for JaccardScorer {
    fn score(&self, a: &[String], b: &[String]) -> f64 {
        score(a, b)
    }
}

/// |A ∩ B| / |A ∪ B| * 100, 序列内重复只计一次; 任一为空返回 0
pub fn score(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let (small, large) = if set_a.len() <= set_b.len() {
        (&set_a, &set_b)
    } else {
        (&set_b, &set_a)
    };
    let intersection = small.iter().filter(|t| large.contains(*t)).count();
    let union = set_a.len() + set_b.len() - intersection;

    // 先乘后除, 使 1/10 这类比例精确得到 10.0
    (intersection as f64 * 100.0) / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn empty_side_scores_zero() {
        let a = toks(&["valve"]);
        assert_eq!(score(&[], &a), 0.0);
        assert_eq!(score(&a, &[]), 0.0);
        assert_eq!(score(&[], &[]), 0.0);
    }

    #[test]
    fn self_similarity_is_hundred() {
        let a = toks(&["standard", "valve", "25"]);
        assert_eq!(score(&a, &a), 100.0);
    }

    #[test]
    fn duplicates_count_once() {
        let a = toks(&["valve", "valve", "brass"]);
        let b = toks(&["valve", "brass"]);
        assert_eq!(score(&a, &b), 100.0);
    }

    #[test]
    fn partial_overlap() {
        let a = toks(&["standard", "valve"]);
        let b = toks(&["valve", "brass", "small"]);
        // 1 / 4
        assert_eq!(score(&a, &b), 25.0);
        assert_eq!(score(&b, &a), 25.0);
    }

    #[test]
    fn one_in_ten_is_exactly_ten() {
        let a = toks(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let b = toks(&["a"]);
        assert_eq!(score(&a, &b), 10.0);
    }

    #[test]
    fn trait_delegates_to_jaccard() {
        let a = toks(&["x", "y"]);
        let b = toks(&["y", "z"]);
        assert_eq!(JaccardScorer.score(&a, &b), score(&a, &b));
    }
}
