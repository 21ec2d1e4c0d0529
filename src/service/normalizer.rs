//! 文本归一化: 原始描述 -> 有序 token 序列
//!
//! 步骤: 小写 -> 非 [a-z0-9] 替换为空格 -> 按空白切分 -> 数字+单位拆分
//! -> 缩写/单位展开 -> 去停用词 -> 排序 (含数字优先, 长 token 优先)。

use std::cmp::Ordering;

/// 缩写/单位展开表 (整 token 精确匹配)
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("kg", "kilogram"),
    ("g", "gram"),
    ("mg", "milligram"),
    ("ml", "milliliter"),
    ("l", "liter"),
    ("mm", "millimeter"),
    ("cm", "centimeter"),
    ("oz", "ounce"),
    ("lb", "pound"),
    ("lbs", "pound"),
    ("pu", "polyurethane"),
    ("qty", "quantity"),
    ("pc", "piece"),
    ("pcs", "pieces"),
];

/// 营销/填充词
const STOP_WORDS: &[&str] = &[
    "premium",
    "high",
    "quality",
    "original",
    "authentic",
    "top",
    "grade",
    "best",
    "genuine",
    "the",
    "and",
    "for",
    "with",
];

/// 归一化入口; 空输入返回空序列
pub fn normalize(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut tokens: Vec<String> = Vec::new();
    for raw in cleaned.split_whitespace() {
        for part in split_quantity_unit(raw) {
            let expanded = expand_abbreviation(part);
            if !is_stop_word(expanded) {
                tokens.push(expanded.to_string());
            }
        }
    }

    // sort_by 是稳定排序, 同组同长度保持原始顺序
    tokens.sort_by(compare_tokens);
    tokens
}

/// "500ml" -> ["500", "ml"]; 仅当后缀是已知单位时拆分
fn split_quantity_unit(token: &str) -> Vec<&str> {
    let split_at = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    if split_at == 0 || split_at == token.len() {
        return vec![token];
    }

    let (quantity, unit) = token.split_at(split_at);
    if unit.chars().all(|c| c.is_ascii_lowercase()) && lookup_abbreviation(unit).is_some() {
        vec![quantity, unit]
    } else {
        vec![token]
    }
}

fn lookup_abbreviation(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, long)| *long)
}

/// 展开缩写; 未命中原样返回
pub fn expand_abbreviation(token: &str) -> &str {
    lookup_abbreviation(token).unwrap_or(token)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// 含数字的 token 在前; 组内按长度降序
fn compare_tokens(a: &String, b: &String) -> Ordering {
    let a_digit = a.chars().any(|c| c.is_ascii_digit());
    let b_digit = b.chars().any(|c| c.is_ascii_digit());
    b_digit
        .cmp(&a_digit)
        .then_with(|| b.len().cmp(&a.len()))
}
