use thiserror::Error;

/// 错误类型
///
/// 核心四个组件 (normalize / score / match / aggregate) 不会失败,
/// 这里只覆盖导入、配置和结果拼接阶段。
#[derive(Debug, Error)]
pub enum PriceMatchError {
    #[error("Duplicate {collection} identifier: {id}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("Match edge references unknown {collection} item: {id}")]
    DanglingEdge { collection: &'static str, id: String },

    #[error("Threshold {0} out of range [0, 100]")]
    InvalidThreshold(f64),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PriceMatchError>;
