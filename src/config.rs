use crate::error::Result;
use crate::models::PriceBasis;
use crate::service::validate_threshold;
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// 置信度阈值 (0-100, 含)
    pub threshold: f64,
    /// 外层循环是否使用 rayon 并行
    pub parallel: bool,
    pub price_basis: PriceBasis,
    /// size/feature 是否参与分词
    pub include_attributes: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            parallel: true,
            price_basis: PriceBasis::Price,
            include_attributes: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub reference_path: Option<String>,
    pub observed_path: Option<String>,
}

impl AppConfig {
    /// 加载顺序: 默认值 -> price-match.toml (可选) -> 环境变量
    ///
    /// 环境变量前缀 PRICE_MATCH, 层级分隔符 "__",
    /// 例如 PRICE_MATCH_MATCHING__THRESHOLD=60
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("price-match").required(false))
            .add_source(
                config::Environment::with_prefix("PRICE_MATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        validate_threshold(config.matching.threshold)?;
        Ok(config)
    }
}
