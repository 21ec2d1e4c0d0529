use crate::service::normalizer::normalize;
use serde::{Deserialize, Serialize};

/// 参考商品附加属性 (每项独立可缺省)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAttributes {
    pub incoterm: Option<String>,
    pub min_order_qty: Option<String>,
    pub size: Option<String>,
    pub feature: Option<String>,
}

/// 参考商品构造参数
#[derive(Debug, Clone, Default)]
pub struct ReferenceFields {
    pub id: String,
    pub code: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub attributes: ReferenceAttributes,
}

/// 参考目录商品 (ReferenceItem)
///
/// tokens 只在构造时由 Normalizer 计算一次; 字段只读, 保证描述与 tokens 一致。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceItem {
    id: String,
    code: String,
    description: String,
    price: f64,
    currency: String,
    attributes: ReferenceAttributes,
    tokens: Vec<String>,
}

impl ReferenceItem {
    /// 只有描述和价格的最小构造 (币种默认 USD)
    pub fn new(id: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self::from_fields(
            ReferenceFields {
                id: id.into(),
                description: description.into(),
                price,
                currency: DEFAULT_CURRENCY.to_string(),
                ..Default::default()
            },
            false,
        )
    }

    /// 完整构造; include_attributes 为 true 时 size/feature 拼接到描述后一起分词
    pub fn from_fields(fields: ReferenceFields, include_attributes: bool) -> Self {
        let tokens = if include_attributes {
            let mut text = fields.description.clone();
            for extra in [&fields.attributes.size, &fields.attributes.feature]
                .into_iter()
                .flatten()
            {
                text.push(' ');
                text.push_str(extra);
            }
            normalize(&text)
        } else {
            normalize(&fields.description)
        };

        Self {
            id: fields.id,
            code: fields.code,
            description: fields.description,
            price: fields.price,
            currency: fields.currency,
            attributes: fields.attributes,
            tokens,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn attributes(&self) -> &ReferenceAttributes {
        &self.attributes
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// 外部观测的次级价格点
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryPrices {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub retail: Option<f64>,
    pub wholesale: Option<f64>,
}

/// 外部观测构造参数
#[derive(Debug, Clone, Default)]
pub struct ObservedFields {
    pub id: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub secondary: SecondaryPrices,
    pub source: Option<String>,
    pub region: Option<String>,
}

/// 外部观测商品 (ObservedItem)
///
/// source/region 只是元数据, 不参与分词。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservedItem {
    id: String,
    description: String,
    price: f64,
    currency: String,
    secondary: SecondaryPrices,
    source: Option<String>,
    region: Option<String>,
    tokens: Vec<String>,
}

impl ObservedItem {
    pub fn new(id: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self::from_fields(ObservedFields {
            id: id.into(),
            description: description.into(),
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            ..Default::default()
        })
    }

    pub fn from_fields(fields: ObservedFields) -> Self {
        let tokens = normalize(&fields.description);
        Self {
            id: fields.id,
            description: fields.description,
            price: fields.price,
            currency: fields.currency,
            secondary: fields.secondary,
            source: fields.source,
            region: fields.region,
            tokens,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn secondary(&self) -> &SecondaryPrices {
        &self.secondary
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

pub const DEFAULT_CURRENCY: &str = "USD";
