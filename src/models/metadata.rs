//! 元数据模型
//!
//! 仓储对象的元数据以字段名（如 `dc.contributor.author`）为键，
//! 每个字段可以有多个有序的值。值可携带 authority，指向另一个对象。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个元数据值
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MetadataValue {
    /// 值
    pub value: String,
    /// 语言
    pub language: Option<String>,
    /// authority（通常是被引用对象的 UUID）
    pub authority: Option<String>,
    /// authority 置信度，-1 表示未设置
    pub confidence: i32,
    /// 在字段内的位置
    pub place: i32,
}

impl MetadataValue {
    /// 创建不带 authority 的值
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            confidence: -1,
            ..Default::default()
        }
    }

    /// 创建带 authority 的值
    pub fn with_authority(value: &str, authority: &str) -> Self {
        Self {
            value: value.to_string(),
            authority: Some(authority.to_string()),
            confidence: 600,
            ..Default::default()
        }
    }

    /// 非空 authority
    pub fn authority_key(&self) -> Option<&str> {
        self.authority.as_deref().filter(|a| !a.is_empty())
    }

    /// 是否携带非空 authority
    pub fn has_authority(&self) -> bool {
        self.authority_key().is_some()
    }
}

/// 字段名模式
///
/// `*` 匹配任意字符序列，单独的 `*` 匹配所有字段；不含 `*` 时要求完全相等。
#[derive(Debug, Clone)]
pub enum KeyPattern {
    Any,
    Exact(String),
    Wildcard(Regex),
}

impl KeyPattern {
    /// 编译模式；无法编译的通配模式不匹配任何字段
    pub fn compile(pattern: &str) -> Option<Self> {
        if pattern == "*" {
            return Some(Self::Any);
        }
        if !pattern.contains('*') {
            return Some(Self::Exact(pattern.to_string()));
        }
        let expr = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"));
        match Regex::new(&expr) {
            Ok(re) => Some(Self::Wildcard(re)),
            Err(e) => {
                tracing::warn!("Invalid metadata key pattern {}: {}", pattern, e);
                None
            }
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => key == expected,
            Self::Wildcard(re) => re.is_match(key),
        }
    }
}

/// 判断字段名是否匹配模式
pub fn key_matches(key: &str, pattern: &str) -> bool {
    KeyPattern::compile(pattern).is_some_and(|p| p.matches(key))
}

/// 元数据集合
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct MetadataMap(BTreeMap<String, Vec<MetadataValue>>);

impl MetadataMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// 追加一个值，place 取当前字段内的序号
    pub fn add(&mut self, key: &str, mut value: MetadataValue) {
        let values = self.0.entry(key.to_string()).or_default();
        value.place = values.len() as i32;
        values.push(value);
    }

    /// 获取字段的全部值（精确匹配）
    pub fn values(&self, key: &str) -> &[MetadataValue] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 获取匹配任一模式的全部值
    ///
    /// 结果按模式顺序排列，同一模式下按字段名排序，字段内保持原有顺序。
    pub fn all_values(&self, patterns: &[&str]) -> Vec<&MetadataValue> {
        let mut result = Vec::new();
        for pattern in patterns {
            match KeyPattern::compile(pattern) {
                Some(KeyPattern::Exact(key)) => result.extend(self.values(&key).iter()),
                Some(compiled) => {
                    for (key, values) in &self.0 {
                        if compiled.matches(key) {
                            result.extend(values.iter());
                        }
                    }
                }
                None => {}
            }
        }
        result
    }

    /// 第一个匹配值
    pub fn first(&self, pattern: &str) -> Option<&MetadataValue> {
        self.all_values(&[pattern]).into_iter().next()
    }

    /// 第一个匹配值的文本
    pub fn first_value(&self, pattern: &str) -> Option<&str> {
        self.first(pattern).map(|v| v.value.as_str())
    }

    /// 是否存在匹配的值
    pub fn has(&self, pattern: &str) -> bool {
        self.first(pattern).is_some()
    }

    /// 移除字段的全部值
    pub fn remove(&mut self, key: &str) -> Option<Vec<MetadataValue>> {
        self.0.remove(key)
    }

    /// 字段名列表
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
