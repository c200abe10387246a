//! 使用统计报表模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 报表类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportType {
    TotalVisits,
    TotalVisitsPerMonth,
    TotalDownloads,
    TopCountries,
    TopCities,
    Other(String),
}

impl From<String> for ReportType {
    fn from(raw: String) -> Self {
        // 后端对首字母大小写并不统一，例如 `topCountries`
        match raw.to_ascii_lowercase().as_str() {
            "totalvisits" => ReportType::TotalVisits,
            "totalvisitspermonth" => ReportType::TotalVisitsPerMonth,
            "totaldownloads" => ReportType::TotalDownloads,
            "topcountries" => ReportType::TopCountries,
            "topcities" => ReportType::TopCities,
            _ => ReportType::Other(raw),
        }
    }
}

impl From<ReportType> for String {
    fn from(report_type: ReportType) -> Self {
        report_type.to_string()
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::TotalVisits => write!(f, "TotalVisits"),
            ReportType::TotalVisitsPerMonth => write!(f, "TotalVisitsPerMonth"),
            ReportType::TotalDownloads => write!(f, "TotalDownloads"),
            ReportType::TopCountries => write!(f, "TopCountries"),
            ReportType::TopCities => write!(f, "TopCities"),
            ReportType::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// 报表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Point {
    /// 对象 ID（访问量报表中为仓储对象 UUID）
    pub id: String,
    /// 后端给出的标签
    pub label: String,
    #[serde(rename = "type")]
    pub point_type: String,
    /// 各列取值
    pub values: BTreeMap<String, u64>,
}

/// 使用统计报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    pub id: String,
    #[serde(rename = "report-type", alias = "report_type")]
    pub report_type: ReportType,
    #[serde(default)]
    pub points: Vec<Point>,
}
