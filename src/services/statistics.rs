//! 使用统计表格
//!
//! 把报表的点转换成表格行；访问量报表的行标签需要按对象 ID 查出
//! 对象名称，其余报表直接使用后端给出的标签。

use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::models::{Point, ReportType, UsageReport};
use crate::services::name::DsoNameService;
use crate::storage::repository::ObjectRepository;

pub const NO_NAME_KEY: &str = "statistics.table.no-name";

/// 表格行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsRow {
    pub label: String,
    pub values: Vec<u64>,
}

/// 统计表格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsTable {
    pub report_id: String,
    pub report_type: String,
    pub has_data: bool,
    pub headers: Vec<String>,
    pub rows: Vec<StatisticsRow>,
}

pub struct StatisticsTableService {
    objects: Arc<dyn ObjectRepository>,
    names: DsoNameService,
}

impl StatisticsTableService {
    pub fn new(objects: Arc<dyn ObjectRepository>) -> Self {
        Self {
            objects,
            names: DsoNameService::new(),
        }
    }

    pub async fn build_table(&self, report: &UsageReport) -> StatisticsTable {
        let headers: Vec<String> = report
            .points
            .first()
            .map(|p| p.values.keys().cloned().collect())
            .unwrap_or_default();

        let labels = join_all(
            report
                .points
                .iter()
                .map(|point| self.get_label(&report.report_type, point)),
        )
        .await;

        let rows = report
            .points
            .iter()
            .zip(labels)
            .map(|(point, label)| StatisticsRow {
                label,
                values: headers
                    .iter()
                    .map(|h| point.values.get(h).copied().unwrap_or(0))
                    .collect(),
            })
            .collect();

        StatisticsTable {
            report_id: report.id.clone(),
            report_type: report.report_type.to_string(),
            has_data: !report.points.is_empty(),
            headers,
            rows,
        }
    }

    pub async fn get_label(&self, report_type: &ReportType, point: &Point) -> String {
        match report_type {
            ReportType::TotalVisits => {
                let rd = self.objects.find_by_id(&point.id).await;
                match rd.payload() {
                    Some(object) => self.names.get_name(object),
                    None => {
                        debug!("No object for statistics point {}", point.id);
                        NO_NAME_KEY.to_string()
                    }
                }
            }
            _ => point.label.clone(),
        }
    }
}
