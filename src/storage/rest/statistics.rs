//! Usage report endpoint

use async_trait::async_trait;

use super::{RestClient, segment};
use crate::models::{RemoteData, UsageReport};
use crate::storage::repository::UsageReportRepository;

#[derive(Clone, Debug)]
pub struct RestUsageReportRepository {
    client: RestClient,
}

impl RestUsageReportRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsageReportRepository for RestUsageReportRepository {
    async fn find_by_id(&self, report_id: &str) -> RemoteData<UsageReport> {
        let path = format!("statistics/usagereports/{}", segment(report_id));
        self.client.get(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportType;
    use crate::storage::rest::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/statistics/usagereports/item-1_TotalVisits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "item-1_TotalVisits",
                "report-type": "TotalVisits",
                "points": [{"id": "item-1", "label": "item-1", "type": "item", "values": {"views": 12}}]
            })))
            .mount(&server)
            .await;

        let repo = RestUsageReportRepository::new(client_for(&server));
        let report = repo.find_by_id("item-1_TotalVisits").await.payload.unwrap();
        assert_eq!(report.report_type, ReportType::TotalVisits);
        assert_eq!(report.points[0].values["views"], 12);
    }
}
