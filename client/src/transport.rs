//! Report transport abstraction and HTTP implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use uuid::Uuid;

use shared::models::{ReportConfig, ReportData};

use crate::error::ClientError;

/// Parameters for a report data request
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub config_id: Uuid,
    pub page: u32,
    pub page_size: u32,
    pub search_term: String,
}

/// Remote calls the controller depends on
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Read a report configuration; `None` when the id is unknown
    async fn read_config(&self, config_id: Uuid) -> Result<Option<ReportConfig>, ClientError>;

    /// Fetch one page of report data
    async fn get_report_data(&self, query: &ReportQuery) -> Result<ReportData, ClientError>;
}

/// HTTP transport against the backend report API
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn read_config(&self, config_id: Uuid) -> Result<Option<ReportConfig>, ClientError> {
        let url = format!("{}/api/v1/configs/{}", self.base_url, config_id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server { status, message });
        }

        let config = response
            .json::<ReportConfig>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(Some(config))
    }

    async fn get_report_data(&self, query: &ReportQuery) -> Result<ReportData, ClientError> {
        let url = format!(
            "{}/api/v1/configs/{}/report",
            self.base_url, query.config_id
        );
        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", query.page.to_string()),
                ("page_size", query.page_size.to_string()),
                ("search", query.search_term.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server { status, message });
        }

        response
            .json::<ReportData>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
