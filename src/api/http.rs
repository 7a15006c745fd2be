//! Implements the `Backend` trait against the real REST backend over HTTP.

use crate::api::{Ack, Backend, Created, TransactionFilter};
use crate::calendar::YearMonth;
use crate::model::{
    Category, CategoryDraft, CategoryStats, DailyReport, DailyStats, MonthlyRecap, MonthlyTrend,
    Transaction, TransactionDraft, TransactionType,
};
use crate::{Config, Result};
use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

/// Implements the `Backend` trait by calling the backend's `/api/...`
/// endpoints with `reqwest`.
pub(super) struct HttpBackend {
    base: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub(super) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            base: config.api_url().clone(),
            client: reqwest::Client::new(),
        })
    }

    /// Builds `<base>/api/<segments...>`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("The backend URL '{}' cannot be a base", self.base))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get<T>(&self, url: Url, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        trace!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("The request to {url} failed"))?;
        read_json(url, response).await
    }
}

/// Checks the status and decodes the JSON body.
async fn read_json<T>(url: Url, response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        bail!("The backend returned HTTP {status} for {url}");
    }
    response
        .json()
        .await
        .with_context(|| format!("Unable to decode the response from {url}"))
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let url = self.endpoint(&["transactions"])?;
        let mut query = Vec::new();
        if let Some(category) = &filter.category {
            query.push(("category", category.clone()));
        }
        if let Some(transaction_type) = filter.transaction_type {
            query.push(("type", transaction_type.to_string()));
        }
        if let Some(month) = filter.month {
            query.push(("month", month.to_string()));
        }
        self.get(url, &query).await
    }

    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Created> {
        let url = self.endpoint(&["transactions"])?;
        trace!("POST {url}");
        let response = self
            .client
            .post(url.clone())
            .json(draft)
            .send()
            .await
            .with_context(|| format!("The request to {url} failed"))?;
        read_json(url, response).await
    }

    async fn update_transaction(&self, id: u64, draft: &TransactionDraft) -> Result<Ack> {
        let url = self.endpoint(&["transactions", &id.to_string()])?;
        trace!("PUT {url}");
        let response = self
            .client
            .put(url.clone())
            .json(draft)
            .send()
            .await
            .with_context(|| format!("The request to {url} failed"))?;
        read_json(url, response).await
    }

    async fn delete_transaction(&self, id: u64) -> Result<Ack> {
        let url = self.endpoint(&["transactions", &id.to_string()])?;
        trace!("DELETE {url}");
        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .with_context(|| format!("The request to {url} failed"))?;
        read_json(url, response).await
    }

    async fn monthly_recap(&self, month: YearMonth) -> Result<MonthlyRecap> {
        let url = self.endpoint(&["transactions", "recap", &month.to_string()])?;
        self.get(url, &[]).await
    }

    async fn category_stats(&self, month: Option<YearMonth>) -> Result<Vec<CategoryStats>> {
        let url = self.endpoint(&["transactions", "stats"])?;
        self.get(url, &month_query(month)).await
    }

    async fn daily_stats(&self, month: Option<YearMonth>) -> Result<Vec<DailyStats>> {
        let url = self.endpoint(&["transactions", "daily-stats"])?;
        self.get(url, &month_query(month)).await
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport> {
        let url = self.endpoint(&["transactions", "daily-report", &date.to_string()])?;
        self.get(url, &[]).await
    }

    async fn monthly_trends(&self, months: Option<u32>) -> Result<Vec<MonthlyTrend>> {
        let url = self.endpoint(&["transactions", "monthly-trends"])?;
        let query: Vec<(&str, String)> = months
            .into_iter()
            .map(|m| ("months", m.to_string()))
            .collect();
        self.get(url, &query).await
    }

    async fn categories(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<Category>> {
        let url = self.endpoint(&["categories"])?;
        let query: Vec<(&str, String)> = transaction_type
            .into_iter()
            .map(|t| ("type", t.to_string()))
            .collect();
        self.get(url, &query).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Created> {
        let url = self.endpoint(&["categories"])?;
        trace!("POST {url}");
        let response = self
            .client
            .post(url.clone())
            .json(draft)
            .send()
            .await
            .with_context(|| format!("The request to {url} failed"))?;
        read_json(url, response).await
    }
}

fn month_query(month: Option<YearMonth>) -> Vec<(&'static str, String)> {
    month
        .into_iter()
        .map(|m| ("month", m.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn backend(base: &str) -> HttpBackend {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("duit"), base)
            .await
            .unwrap();
        HttpBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_endpoint_joins_segments() {
        let backend = backend("http://localhost:3001").await;
        let url = backend
            .endpoint(&["transactions", "recap", "2024-02"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3001/api/transactions/recap/2024-02"
        );
    }

    #[tokio::test]
    async fn test_endpoint_keeps_base_path() {
        let backend = backend("http://example.com/finance/").await;
        let url = backend.endpoint(&["categories"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/finance/api/categories");
    }
}
