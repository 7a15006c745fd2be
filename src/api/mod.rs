//! The client-side view of the finance backend's REST contract.
//!
//! Commands talk to a [`Backend`] trait object. The real implementation goes
//! over HTTP; an in-memory implementation backs tests and offline runs.

mod http;
mod test_backend;

use crate::calendar::YearMonth;
use crate::model::{
    Category, CategoryDraft, CategoryStats, DailyReport, DailyStats, MonthlyRecap, MonthlyTrend,
    Transaction, TransactionDraft, TransactionType,
};
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use test_backend::TestBackend;

/// Selects the real HTTP backend or the in-memory test backend.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Live,
    Test,
}

impl Mode {
    /// When `DUIT_IN_TEST_MODE` is set and non-zero in length the mode is
    /// `Mode::Test`, otherwise it is `Mode::Live`.
    pub fn from_env() -> Self {
        match std::env::var("DUIT_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Live,
        }
    }
}

/// Optional filters for listing transactions.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub month: Option<YearMonth>,
}

/// Acknowledgement returned by the backend when a row is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: u64,
    pub message: String,
}

/// Acknowledgement returned by the backend for updates and deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

/// The fixed, versioned contract exposed by the finance backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Created>;

    async fn update_transaction(&self, id: u64, draft: &TransactionDraft) -> Result<Ack>;

    async fn delete_transaction(&self, id: u64) -> Result<Ack>;

    async fn monthly_recap(&self, month: YearMonth) -> Result<MonthlyRecap>;

    async fn category_stats(&self, month: Option<YearMonth>) -> Result<Vec<CategoryStats>>;

    /// Sparse per-day aggregates; days without transactions have no record.
    async fn daily_stats(&self, month: Option<YearMonth>) -> Result<Vec<DailyStats>>;

    async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport>;

    async fn monthly_trends(&self, months: Option<u32>) -> Result<Vec<MonthlyTrend>>;

    async fn categories(&self, transaction_type: Option<TransactionType>)
        -> Result<Vec<Category>>;

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Created>;
}

/// Creates a [`Backend`] appropriate for `mode`.
pub fn backend(config: &Config, mode: Mode) -> Result<Box<dyn Backend>> {
    Ok(match mode {
        Mode::Live => Box::new(http::HttpBackend::new(config)?),
        Mode::Test => Box::new(TestBackend::default()),
    })
}
