//! Types that represent the backend's data model, such as `Transaction` and
//! `Category`, plus the aggregate shapes its reporting endpoints return.
mod amount;
mod category;
mod report;
mod transaction;

pub use amount::{Amount, AmountError, MASKED};
pub use category::{Category, CategoryDraft, CategoryTag};
pub use report::{
    CategoryStats, DailyReport, DailyStats, DailySummary, MonthlyRecap, MonthlyTrend,
};
pub use transaction::{Transaction, TransactionDraft, TransactionType};
