//! Aggregate and report DTOs returned by the backend's stats endpoints.

use crate::model::{Amount, Transaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Totals for one month, from `/api/transactions/recap/{month}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecap {
    pub(crate) month: String,
    pub(crate) total_income: Amount,
    pub(crate) total_expense: Amount,
    pub(crate) balance: Amount,
    pub(crate) income_count: u32,
    pub(crate) expense_count: u32,
}

impl MonthlyRecap {
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    pub fn total_expense(&self) -> Amount {
        self.total_expense
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn income_count(&self) -> u32 {
        self.income_count
    }

    pub fn expense_count(&self) -> u32 {
        self.expense_count
    }
}

/// Per-category totals, from `/api/transactions/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub(crate) category: String,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) total: Amount,
    pub(crate) count: u32,
}

impl CategoryStats {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// One sparse per-day, per-type aggregate, from
/// `/api/transactions/daily-stats`. Days without transactions have no
/// record, and a day with both income and expense activity has two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub(crate) date: NaiveDate,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) total: Amount,
    pub(crate) count: u32,
    /// Comma-joined category labels, each optionally suffixed `:amount`.
    #[serde(default)]
    pub(crate) categories: String,
}

impl DailyStats {
    pub fn new(
        date: NaiveDate,
        transaction_type: TransactionType,
        total: Amount,
        count: u32,
        categories: impl Into<String>,
    ) -> Self {
        Self {
            date,
            transaction_type,
            total,
            count,
            categories: categories.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn categories(&self) -> &str {
        &self.categories
    }
}

/// Everything the backend knows about one day, from
/// `/api/transactions/daily-report/{date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub(crate) date: NaiveDate,
    pub(crate) transactions: Vec<Transaction>,
    #[serde(rename = "categoryStats")]
    pub(crate) category_stats: Vec<CategoryStats>,
    pub(crate) summary: DailySummary,
}

/// The roll-up block inside a [`DailyReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub(crate) total_income: Amount,
    pub(crate) total_expense: Amount,
    pub(crate) balance: Amount,
    pub(crate) transaction_count: u32,
}

impl DailyReport {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn category_stats(&self) -> &[CategoryStats] {
        &self.category_stats
    }

    pub fn summary(&self) -> &DailySummary {
        &self.summary
    }

    /// Narrows the report to a single transaction type. Income-only reports
    /// keep the income total as the balance; expense-only reports show the
    /// negated expense total. `None` returns the report unchanged.
    pub fn filtered(&self, filter: Option<TransactionType>) -> DailyReport {
        let Some(filter) = filter else {
            return self.clone();
        };
        let transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.transaction_type == filter)
            .cloned()
            .collect();
        let category_stats = self
            .category_stats
            .iter()
            .filter(|s| s.transaction_type == filter)
            .cloned()
            .collect();
        let summary = DailySummary {
            total_income: match filter {
                TransactionType::Income => self.summary.total_income,
                TransactionType::Expense => Amount::ZERO,
            },
            total_expense: match filter {
                TransactionType::Income => Amount::ZERO,
                TransactionType::Expense => self.summary.total_expense,
            },
            balance: match filter {
                TransactionType::Income => self.summary.total_income,
                TransactionType::Expense => -self.summary.total_expense,
            },
            transaction_count: transactions.len() as u32,
        };
        DailyReport {
            date: self.date,
            transactions,
            category_stats,
            summary,
        }
    }
}

impl DailySummary {
    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    pub fn total_expense(&self) -> Amount {
        self.total_expense
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn transaction_count(&self) -> u32 {
        self.transaction_count
    }
}

/// Totals for one month in the trends series, from
/// `/api/transactions/monthly-trends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub(crate) month: String,
    pub(crate) total_income: Amount,
    pub(crate) total_expense: Amount,
    pub(crate) balance: Amount,
    pub(crate) income_count: u32,
    pub(crate) expense_count: u32,
}

impl MonthlyTrend {
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    pub fn total_expense(&self) -> Amount {
        self.total_expense
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn report() -> DailyReport {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let income = Transaction {
            id: Some(1),
            transaction_type: TransactionType::Income,
            amount: Amount::from_str("500000").unwrap(),
            category: "Gaji".to_string(),
            description: String::new(),
            date,
            created_at: None,
        };
        let expense = Transaction {
            id: Some(2),
            transaction_type: TransactionType::Expense,
            amount: Amount::from_str("150000").unwrap(),
            category: "Makanan".to_string(),
            description: String::new(),
            date,
            created_at: None,
        };
        DailyReport {
            date,
            transactions: vec![income, expense],
            category_stats: vec![
                CategoryStats {
                    category: "Gaji".to_string(),
                    transaction_type: TransactionType::Income,
                    total: Amount::from_str("500000").unwrap(),
                    count: 1,
                },
                CategoryStats {
                    category: "Makanan".to_string(),
                    transaction_type: TransactionType::Expense,
                    total: Amount::from_str("150000").unwrap(),
                    count: 1,
                },
            ],
            summary: DailySummary {
                total_income: Amount::from_str("500000").unwrap(),
                total_expense: Amount::from_str("150000").unwrap(),
                balance: Amount::from_str("350000").unwrap(),
                transaction_count: 2,
            },
        }
    }

    #[test]
    fn test_filtered_none_is_identity() {
        let report = report();
        assert_eq!(report.filtered(None), report);
    }

    #[test]
    fn test_filtered_income() {
        let filtered = report().filtered(Some(TransactionType::Income));
        assert_eq!(filtered.transactions().len(), 1);
        assert_eq!(filtered.category_stats().len(), 1);
        assert_eq!(
            filtered.summary().balance(),
            Amount::from_str("500000").unwrap()
        );
        assert!(filtered.summary().total_expense().is_zero());
        assert_eq!(filtered.summary().transaction_count(), 1);
    }

    #[test]
    fn test_filtered_expense_negates_balance() {
        let filtered = report().filtered(Some(TransactionType::Expense));
        assert_eq!(
            filtered.summary().balance(),
            Amount::from_str("-150000").unwrap()
        );
        assert!(filtered.summary().total_income().is_zero());
    }

    #[test]
    fn test_recap_deserialize_camel_case() {
        let json = r#"{
            "month": "2024-02",
            "totalIncome": 500000,
            "totalExpense": 150000,
            "balance": 350000,
            "incomeCount": 2,
            "expenseCount": 1
        }"#;
        let recap: MonthlyRecap = serde_json::from_str(json).unwrap();
        assert_eq!(recap.month(), "2024-02");
        assert_eq!(recap.income_count(), 2);
        assert_eq!(recap.balance(), Amount::from_str("350000").unwrap());
    }

    #[test]
    fn test_daily_stats_missing_categories_defaults_empty() {
        let json = r#"{"date": "2024-02-01", "type": "income", "total": 500000, "count": 2}"#;
        let stats: DailyStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.categories(), "");
    }
}
