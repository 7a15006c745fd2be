//! Transaction DTOs for the backend's `/api/transactions` endpoints.

use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single transaction as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<u64>,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) created_at: Option<String>,
}

impl Transaction {
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The request body for creating or replacing a transaction. The same shape
/// as [`Transaction`] minus the backend-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(
        transaction_type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            transaction_type,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The two kinds of transaction the backend knows about.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// The Indonesian label shown in reports.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Pemasukan",
            TransactionType::Expense => "Pengeluaran",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_type_round_trip() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(
            TransactionType::from_str("expense").unwrap(),
            TransactionType::Expense
        );
        assert!(TransactionType::from_str("transfer").is_err());
    }

    #[test]
    fn test_transaction_deserialize() {
        let json = r#"{
            "id": 7,
            "type": "income",
            "amount": 500000,
            "category": "Gaji",
            "description": "Gaji bulanan",
            "date": "2024-02-01",
            "created_at": "2024-02-01T08:00:00Z"
        }"#;
        let transaction: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(transaction.id(), Some(7));
        assert_eq!(transaction.transaction_type(), TransactionType::Income);
        assert_eq!(transaction.category(), "Gaji");
        assert_eq!(
            transaction.date(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let draft = TransactionDraft::new(
            TransactionType::Expense,
            Amount::from_str("150000").unwrap(),
            "Makanan",
            "Makan siang",
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        );
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], 150000);
        assert_eq!(json["date"], "2024-02-01");
    }
}
