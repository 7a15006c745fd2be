//! Category DTOs and the decoder for the packed category summaries the
//! backend embeds in its daily aggregates.

use crate::model::{Amount, TransactionType};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A category as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<u64>,
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) color: String,
}

impl Category {
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The request body for creating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) color: String,
}

impl CategoryDraft {
    pub fn new(
        name: impl Into<String>,
        transaction_type: TransactionType,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            transaction_type,
            color: color.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One decoded entry from a packed category summary.
///
/// The daily-stats endpoint joins per-day category summaries into a single
/// comma-separated string where each entry is a label optionally suffixed
/// with `:amount`, e.g. `"Gaji:5000000,Bonus"`. Decoding that packing is a
/// boundary concern and lives here, next to the category model, rather than
/// inside the reconciliation logic.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTag {
    label: String,
    amount: Option<Amount>,
}

impl CategoryTag {
    /// Decodes a single `label[:amount]` entry. A malformed amount suffix
    /// degrades to a tag with no amount rather than an error.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((label, amount)) => Self {
                label: label.to_string(),
                amount: Amount::from_str(amount).ok(),
            },
            None => Self {
                label: raw.to_string(),
                amount: None,
            },
        }
    }

    /// Decodes a comma-joined summary string. An empty string decodes to an
    /// empty list.
    pub fn parse_list(packed: &str) -> Vec<Self> {
        if packed.is_empty() {
            return Vec::new();
        }
        packed.split(',').map(Self::parse).collect()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }
}
