//! Calendar reconciliation for the daily trend view.
//!
//! The daily-stats endpoint returns one sparse record per (date, type) pair
//! that has transactions. Tables and charts want one entry per calendar day,
//! so [`reconcile`] merges the sparse records into a dense, date-ordered
//! month grid with zero-filled gaps.

use crate::model::{Amount, DailyStats, TransactionType};
use crate::Result;
use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar year and month, written `yyyy-MM` (e.g. `2024-02`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            bail!("'{year}-{month:02}' is not a valid calendar month");
        }
        Ok(Self { year, month })
    }

    /// The month that `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_default()
    }

    /// How many days the month has, leap years included.
    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    /// Every date of the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    /// The Indonesian display name, e.g. `Februari 2024`.
    pub fn display_name(&self) -> String {
        let name = match self.month {
            1 => "Januari",
            2 => "Februari",
            3 => "Maret",
            4 => "April",
            5 => "Mei",
            6 => "Juni",
            7 => "Juli",
            8 => "Agustus",
            9 => "September",
            10 => "Oktober",
            11 => "November",
            _ => "Desember",
        };
        format!("{name} {}", self.year)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .split_once('-')
            .with_context(|| format!("Expected a month in yyyy-MM form, got '{s}'"))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in '{s}'"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// One reconciled day in the dense month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCell {
    pub(crate) date: NaiveDate,
    pub(crate) income: Amount,
    pub(crate) expense: Amount,
    pub(crate) income_count: u32,
    pub(crate) expense_count: u32,
    pub(crate) income_categories: Vec<String>,
    pub(crate) expense_categories: Vec<String>,
}

impl DailyCell {
    fn zeroed(date: NaiveDate) -> Self {
        Self {
            date,
            income: Amount::ZERO,
            expense: Amount::ZERO,
            income_count: 0,
            expense_count: 0,
            income_categories: Vec::new(),
            expense_categories: Vec::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn income(&self) -> Amount {
        self.income
    }

    pub fn expense(&self) -> Amount {
        self.expense
    }

    pub fn income_count(&self) -> u32 {
        self.income_count
    }

    pub fn expense_count(&self) -> u32 {
        self.expense_count
    }

    pub fn income_categories(&self) -> &[String] {
        &self.income_categories
    }

    pub fn expense_categories(&self) -> &[String] {
        &self.expense_categories
    }

    /// True when at least one transaction happened on this day.
    pub fn has_activity(&self) -> bool {
        self.income_count > 0 || self.expense_count > 0
    }
}

/// Merges the sparse per-day aggregates for `month` into one cell per
/// calendar day.
///
/// Days absent from `aggregates` become zero-valued cells, an income and an
/// expense record on the same date merge into one cell, and records dated
/// outside `month` are ignored. The result is always `month.day_count()`
/// cells in ascending date order, regardless of input order.
pub fn reconcile(month: YearMonth, aggregates: &[DailyStats]) -> Vec<DailyCell> {
    let mut by_date: BTreeMap<NaiveDate, DailyCell> = BTreeMap::new();

    for aggregate in aggregates {
        let cell = by_date
            .entry(aggregate.date())
            .or_insert_with(|| DailyCell::zeroed(aggregate.date()));
        let labels = split_labels(aggregate.categories());
        match aggregate.transaction_type() {
            TransactionType::Income => {
                cell.income = aggregate.total();
                cell.income_count = aggregate.count();
                cell.income_categories = labels;
            }
            TransactionType::Expense => {
                cell.expense = aggregate.total();
                cell.expense_count = aggregate.count();
                cell.expense_categories = labels;
            }
        }
    }

    month
        .days()
        .map(|date| {
            by_date
                .remove(&date)
                .unwrap_or_else(|| DailyCell::zeroed(date))
        })
        .collect()
}

/// Splits a comma-joined label string into its ordered parts. The empty
/// string yields no labels.
fn split_labels(packed: &str) -> Vec<String> {
    if packed.is_empty() {
        return Vec::new();
    }
    packed.split(',').map(str::to_string).collect()
}
