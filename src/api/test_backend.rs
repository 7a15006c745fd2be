//! Implements the `Backend` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so
//! that we can run the whole app, top-to-bottom, without a running backend.
//! The aggregation endpoints (recap, stats, daily stats, trends) are computed
//! here with the same shapes the real backend returns, including the packed
//! `label:amount` category summaries in the daily stats.

use crate::api::{Ack, Backend, Created, TransactionFilter};
use crate::calendar::YearMonth;
use crate::model::{
    Amount, Category, CategoryDraft, CategoryStats, DailyReport, DailyStats, DailySummary,
    MonthlyRecap, MonthlyTrend, Transaction, TransactionDraft, TransactionType,
};
use crate::Result;
use anyhow::bail;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// An implementation of the `Backend` trait that does not use the network.
/// It can hold any data in memory and, by default, is seeded with some
/// existing data.
pub struct TestBackend {
    state: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    next_transaction_id: u64,
    next_category_id: u64,
}

impl TestBackend {
    /// Creates a backend with no data at all.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(Store {
                next_transaction_id: 1,
                next_category_id: 1,
                ..Store::default()
            }),
        }
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.state.lock().unwrap()
    }
}

impl Default for TestBackend {
    /// Loads seed data from this module.
    fn default() -> Self {
        let backend = Self::empty();
        {
            let mut store = backend.store();
            for draft in load_categories(CATEGORY_DATA).unwrap() {
                store.insert_category(draft);
            }
            for draft in load_transactions(TRANSACTION_DATA).unwrap() {
                store.insert_transaction(draft);
            }
        }
        backend
    }
}

impl Store {
    fn insert_transaction(&mut self, draft: TransactionDraft) -> u64 {
        let id = self.next_transaction_id;
        self.next_transaction_id += 1;
        self.transactions.push(Transaction {
            id: Some(id),
            transaction_type: draft.transaction_type,
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date: draft.date,
            created_at: None,
        });
        id
    }

    fn insert_category(&mut self, draft: CategoryDraft) -> u64 {
        let id = self.next_category_id;
        self.next_category_id += 1;
        self.categories.push(Category {
            id: Some(id),
            name: draft.name,
            transaction_type: draft.transaction_type,
            color: draft.color,
        });
        id
    }

    fn in_month<'a>(
        &'a self,
        month: Option<YearMonth>,
    ) -> impl Iterator<Item = &'a Transaction> {
        self.transactions
            .iter()
            .filter(move |t| month.is_none() || month == Some(YearMonth::containing(t.date)))
    }
}

#[async_trait::async_trait]
impl Backend for TestBackend {
    async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let store = self.store();
        let mut found: Vec<Transaction> = store
            .transactions
            .iter()
            .filter(|t| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |category| &t.category == category)
                    && filter
                        .transaction_type
                        .map_or(true, |transaction_type| t.transaction_type == transaction_type)
                    && filter
                        .month
                        .map_or(true, |month| YearMonth::containing(t.date) == month)
            })
            .cloned()
            .collect();
        // Newest first, like the backend's transaction list.
        found.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Created> {
        let id = self.store().insert_transaction(draft.clone());
        Ok(Created {
            id,
            message: "Transaksi berhasil ditambahkan".to_string(),
        })
    }

    async fn update_transaction(&self, id: u64, draft: &TransactionDraft) -> Result<Ack> {
        let mut store = self.store();
        let Some(transaction) = store
            .transactions
            .iter_mut()
            .find(|t| t.id == Some(id))
        else {
            bail!("Transaction {id} not found");
        };
        transaction.transaction_type = draft.transaction_type;
        transaction.amount = draft.amount;
        transaction.category = draft.category.clone();
        transaction.description = draft.description.clone();
        transaction.date = draft.date;
        Ok(Ack {
            message: "Transaksi berhasil diperbarui".to_string(),
        })
    }

    async fn delete_transaction(&self, id: u64) -> Result<Ack> {
        let mut store = self.store();
        let before = store.transactions.len();
        store.transactions.retain(|t| t.id != Some(id));
        if store.transactions.len() == before {
            bail!("Transaction {id} not found");
        }
        Ok(Ack {
            message: "Transaksi berhasil dihapus".to_string(),
        })
    }

    async fn monthly_recap(&self, month: YearMonth) -> Result<MonthlyRecap> {
        let store = self.store();
        let mut recap = MonthlyRecap {
            month: month.to_string(),
            total_income: Amount::ZERO,
            total_expense: Amount::ZERO,
            balance: Amount::ZERO,
            income_count: 0,
            expense_count: 0,
        };
        for transaction in store.in_month(Some(month)) {
            match transaction.transaction_type {
                TransactionType::Income => {
                    recap.total_income += transaction.amount;
                    recap.income_count += 1;
                }
                TransactionType::Expense => {
                    recap.total_expense += transaction.amount;
                    recap.expense_count += 1;
                }
            }
        }
        recap.balance = recap.total_income - recap.total_expense;
        Ok(recap)
    }

    async fn category_stats(&self, month: Option<YearMonth>) -> Result<Vec<CategoryStats>> {
        let store = self.store();
        let mut grouped: BTreeMap<(String, TransactionType), (Amount, u32)> = BTreeMap::new();
        for transaction in store.in_month(month) {
            let entry = grouped
                .entry((transaction.category.clone(), transaction.transaction_type))
                .or_insert((Amount::ZERO, 0));
            entry.0 += transaction.amount;
            entry.1 += 1;
        }
        let mut stats: Vec<CategoryStats> = grouped
            .into_iter()
            .map(|((category, transaction_type), (total, count))| CategoryStats {
                category,
                transaction_type,
                total,
                count,
            })
            .collect();
        stats.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
        Ok(stats)
    }

    async fn daily_stats(&self, month: Option<YearMonth>) -> Result<Vec<DailyStats>> {
        let store = self.store();
        let mut grouped: BTreeMap<(NaiveDate, TransactionType), DayGroup> = BTreeMap::new();
        for transaction in store.in_month(month) {
            let group = grouped
                .entry((transaction.date, transaction.transaction_type))
                .or_default();
            group.total += transaction.amount;
            group.count += 1;
            let by_category = group
                .by_category
                .entry(transaction.category.clone())
                .or_insert(Amount::ZERO);
            *by_category += transaction.amount;
        }
        Ok(grouped
            .into_iter()
            .map(|((date, transaction_type), group)| {
                DailyStats::new(
                    date,
                    transaction_type,
                    group.total,
                    group.count,
                    group.packed_categories(),
                )
            })
            .collect())
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<DailyReport> {
        let month = YearMonth::containing(date);
        let transactions = self
            .transactions(&TransactionFilter {
                month: Some(month),
                ..TransactionFilter::default()
            })
            .await?;
        let transactions: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| t.date == date)
            .collect();

        let mut summary = DailySummary {
            total_income: Amount::ZERO,
            total_expense: Amount::ZERO,
            balance: Amount::ZERO,
            transaction_count: transactions.len() as u32,
        };
        let mut grouped: BTreeMap<(String, TransactionType), (Amount, u32)> = BTreeMap::new();
        for transaction in &transactions {
            match transaction.transaction_type {
                TransactionType::Income => summary.total_income += transaction.amount,
                TransactionType::Expense => summary.total_expense += transaction.amount,
            }
            let entry = grouped
                .entry((transaction.category.clone(), transaction.transaction_type))
                .or_insert((Amount::ZERO, 0));
            entry.0 += transaction.amount;
            entry.1 += 1;
        }
        summary.balance = summary.total_income - summary.total_expense;

        let category_stats = grouped
            .into_iter()
            .map(|((category, transaction_type), (total, count))| CategoryStats {
                category,
                transaction_type,
                total,
                count,
            })
            .collect();

        Ok(DailyReport {
            date,
            transactions,
            category_stats,
            summary,
        })
    }

    async fn monthly_trends(&self, months: Option<u32>) -> Result<Vec<MonthlyTrend>> {
        let store = self.store();
        let mut grouped: BTreeMap<YearMonth, MonthlyTrend> = BTreeMap::new();
        for transaction in &store.transactions {
            let month = YearMonth::containing(transaction.date);
            let trend = grouped.entry(month).or_insert_with(|| MonthlyTrend {
                month: month.to_string(),
                total_income: Amount::ZERO,
                total_expense: Amount::ZERO,
                balance: Amount::ZERO,
                income_count: 0,
                expense_count: 0,
            });
            match transaction.transaction_type {
                TransactionType::Income => {
                    trend.total_income += transaction.amount;
                    trend.income_count += 1;
                }
                TransactionType::Expense => {
                    trend.total_expense += transaction.amount;
                    trend.expense_count += 1;
                }
            }
        }
        let mut trends: Vec<MonthlyTrend> = grouped
            .into_values()
            .map(|mut trend| {
                trend.balance = trend.total_income - trend.total_expense;
                trend
            })
            .collect();
        if let Some(months) = months {
            let keep = months as usize;
            if trends.len() > keep {
                trends.drain(..trends.len() - keep);
            }
        }
        Ok(trends)
    }

    async fn categories(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<Category>> {
        let store = self.store();
        Ok(store
            .categories
            .iter()
            .filter(|c| transaction_type.map_or(true, |t| c.transaction_type == t))
            .cloned()
            .collect())
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Created> {
        let id = self.store().insert_category(draft.clone());
        Ok(Created {
            id,
            message: "Kategori berhasil ditambahkan".to_string(),
        })
    }
}

/// Accumulates one (date, type) group of the daily stats.
#[derive(Debug, Default)]
struct DayGroup {
    total: Amount,
    count: u32,
    by_category: BTreeMap<String, Amount>,
}

impl DayGroup {
    /// Packs the per-category sums into the `label:amount` comma-joined
    /// string the daily-stats endpoint uses.
    fn packed_categories(&self) -> String {
        self.by_category
            .iter()
            .map(|(label, amount)| format!("{label}:{}", amount.value()))
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// Loads rows from a CSV-formatted string.
fn load_transactions(csv_data: &str) -> Result<Vec<TransactionDraft>> {
    let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
    let mut drafts = Vec::new();
    for record in reader.deserialize() {
        drafts.push(record?);
    }
    Ok(drafts)
}

fn load_categories(csv_data: &str) -> Result<Vec<CategoryDraft>> {
    let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
    let mut drafts = Vec::new();
    for record in reader.deserialize() {
        drafts.push(record?);
    }
    Ok(drafts)
}

/// Seed transaction data.
const TRANSACTION_DATA: &str = r##"type,amount,category,description,date
income,5000000,Gaji,Gaji bulanan,2025-06-01
expense,250000,Tagihan,Listrik,2025-06-05
expense,75000,Makanan,Makan malam,2025-06-05
expense,120000,Transportasi,Bensin,2025-06-12
income,500000,Bonus,Bonus proyek,2025-06-20
expense,95000,Hiburan,Bioskop,2025-06-21
income,5000000,Gaji,Gaji bulanan,2025-07-01
expense,260000,Tagihan,Listrik,2025-07-05
expense,82000,Makanan,Belanja mingguan,2025-07-07
expense,45000,Makanan,Makan siang,2025-07-07
expense,130000,Transportasi,Bensin,2025-07-14
income,750000,Bonus,Bonus lembur,2025-07-15
expense,110000,Hiburan,Konser,2025-07-19
"##;

/// Seed category data.
const CATEGORY_DATA: &str = r##"name,type,color
Gaji,income,#10b981
Bonus,income,#34d399
Makanan,expense,#ef4444
Transportasi,expense,#f59e0b
Tagihan,expense,#3b82f6
Hiburan,expense,#8b5cf6
"##;
