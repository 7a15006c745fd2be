//! Handlers for the `duit list` subcommands.

use crate::api::{self, Mode, TransactionFilter};
use crate::args::{ListCategoriesArgs, ListTransactionsArgs};
use crate::commands::{render_table, Out};
use crate::model::{Category, Transaction};
use crate::{Config, Result};

/// Lists transactions, newest first, honoring the month/category/type
/// filters.
pub async fn list_transactions(
    config: Config,
    mode: Mode,
    args: ListTransactionsArgs,
    show_balance: bool,
) -> Result<Out<Vec<Transaction>>> {
    let backend = api::backend(&config, mode)?;
    let filter = TransactionFilter {
        category: args.category().cloned(),
        transaction_type: args.transaction_type(),
        month: args.month(),
    };
    let transactions = backend.transactions(&filter).await?;

    if transactions.is_empty() {
        return Ok(Out::new("Tidak ada transaksi yang cocok", transactions));
    }

    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|t| {
            vec![
                t.id().map(|id| id.to_string()).unwrap_or_default(),
                t.date().to_string(),
                t.transaction_type().label().to_string(),
                t.category().to_string(),
                t.amount().display_or_masked(show_balance),
                t.description().to_string(),
            ]
        })
        .collect();
    let table = render_table(
        &["Id", "Tanggal", "Tipe", "Kategori", "Jumlah", "Deskripsi"],
        &rows,
    );
    let message = format!("{table}\n{} transaksi", transactions.len());
    Ok(Out::new(message, transactions))
}

/// Lists categories, optionally narrowed to one transaction type.
pub async fn list_categories(
    config: Config,
    mode: Mode,
    args: ListCategoriesArgs,
) -> Result<Out<Vec<Category>>> {
    let backend = api::backend(&config, mode)?;
    let categories = backend.categories(args.transaction_type()).await?;

    if categories.is_empty() {
        return Ok(Out::new("Tidak ada kategori", categories));
    }

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.id().map(|id| id.to_string()).unwrap_or_default(),
                c.name().to_string(),
                c.transaction_type().label().to_string(),
                c.color().to_string(),
            ]
        })
        .collect();
    let table = render_table(&["Id", "Nama", "Tipe", "Warna"], &rows);
    Ok(Out::new(table, categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use crate::model::{TransactionType, MASKED};
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_list_transactions_masks_amounts_by_default() {
        let env = TestEnv::new().await;
        let out = list_transactions(
            env.config(),
            Mode::Test,
            ListTransactionsArgs::default(),
            false,
        )
        .await
        .unwrap();
        assert!(out.message().contains(MASKED));
        assert!(!out.message().contains("Rp 5.000.000"));
        assert!(!out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_transactions_shows_amounts_when_asked() {
        let env = TestEnv::new().await;
        let out = list_transactions(
            env.config(),
            Mode::Test,
            ListTransactionsArgs::default(),
            true,
        )
        .await
        .unwrap();
        assert!(out.message().contains("Rp 5.000.000"));
    }

    #[tokio::test]
    async fn test_list_transactions_filters() {
        let env = TestEnv::new().await;
        let args = ListTransactionsArgs::new(
            Some(YearMonth::new(2025, 7).unwrap()),
            Some("Makanan".to_string()),
            Some(TransactionType::Expense),
        );
        let out = list_transactions(env.config(), Mode::Test, args, true)
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), 2);
        assert!(out.message().contains("2 transaksi"));
    }

    #[tokio::test]
    async fn test_list_transactions_no_match() {
        let env = TestEnv::new().await;
        let args =
            ListTransactionsArgs::new(None, Some("TidakAda".to_string()), None);
        let out = list_transactions(env.config(), Mode::Test, args, true)
            .await
            .unwrap();
        assert!(out.message().contains("Tidak ada transaksi"));
        assert!(out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_categories_by_type() {
        let env = TestEnv::new().await;
        let out = list_categories(
            env.config(),
            Mode::Test,
            ListCategoriesArgs::new(Some(TransactionType::Income)),
        )
        .await
        .unwrap();
        assert!(out.message().contains("Gaji"));
        assert!(!out.message().contains("Makanan"));
    }
}
