//! Handlers for the `duit add` subcommands.

use crate::api::{self, Mode};
use crate::args::{AddCategoryArgs, AddTransactionArgs};
use crate::clock::Clock;
use crate::commands::Out;
use crate::model::{CategoryDraft, TransactionDraft};
use crate::{Config, Result};

/// Records a new transaction. The date defaults to the clock's today.
pub async fn add_transaction(
    config: Config,
    mode: Mode,
    args: AddTransactionArgs,
    clock: &dyn Clock,
) -> Result<Out<u64>> {
    let backend = api::backend(&config, mode)?;
    let date = args.date().unwrap_or_else(|| clock.today());
    let draft = TransactionDraft::new(
        args.transaction_type(),
        args.amount(),
        args.category(),
        args.description(),
        date,
    );
    let created = backend.create_transaction(&draft).await?;
    Ok(Out::new(
        format!(
            "{}: {} {} '{}' pada {} (id {})",
            created.message,
            draft.transaction_type().label(),
            draft.amount(),
            draft.category(),
            draft.date(),
            created.id
        ),
        created.id,
    ))
}

/// Creates a new category.
pub async fn add_category(config: Config, mode: Mode, args: AddCategoryArgs) -> Result<Out<u64>> {
    let backend = api::backend(&config, mode)?;
    let draft = CategoryDraft::new(args.name(), args.transaction_type(), args.color());
    let created = backend.create_category(&draft).await?;
    Ok(Out::new(
        format!("{}: '{}' (id {})", created.message, draft.name(), created.id),
        created.id,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::{Amount, TransactionType};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap())
    }

    #[tokio::test]
    async fn test_add_transaction_defaults_date_to_clock() {
        let env = TestEnv::new().await;
        let args = AddTransactionArgs::new(
            TransactionType::Expense,
            Amount::from_str("150000").unwrap(),
            "Makanan",
            "Makan siang",
            None,
        );

        let out = add_transaction(env.config(), Mode::Test, args, &clock())
            .await
            .unwrap();

        assert!(out.message().contains("2025-07-15"));
        assert!(out.message().contains("Pengeluaran"));
        assert!(out.structure().is_some());
    }

    #[tokio::test]
    async fn test_add_transaction_with_explicit_date() {
        let env = TestEnv::new().await;
        let args = AddTransactionArgs::new(
            TransactionType::Income,
            Amount::from_str("500000").unwrap(),
            "Bonus",
            "",
            Some(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()),
        );

        let out = add_transaction(env.config(), Mode::Test, args, &clock())
            .await
            .unwrap();

        assert!(out.message().contains("2025-07-01"));
        assert!(out.message().contains("Pemasukan"));
    }

    #[tokio::test]
    async fn test_add_category() {
        let env = TestEnv::new().await;
        let args = AddCategoryArgs::new("Investasi", TransactionType::Income, "#0ea5e9");

        let out = add_category(env.config(), Mode::Test, args).await.unwrap();

        assert!(out.message().contains("Investasi"));
        assert!(*out.structure().unwrap() > 0);
    }
}
