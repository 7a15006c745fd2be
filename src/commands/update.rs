//! Handler for the `duit update` subcommands.

use crate::api::{self, Mode};
use crate::args::UpdateTransactionArgs;
use crate::commands::Out;
use crate::model::TransactionDraft;
use crate::{Config, Result};

/// Replaces every field of an existing transaction.
pub async fn update_transaction(
    config: Config,
    mode: Mode,
    args: UpdateTransactionArgs,
) -> Result<Out<u64>> {
    let backend = api::backend(&config, mode)?;
    let draft = TransactionDraft::new(
        args.transaction_type(),
        args.amount(),
        args.category(),
        args.description(),
        args.date(),
    );
    let ack = backend.update_transaction(args.id(), &draft).await?;
    Ok(Out::new(
        format!("{} (id {})", ack.message, args.id()),
        args.id(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn args(id: u64) -> UpdateTransactionArgs {
        UpdateTransactionArgs::new(
            id,
            TransactionType::Expense,
            Amount::from_str("99000").unwrap(),
            "Makanan",
            "Revisi",
            NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_update_existing_transaction() {
        let env = TestEnv::new().await;
        // The seeded test backend assigns ids starting at 1.
        let out = update_transaction(env.config(), Mode::Test, args(1))
            .await
            .unwrap();
        assert!(out.message().contains("(id 1)"));
    }

    #[tokio::test]
    async fn test_update_missing_transaction_is_an_error() {
        let env = TestEnv::new().await;
        let result = update_transaction(env.config(), Mode::Test, args(9999)).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("9999"));
    }
}
