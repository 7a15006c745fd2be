//! Handler for the `duit delete` subcommands.

use crate::api::{self, Mode};
use crate::args::DeleteTransactionArgs;
use crate::commands::Out;
use crate::{Config, Result};

/// Deletes an existing transaction.
pub async fn delete_transaction(
    config: Config,
    mode: Mode,
    args: DeleteTransactionArgs,
) -> Result<Out<u64>> {
    let backend = api::backend(&config, mode)?;
    let ack = backend.delete_transaction(args.id()).await?;
    Ok(Out::new(
        format!("{} (id {})", ack.message, args.id()),
        args.id(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_delete_existing_transaction() {
        let env = TestEnv::new().await;
        let out = delete_transaction(env.config(), Mode::Test, DeleteTransactionArgs::new(1))
            .await
            .unwrap();
        assert!(out.message().contains("(id 1)"));
    }

    #[tokio::test]
    async fn test_delete_missing_transaction_is_an_error() {
        let env = TestEnv::new().await;
        let result =
            delete_transaction(env.config(), Mode::Test, DeleteTransactionArgs::new(9999)).await;
        assert!(result.is_err());
    }
}
