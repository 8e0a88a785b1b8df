use crate::amount::TokenAmount;
use crate::claimer::Claimer;
use crate::retry::{execute_with_retry, RetryConfig};
use alloy::primitives::{Address, TxHash};
use anyhow::Result;
use tracing::info;

pub struct WithdrawTokensJob {
    claimer: Claimer,
    destination: Address,
    amount: TokenAmount,
    retry_config: RetryConfig,
}

impl WithdrawTokensJob {
    /// `destination` and `amount` are validated by the caller, once.
    pub fn new(
        claimer: Claimer,
        destination: Address,
        amount: TokenAmount,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            claimer,
            destination,
            amount,
            retry_config,
        }
    }

    pub async fn execute(&self) -> Result<TxHash> {
        info!(
            destination = %self.destination,
            amount = %self.amount,
            "🔍 Withdraw job starting..."
        );

        let tx_hash = execute_with_retry(
            || self.claimer.withdraw_to(self.destination, &self.amount),
            &self.retry_config,
            "Withdraw transaction",
        )
        .await?;

        info!(tx_hash = %tx_hash, "✅ Withdraw transaction sent");
        Ok(tx_hash)
    }
}
