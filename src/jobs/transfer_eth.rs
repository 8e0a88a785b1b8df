use crate::executor::Executor;
use crate::retry::{execute_with_retry, RetryConfig};
use alloy::primitives::{Address, TxHash, U256};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub struct TransferEthJob {
    executor: Arc<Executor>,
    to: Address,
    amount_wei: U256,
    retry_config: RetryConfig,
}

impl TransferEthJob {
    pub fn new(
        executor: Arc<Executor>,
        to: Address,
        amount_wei: U256,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            executor,
            to,
            amount_wei,
            retry_config,
        }
    }

    pub async fn execute(&self) -> Result<TxHash> {
        info!(to = %self.to, amount_wei = %self.amount_wei, "💸 ETH transfer starting...");

        let tx_hash = execute_with_retry(
            || self.executor.transfer_eth(self.to, self.amount_wei),
            &self.retry_config,
            "ETH transfer",
        )
        .await?;

        info!(tx_hash = %tx_hash, "✅ ETH transfer sent");
        Ok(tx_hash)
    }
}
