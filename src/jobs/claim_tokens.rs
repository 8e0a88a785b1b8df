use crate::claimer::Claimer;
use crate::retry::{execute_with_retry, RetryConfig};
use alloy::primitives::TxHash;
use anyhow::Result;
use tracing::info;

pub struct ClaimTokensJob {
    claimer: Claimer,
    retry_config: RetryConfig,
}

impl ClaimTokensJob {
    pub fn new(claimer: Claimer, retry_config: RetryConfig) -> Self {
        Self {
            claimer,
            retry_config,
        }
    }

    pub async fn execute(&self) -> Result<TxHash> {
        info!("🔍 Claim job starting...");

        let tx_hash = execute_with_retry(
            || self.claimer.claim(),
            &self.retry_config,
            "Claim transaction",
        )
        .await?;

        info!(tx_hash = %tx_hash, "✅ Claim transaction sent");
        Ok(tx_hash)
    }
}
