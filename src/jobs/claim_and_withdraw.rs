use crate::amount::TokenAmount;
use crate::claimer::Claimer;
use crate::jobs::{ClaimTokensJob, WithdrawTokensJob};
use crate::retry::RetryConfig;
use alloy::primitives::{Address, TxHash};
use anyhow::Result;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimAndWithdrawReport {
    pub claim_tx: TxHash,
    pub withdraw_tx: TxHash,
}

/// Runs the claim and withdraw retry loops as two concurrent tasks and waits
/// for both to finish.
pub struct ClaimAndWithdrawJob {
    claimer: Claimer,
    destination: Address,
    amount: TokenAmount,
    retry_config: RetryConfig,
}

impl ClaimAndWithdrawJob {
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

    pub async fn execute(self) -> Result<ClaimAndWithdrawReport> {
        info!("🚀 Claim and withdraw starting...");

        let claim_job = ClaimTokensJob::new(self.claimer.clone(), self.retry_config.clone());
        let withdraw_job = WithdrawTokensJob::new(
            self.claimer,
            self.destination,
            self.amount,
            self.retry_config,
        );

        let claim_task = tokio::spawn(async move { claim_job.execute().await });
        let withdraw_task = tokio::spawn(async move { withdraw_job.execute().await });

        let (claim_result, withdraw_result) = tokio::join!(claim_task, withdraw_task);
        // both tasks have finished at this point
        let claim_tx = claim_result?.inspect_err(|e| error!(error = %e, "❌ Claim failed"));
        let withdraw_tx =
            withdraw_result?.inspect_err(|e| error!(error = %e, "❌ Withdraw failed"));
        let claim_tx = claim_tx?;
        let withdraw_tx = withdraw_tx?;

        info!(claim_tx = %claim_tx, withdraw_tx = %withdraw_tx, "🎉 Both transactions sent");
        Ok(ClaimAndWithdrawReport {
            claim_tx,
            withdraw_tx,
        })
    }
}
