use crate::amount::TokenAmount;
use crate::claimer::Claimer;
use alloy::primitives::{Address, U256};
use anyhow::Result;
use tracing::info;

/// Read-only snapshot of the account's claim position.
#[derive(Debug, Clone)]
pub struct AccountStatus {
    pub address: Address,
    pub chain_id: u64,
    pub pending_nonce: u64,
    pub token_symbol: String,
    pub token_decimals: u8,
    pub claimable: TokenAmount,
    pub balance: TokenAmount,
    pub claim_period_start: U256,
    pub claim_period_end: U256,
}

pub struct StatusJob {
    claimer: Claimer,
}

impl StatusJob {
    pub fn new(claimer: Claimer) -> Self {
        Self { claimer }
    }

    pub async fn execute(&self) -> Result<AccountStatus> {
        let executor = self.claimer.executor();
        let address = executor.address();
        let token = self.claimer.token();
        let distributor = self.claimer.distributor();

        let (pending_nonce, token_symbol, token_decimals, claimable, balance, start, end) = tokio::try_join!(
            executor.nonce(),
            token.symbol(),
            token.decimals(),
            distributor.claimable_tokens(address),
            token.balance_of(address),
            distributor.claim_period_start(),
            distributor.claim_period_end(),
        )?;

        let status = AccountStatus {
            address,
            chain_id: executor.chain_id(),
            pending_nonce,
            token_symbol,
            token_decimals,
            claimable: TokenAmount::from_base_units(claimable, token_decimals),
            balance: TokenAmount::from_base_units(balance, token_decimals),
            claim_period_start: start,
            claim_period_end: end,
        };

        info!("📊 Account status:");
        info!("   Address: {} (chain {})", status.address, status.chain_id);
        info!("   Pending nonce: {}", status.pending_nonce);
        info!("   Claimable: {} {}", status.claimable, status.token_symbol);
        info!("   Balance: {} {}", status.balance, status.token_symbol);
        info!(
            "   Claim window: blocks {} to {}",
            status.claim_period_start, status.claim_period_end
        );

        Ok(status)
    }
}
