use crate::amount::TokenAmount;
use crate::blockchain::parse_address;
use crate::config::{ChainConfig, ValidatedTargets};
use crate::contracts::{DistributorContract, ERC20Contract};
use crate::error::Result;
use crate::executor::Executor;
use crate::transaction::PendingTransaction;
use alloy::primitives::{Address, TxHash, U256};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds, signs and broadcasts the claim and token-withdraw transactions.
///
/// Each call is a single attempt: failures are returned to the caller, which
/// decides whether to retry.
#[derive(Clone)]
pub struct Claimer {
    executor: Arc<Executor>,
    distributor: DistributorContract,
    token: ERC20Contract,
}

impl Claimer {
    pub fn new(executor: Arc<Executor>, distributor: Address, token: Address) -> Self {
        let node = executor.node();
        Self {
            distributor: DistributorContract::new(distributor, node.clone()),
            token: ERC20Contract::new(token, node),
            executor,
        }
    }

    /// Validates `config`, connects to the node and binds both contracts.
    pub async fn from_config(config: &ChainConfig) -> Result<(Self, ValidatedTargets)> {
        let targets = config.validate()?;
        let executor = Executor::connect(
            &config.chain.rpc_url,
            &config.chain.private_key,
            config.chain.chain_id,
            config.gas.clone(),
        )
        .await?;

        info!(
            distributor = %targets.distributor,
            token = %targets.token,
            "📜 Contracts bound"
        );
        let claimer = Self::new(Arc::new(executor), targets.distributor, targets.token);
        Ok((claimer, targets))
    }

    pub fn executor(&self) -> &Arc<Executor> {
        &self.executor
    }

    pub fn distributor(&self) -> &DistributorContract {
        &self.distributor
    }

    pub fn token(&self) -> &ERC20Contract {
        &self.token
    }

    /// Calls the distributor's `claim()` with zero value.
    pub async fn claim(&self) -> Result<TxHash> {
        let slot = self.executor.reserve_nonce().await?;
        let gas_price = self.executor.gas_price().await?;

        let tx = PendingTransaction {
            nonce: slot.nonce(),
            to: self.distributor.address(),
            value: U256::ZERO,
            gas_limit: self.executor.gas().claim_gas_limit,
            gas_price,
            input: self.distributor.claim_calldata(),
        };
        debug!(nonce = tx.nonce, gas_price, "built claim transaction");

        self.executor.submit(slot, tx).await
    }

    /// Parses `to` before touching the network, then withdraws like
    /// [`Claimer::withdraw_to`].
    pub async fn withdraw_tokens(&self, to: &str, amount: &TokenAmount) -> Result<TxHash> {
        let destination = parse_address(to)?;
        self.withdraw_to(destination, amount).await
    }

    /// Transfers `amount` tokens, scaled by the token's `decimals()`, to `destination`.
    pub async fn withdraw_to(&self, destination: Address, amount: &TokenAmount) -> Result<TxHash> {
        let slot = self.executor.reserve_nonce().await?;
        let gas_price = self.executor.gas_price().await?;

        let decimals = self.token.decimals().await?;
        let units = amount.to_base_units(decimals)?;

        let tx = PendingTransaction {
            nonce: slot.nonce(),
            to: self.token.address(),
            value: U256::ZERO,
            gas_limit: self.executor.gas().transfer_gas_limit,
            gas_price,
            input: self.token.transfer_calldata(destination, units),
        };
        debug!(
            nonce = tx.nonce,
            gas_price,
            decimals,
            units = %units,
            "built transfer transaction"
        );

        self.executor.submit(slot, tx).await
    }
}
