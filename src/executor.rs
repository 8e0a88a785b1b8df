use crate::account::Account;
use crate::blockchain::{ChainConnection, NodeClient};
use crate::config::{GasPriceStrategy, GasSettings};
use crate::error::{ClaimerError, Result};
use crate::nonce::{NonceSequence, NonceSlot};
use crate::transaction::{PendingTransaction, SignedTransaction};
use alloy::consensus::SignableTransaction;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::signers::Signer;
use std::sync::Arc;
use tracing::{debug, info};

/// Account and chain context shared by every transaction the claimer sends.
pub struct Executor {
    account: Account,
    chain: ChainConnection,
    gas: GasSettings,
    nonces: NonceSequence,
}

impl Executor {
    pub fn new(account: Account, chain: ChainConnection, gas: GasSettings) -> Self {
        Self {
            account,
            chain,
            gas,
            nonces: NonceSequence::new(),
        }
    }

    /// Connects to `rpc_url` and derives the account from `private_key`.
    pub async fn connect(
        rpc_url: &str,
        private_key: &str,
        expected_chain_id: Option<u64>,
        gas: GasSettings,
    ) -> Result<Self> {
        let chain = ChainConnection::connect(rpc_url, expected_chain_id).await?;
        let account = Account::from_hex(private_key)?;
        info!(address = %account.address(), "🔑 Wallet loaded");
        Ok(Self::new(account, chain, gas))
    }

    pub fn address(&self) -> Address {
        self.account.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain.chain_id()
    }

    pub fn node(&self) -> Arc<dyn NodeClient> {
        self.chain.node()
    }

    pub fn gas(&self) -> &GasSettings {
        &self.gas
    }

    /// The account's transaction count including pool transactions.
    pub async fn nonce(&self) -> Result<u64> {
        self.chain.node().pending_nonce(self.address()).await
    }

    /// Reserves the next nonce for this account; see [`NonceSequence::reserve`].
    pub async fn reserve_nonce(&self) -> Result<NonceSlot<'_>> {
        let slot = self.nonces.reserve(|| self.nonce()).await?;
        debug!(nonce = slot.nonce(), "reserved nonce");
        Ok(slot)
    }

    /// Fixed policy price, or the node's `eth_gasPrice` under the oracle strategy.
    pub async fn gas_price(&self) -> Result<u128> {
        match self.gas.strategy {
            GasPriceStrategy::Fixed => Ok(self.gas.gas_price_wei as u128),
            GasPriceStrategy::Oracle => self.chain.node().gas_price().await,
        }
    }

    pub fn sign(&self, tx: PendingTransaction) -> Result<SignedTransaction> {
        let chain_id = self.chain.signer().chain_id();
        let signer = self.account.signer().clone().with_chain_id(Some(chain_id));

        let mut legacy = tx.into_legacy(chain_id);
        let signature = signer.sign_transaction_sync(&mut legacy)?;
        Ok(SignedTransaction::new(legacy.into_signed(signature)))
    }

    pub async fn send_raw(&self, signed: &SignedTransaction) -> Result<TxHash> {
        let hash = self.chain.node().send_raw_transaction(signed.encoded()).await?;
        if hash != signed.hash() {
            debug!(local = %signed.hash(), node = %hash, "node reported a different hash");
        }
        Ok(hash)
    }

    /// Signs and broadcasts `tx`, committing `slot` once the node accepts it.
    pub async fn submit(&self, slot: NonceSlot<'_>, tx: PendingTransaction) -> Result<TxHash> {
        if tx.nonce != slot.nonce() {
            return Err(ClaimerError::Signing(format!(
                "transaction nonce {} does not match reserved nonce {}",
                tx.nonce,
                slot.nonce()
            )));
        }

        let signed = self.sign(tx)?;
        let hash = self.send_raw(&signed).await?;
        slot.commit();
        Ok(hash)
    }

    /// Sends `amount_wei` of the native currency to `to`.
    pub async fn transfer_eth(&self, to: Address, amount_wei: U256) -> Result<TxHash> {
        let slot = self.reserve_nonce().await?;
        let gas_price = self.gas_price().await?;

        let tx = PendingTransaction {
            nonce: slot.nonce(),
            to,
            value: amount_wei,
            gas_limit: self.gas.eth_transfer_gas_limit,
            gas_price,
            input: Bytes::new(),
        };
        self.submit(slot, tx).await
    }
}
