use crate::error::{ClaimerError, Result};
use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, TxHash, TxKind};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// The subset of the node's JSON-RPC surface the claimer relies on.
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;

    /// Transaction count including transactions still in the node's pool.
    async fn pending_nonce(&self, address: Address) -> Result<u64>;

    async fn gas_price(&self) -> Result<u128>;

    /// Read-only `eth_call` against latest state.
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes>;

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash>;
}

/// HTTP JSON-RPC node backed by an alloy provider.
pub struct RpcNode {
    provider: Arc<dyn Provider<Ethereum>>,
}

impl RpcNode {
    pub fn connect_http(rpc_url: &str) -> Result<Self> {
        let url = Url::parse(rpc_url)
            .map_err(|e| ClaimerError::Setup(format!("invalid RPC URL {}: {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().connect_http(url);
        Ok(Self {
            provider: Arc::new(provider),
        })
    }
}

#[async_trait]
impl NodeClient for RpcNode {
    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ClaimerError::node("chain id lookup", e))
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(|e| ClaimerError::node("nonce lookup", e))
    }

    async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ClaimerError::node("gas price lookup", e))
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes> {
        self.provider
            .call(TransactionRequest {
                to: Some(TxKind::Call(to)),
                input: TransactionInput::new(input),
                ..Default::default()
            })
            .await
            .map_err(|e| ClaimerError::node("contract call", e))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash> {
        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .map_err(|e| ClaimerError::node("broadcast", e))?;
        Ok(*pending.tx_hash())
    }
}

/// EIP-155 replay protection bound to one chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eip155Signer {
    chain_id: u64,
}

impl Eip155Signer {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Connection to a remote node together with the chain's signing scheme.
pub struct ChainConnection {
    node: Arc<dyn NodeClient>,
    chain_id: u64,
    signer: Eip155Signer,
}

impl ChainConnection {
    /// Dials `rpc_url` over HTTP and asks the node for its chain id.
    ///
    /// When `expected_chain_id` is set the node must report the same id.
    pub async fn connect(rpc_url: &str, expected_chain_id: Option<u64>) -> Result<Self> {
        info!(rpc_url = %rpc_url, "🔗 Connecting to RPC");
        let node = RpcNode::connect_http(rpc_url)?;
        Self::from_node(Arc::new(node), expected_chain_id).await
    }

    pub async fn from_node(
        node: Arc<dyn NodeClient>,
        expected_chain_id: Option<u64>,
    ) -> Result<Self> {
        let chain_id = node
            .chain_id()
            .await
            .map_err(|e| ClaimerError::Setup(format!("failed to get chain id: {}", e)))?;

        if let Some(expected) = expected_chain_id {
            if chain_id != expected {
                return Err(ClaimerError::Setup(format!(
                    "Chain ID mismatch: expected {}, got {}",
                    expected, chain_id
                )));
            }
        }

        info!(chain_id, "✅ Connected to chain");
        Ok(Self {
            node,
            chain_id,
            signer: Eip155Signer::new(chain_id),
        })
    }

    pub fn node(&self) -> Arc<dyn NodeClient> {
        self.node.clone()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn signer(&self) -> Eip155Signer {
        self.signer
    }
}

/// Parses a hex account address, with or without a `0x`/`0X` prefix.
pub fn parse_address(addr: &str) -> Result<Address> {
    let trimmed = addr.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if hex_part.len() != 40 {
        return Err(ClaimerError::InvalidAddress {
            input: addr.to_string(),
            reason: format!("expected 40 hex characters, got {}", hex_part.len()),
        });
    }
    Address::from_str(hex_part).map_err(|e| ClaimerError::InvalidAddress {
        input: addr.to_string(),
        reason: e.to_string(),
    })
}
