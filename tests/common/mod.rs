//! Scripted in-memory node used by the integration tests.

#![allow(dead_code)]

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use arb_claimer::account::Account;
use arb_claimer::blockchain::{ChainConnection, NodeClient};
use arb_claimer::config::GasSettings;
use arb_claimer::contracts::erc20::IERC20;
use arb_claimer::error::{ClaimerError, Result};
use arb_claimer::executor::Executor;
use arb_claimer::transaction::SignedTransaction;
use arb_claimer::Claimer;
use async_trait::async_trait;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

// Well-known anvil dev key #0 and its address.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const DESTINATION: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const DISTRIBUTOR: &str = "0x67a24CE4321aB3aF51c2D0a4801c3E111D88C9d9";
pub const TOKEN: &str = "0x912CE59144191C1204E64559FE8253a0e49E6548";
pub const ARBITRUM_CHAIN_ID: u64 = 42161;

pub struct MockNode {
    chain_id: u64,
    pending_nonce: Mutex<u64>,
    gas_price: u128,
    nonce_failures: AtomicU32,
    broadcast_failures: AtomicU32,
    call_responses: Mutex<HashMap<[u8; 4], Bytes>>,
    requests: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<Bytes>>,
}

impl MockNode {
    pub fn new(chain_id: u64) -> Self {
        let node = Self {
            chain_id,
            pending_nonce: Mutex::new(0),
            gas_price: 1_000_000_000,
            nonce_failures: AtomicU32::new(0),
            broadcast_failures: AtomicU32::new(0),
            call_responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        };
        node.respond_to(IERC20::decimalsCall::SELECTOR, word(U256::from(18u8)));
        node
    }

    pub fn with_pending_nonce(self, nonce: u64) -> Self {
        *self.pending_nonce.lock().unwrap() = nonce;
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Fails the next `count` nonce lookups.
    pub fn fail_nonce_lookups(&self, count: u32) {
        self.nonce_failures.store(count, Ordering::SeqCst);
    }

    /// Rejects the next `count` broadcasts.
    pub fn fail_broadcasts(&self, count: u32) {
        self.broadcast_failures.store(count, Ordering::SeqCst);
    }

    pub fn respond_to(&self, selector: [u8; 4], response: Bytes) {
        self.call_responses.lock().unwrap().insert(selector, response);
    }

    pub fn requests(&self) -> Vec<&'static str> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, method: &str) -> usize {
        self.requests().iter().filter(|m| **m == method).count()
    }

    pub fn sent(&self) -> Vec<SignedTransaction> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|raw| SignedTransaction::decode(raw).unwrap())
            .collect()
    }

    fn record(&self, method: &'static str) {
        self.requests.lock().unwrap().push(method);
    }

    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn chain_id(&self) -> Result<u64> {
        self.record("eth_chainId");
        Ok(self.chain_id)
    }

    async fn pending_nonce(&self, _address: Address) -> Result<u64> {
        self.record("eth_getTransactionCount");
        if Self::take_failure(&self.nonce_failures) {
            return Err(ClaimerError::node("nonce lookup", "connection reset by peer"));
        }
        Ok(*self.pending_nonce.lock().unwrap())
    }

    async fn gas_price(&self) -> Result<u128> {
        self.record("eth_gasPrice");
        Ok(self.gas_price)
    }

    async fn call(&self, _to: Address, input: Bytes) -> Result<Bytes> {
        self.record("eth_call");
        let selector: [u8; 4] = input[..4].try_into().unwrap();
        self.call_responses
            .lock()
            .unwrap()
            .get(&selector)
            .cloned()
            .ok_or_else(|| ClaimerError::node("contract call", "execution reverted"))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash> {
        self.record("eth_sendRawTransaction");
        if Self::take_failure(&self.broadcast_failures) {
            return Err(ClaimerError::node("broadcast", "nonce too low"));
        }

        let signed = SignedTransaction::decode(&raw).unwrap();
        {
            // the pool now holds the transaction
            let mut pending = self.pending_nonce.lock().unwrap();
            *pending = (*pending).max(signed.nonce() + 1);
        }
        self.sent.lock().unwrap().push(raw);
        Ok(signed.hash())
    }
}

/// ABI word for a static return value.
pub fn word(value: U256) -> Bytes {
    Bytes::from(value.to_be_bytes::<32>().to_vec())
}

/// ABI encoding of a single `string` return value.
pub fn string_return(value: &str) -> Bytes {
    let mut out = word(U256::from(32u8)).to_vec();
    out.extend_from_slice(&word(U256::from(value.len())));
    let mut data = value.as_bytes().to_vec();
    data.resize(value.len().div_ceil(32) * 32, 0);
    out.extend_from_slice(&data);
    Bytes::from(out)
}

pub fn address(addr: &str) -> Address {
    Address::from_str(addr).unwrap()
}

pub async fn executor_on(node: Arc<MockNode>, gas: GasSettings) -> Executor {
    let chain = ChainConnection::from_node(node, Some(ARBITRUM_CHAIN_ID))
        .await
        .unwrap();
    let account = Account::from_hex(TEST_PRIVATE_KEY).unwrap();
    Executor::new(account, chain, gas)
}

pub async fn claimer_on(node: Arc<MockNode>) -> Claimer {
    let executor = executor_on(node, GasSettings::default()).await;
    Claimer::new(Arc::new(executor), address(DISTRIBUTOR), address(TOKEN))
}
