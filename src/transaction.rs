use crate::error::{ClaimerError, Result};
use alloy::consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::{Decodable2718, Encodable2718};
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};

/// One attempt's unsigned transaction. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub nonce: u64,
    pub to: Address,
    /// Native value in wei.
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub input: Bytes,
}

impl PendingTransaction {
    pub(crate) fn into_legacy(self, chain_id: u64) -> TxLegacy {
        TxLegacy {
            chain_id: Some(chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.input,
        }
    }
}

/// An EIP-155 signed legacy transaction, identified by its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    inner: Signed<TxLegacy>,
}

impl SignedTransaction {
    pub(crate) fn new(inner: Signed<TxLegacy>) -> Self {
        Self { inner }
    }

    /// Decodes the raw bytes handed to `eth_sendRawTransaction`.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let mut buf = raw;
        let envelope = TxEnvelope::decode_2718(&mut buf)
            .map_err(|e| ClaimerError::Signing(format!("failed to decode transaction: {}", e)))?;
        match envelope {
            TxEnvelope::Legacy(inner) => Ok(Self { inner }),
            other => Err(ClaimerError::Signing(format!(
                "expected a legacy transaction, got {:?}",
                other.tx_type()
            ))),
        }
    }

    pub fn hash(&self) -> TxHash {
        *self.inner.hash()
    }

    pub fn encoded(&self) -> Bytes {
        TxEnvelope::Legacy(self.inner.clone()).encoded_2718().into()
    }

    /// Recovers the signing address from the signature.
    pub fn recover_sender(&self) -> Result<Address> {
        let sighash = self.inner.tx().signature_hash();
        self.inner
            .signature()
            .recover_address_from_prehash(&sighash)
            .map_err(|e| ClaimerError::Signing(format!("failed to recover sender: {}", e)))
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.inner.tx().chain_id
    }

    pub fn nonce(&self) -> u64 {
        self.inner.tx().nonce
    }

    pub fn gas_price(&self) -> u128 {
        self.inner.tx().gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.inner.tx().gas_limit
    }

    pub fn to(&self) -> Option<Address> {
        self.inner.tx().to.to().copied()
    }

    pub fn value(&self) -> U256 {
        self.inner.tx().value
    }

    pub fn input(&self) -> &Bytes {
        &self.inner.tx().input
    }
}
