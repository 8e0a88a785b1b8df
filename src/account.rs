use crate::error::{ClaimerError, Result};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::fmt;
use std::str::FromStr;

/// A private signing key and the address derived from it.
#[derive(Clone)]
pub struct Account {
    signer: PrivateKeySigner,
    address: Address,
}

impl Account {
    /// Builds an account from a hex-encoded secret key (`0x` prefix optional).
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(private_key.trim())
            .map_err(|e| ClaimerError::Setup(format!("failed to parse private key: {}", e)))?;
        Ok(Self::from_signer(signer))
    }

    pub fn from_signer(signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self { signer, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub(crate) fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
