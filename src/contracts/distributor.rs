use crate::blockchain::NodeClient;
use crate::error::{ClaimerError, Result};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use std::sync::Arc;

sol! {
    interface ITokenDistributor {
        function claim() external;
        function claimableTokens(address account) external view returns (uint256);
        function claimPeriodStart() external view returns (uint256);
        function claimPeriodEnd() external view returns (uint256);
    }
}

/// Airdrop distributor holding per-account claimable balances.
#[derive(Clone)]
pub struct DistributorContract {
    address: Address,
    node: Arc<dyn NodeClient>,
}

impl DistributorContract {
    pub fn new(address: Address, node: Arc<dyn NodeClient>) -> Self {
        Self { address, node }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Calldata for the zero-argument `claim()`.
    pub fn claim_calldata(&self) -> Bytes {
        ITokenDistributor::claimCall {}.abi_encode().into()
    }

    pub async fn claimable_tokens(&self, account: Address) -> Result<U256> {
        let call = ITokenDistributor::claimableTokensCall { account };
        let result = self.node.call(self.address, call.abi_encode().into()).await?;

        ITokenDistributor::claimableTokensCall::abi_decode_returns(&result)
            .map_err(|e| ClaimerError::node("claimableTokens decode", e))
    }

    /// First block number at which claims are accepted.
    pub async fn claim_period_start(&self) -> Result<U256> {
        let call = ITokenDistributor::claimPeriodStartCall {};
        let result = self.node.call(self.address, call.abi_encode().into()).await?;

        ITokenDistributor::claimPeriodStartCall::abi_decode_returns(&result)
            .map_err(|e| ClaimerError::node("claimPeriodStart decode", e))
    }

    pub async fn claim_period_end(&self) -> Result<U256> {
        let call = ITokenDistributor::claimPeriodEndCall {};
        let result = self.node.call(self.address, call.abi_encode().into()).await?;

        ITokenDistributor::claimPeriodEndCall::abi_decode_returns(&result)
            .map_err(|e| ClaimerError::node("claimPeriodEnd decode", e))
    }
}
