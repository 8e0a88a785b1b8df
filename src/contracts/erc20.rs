use crate::blockchain::NodeClient;
use crate::error::{ClaimerError, Result};
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use std::sync::Arc;

sol! {
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
    }
}

#[derive(Clone)]
pub struct ERC20Contract {
    address: Address,
    node: Arc<dyn NodeClient>,
}

impl ERC20Contract {
    pub fn new(address: Address, node: Arc<dyn NodeClient>) -> Self {
        Self { address, node }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        let call = IERC20::balanceOfCall { account };
        let result = self.node.call(self.address, call.abi_encode().into()).await?;

        IERC20::balanceOfCall::abi_decode_returns(&result)
            .map_err(|e| ClaimerError::node("balanceOf decode", e))
    }

    /// Rejects return words whose high bytes are set instead of truncating them.
    pub async fn decimals(&self) -> Result<u8> {
        let call = IERC20::decimalsCall {};
        let result = self.node.call(self.address, call.abi_encode().into()).await?;

        IERC20::decimalsCall::abi_decode_returns_validate(&result)
            .map_err(|e| ClaimerError::node("decimals decode", e))
    }

    pub async fn symbol(&self) -> Result<String> {
        let call = IERC20::symbolCall {};
        let result = self.node.call(self.address, call.abi_encode().into()).await?;

        IERC20::symbolCall::abi_decode_returns(&result)
            .map_err(|e| ClaimerError::node("symbol decode", e))
    }

    /// Calldata for `transfer(to, amount)`.
    pub fn transfer_calldata(&self, to: Address, amount: U256) -> Bytes {
        IERC20::transferCall { to, amount }.abi_encode().into()
    }
}
