pub mod account;
pub mod amount;
pub mod blockchain;
pub mod claimer;
pub mod config;
pub mod contracts;
pub mod error;
pub mod executor;
pub mod jobs;
pub mod nonce;
pub mod retry;
pub mod transaction;

pub use account::Account;
pub use amount::TokenAmount;
pub use blockchain::{parse_address, ChainConnection, NodeClient, RpcNode};
pub use claimer::Claimer;
pub use config::{ChainConfig, GasPriceStrategy, GasSettings};
pub use error::{ClaimerError, Result};
pub use executor::Executor;
pub use jobs::{ClaimAndWithdrawJob, ClaimTokensJob, StatusJob, TransferEthJob, WithdrawTokensJob};
pub use retry::{execute_with_retry, RetryConfig, RetryState};
pub use transaction::{PendingTransaction, SignedTransaction};
