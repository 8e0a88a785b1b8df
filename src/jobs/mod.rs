pub mod claim_and_withdraw;
pub mod claim_tokens;
pub mod status;
pub mod transfer_eth;
pub mod withdraw_tokens;

pub use claim_and_withdraw::{ClaimAndWithdrawJob, ClaimAndWithdrawReport};
pub use claim_tokens::ClaimTokensJob;
pub use status::{AccountStatus, StatusJob};
pub use transfer_eth::TransferEthJob;
pub use withdraw_tokens::WithdrawTokensJob;
