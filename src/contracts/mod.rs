pub mod distributor;
pub mod erc20;

pub use distributor::DistributorContract;
pub use erc20::ERC20Contract;
