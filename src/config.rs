use crate::blockchain::parse_address;
use crate::amount::TokenAmount;
use crate::retry::RetryConfig;
use alloy::primitives::Address;
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;
use toml::Table;

/// Arbitrum One token distributor.
pub const DEFAULT_DISTRIBUTOR_ADDRESS: &str = "0x67a24CE4321aB3aF51c2D0a4801c3E111D88C9d9";
/// Arbitrum One ARB token.
pub const DEFAULT_TOKEN_ADDRESS: &str = "0x912CE59144191C1204E64559FE8253a0e49E6548";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainConfig {
    pub chain: ChainSettings,
    #[serde(default)]
    pub contracts: ContractAddresses,
    pub withdraw: WithdrawSettings,
    #[serde(default)]
    pub gas: GasSettings,
    #[serde(default)]
    pub retry: RetrySettings,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct ChainSettings {
    pub rpc_url: String,
    pub chain_id: Option<u64>,
    pub private_key: String,
}

impl fmt::Debug for ChainSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainSettings")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractAddresses {
    #[serde(default = "default_distributor_address")]
    pub distributor_address: String,
    #[serde(default = "default_token_address")]
    pub token_address: String,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            distributor_address: default_distributor_address(),
            token_address: default_token_address(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithdrawSettings {
    pub destination_address: String,
    #[serde(default = "default_withdraw_amount")]
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GasPriceStrategy {
    /// Always use `gas_price_wei`.
    Fixed,
    /// Ask the node via `eth_gasPrice` on every attempt.
    Oracle,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GasSettings {
    #[serde(default = "default_gas_strategy")]
    pub strategy: GasPriceStrategy,
    #[serde(default = "default_gas_price_wei")]
    pub gas_price_wei: u64,
    #[serde(default = "default_contract_gas_limit")]
    pub claim_gas_limit: u64,
    #[serde(default = "default_contract_gas_limit")]
    pub transfer_gas_limit: u64,
    #[serde(default = "default_eth_transfer_gas_limit")]
    pub eth_transfer_gas_limit: u64,
}

impl Default for GasSettings {
    fn default() -> Self {
        Self {
            strategy: default_gas_strategy(),
            gas_price_wei: default_gas_price_wei(),
            claim_gas_limit: default_contract_gas_limit(),
            transfer_gas_limit: default_contract_gas_limit(),
            eth_transfer_gas_limit: default_eth_transfer_gas_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrySettings {
    /// `0` keeps retrying until the operation succeeds.
    #[serde(default)]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            (self.max_attempts > 0).then_some(self.max_attempts),
            Duration::from_millis(self.base_delay_ms),
            Duration::from_millis(self.max_delay_ms),
            self.backoff_multiplier,
        )
    }
}

fn default_distributor_address() -> String {
    DEFAULT_DISTRIBUTOR_ADDRESS.to_string()
}

fn default_token_address() -> String {
    DEFAULT_TOKEN_ADDRESS.to_string()
}

fn default_withdraw_amount() -> String {
    "625.0".to_string()
}

fn default_gas_strategy() -> GasPriceStrategy {
    GasPriceStrategy::Fixed
}

fn default_gas_price_wei() -> u64 {
    100_000_001 * 2
}

fn default_contract_gas_limit() -> u64 {
    600_000
}

fn default_eth_transfer_gas_limit() -> u64 {
    210_000
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Values from [`ChainConfig`] checked once before any transaction is built.
#[derive(Debug, Clone)]
pub struct ValidatedTargets {
    pub distributor: Address,
    pub token: Address,
    pub destination: Address,
    pub amount: TokenAmount,
}

impl ChainConfig {
    /// Reads `path` layered over `configs/common.toml`, expanding `${VAR}`
    /// references from the environment (and `.env`, when present).
    pub fn load(path: &str) -> Result<Self> {
        dotenv::dotenv().ok();

        let specific = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let common = fs::read_to_string(COMMON_CONFIG_PATH).unwrap_or_default();

        let mut merged = parse_layer(&common)
            .with_context(|| format!("invalid {}", COMMON_CONFIG_PATH))?;
        overlay(
            &mut merged,
            parse_layer(&specific).with_context(|| format!("invalid config file {}", path))?,
        );

        toml::Value::Table(merged)
            .try_into()
            .with_context(|| format!("incomplete config in {}", path))
    }

    /// Builds a config from `HTTP_NODE`, `PRV_KEY` and `DEST_ADDRESS`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let var = |name: &str| env::var(name).with_context(|| format!("{} is not set", name));
        Ok(Self {
            chain: ChainSettings {
                rpc_url: var("HTTP_NODE")?,
                chain_id: None,
                private_key: var("PRV_KEY")?,
            },
            contracts: ContractAddresses::default(),
            withdraw: WithdrawSettings {
                destination_address: var("DEST_ADDRESS")?,
                amount: default_withdraw_amount(),
            },
            gas: GasSettings::default(),
            retry: RetrySettings::default(),
        })
    }

    /// Parses every address and the withdraw amount, failing fast on bad input.
    pub fn validate(&self) -> crate::error::Result<ValidatedTargets> {
        Ok(ValidatedTargets {
            distributor: parse_address(&self.contracts.distributor_address)?,
            token: parse_address(&self.contracts.token_address)?,
            destination: parse_address(&self.withdraw.destination_address)?,
            amount: TokenAmount::parse(&self.withdraw.amount)?,
        })
    }
}

const COMMON_CONFIG_PATH: &str = "configs/common.toml";

fn parse_layer(text: &str) -> Result<Table> {
    Ok(toml::from_str(&expand_env(text)?)?)
}

/// Unset variables are left as written, so they fail later validation.
fn expand_env(text: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let expanded = re.replace_all(text, |caps: &Captures| {
        env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(expanded.into_owned())
}

/// Tables merge key by key; any other value in `layer` replaces the base.
fn overlay(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        match value {
            toml::Value::Table(nested) if base.get(&key).is_some_and(toml::Value::is_table) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    overlay(existing, nested);
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[chain]
rpc_url = "https://arb1.arbitrum.io/rpc"
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"

[withdraw]
destination_address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
"#;

    #[test]
    fn test_defaults_match_fixed_policy() {
        let config: ChainConfig = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.gas.strategy, GasPriceStrategy::Fixed);
        assert_eq!(config.gas.gas_price_wei, 200_000_002);
        assert_eq!(config.gas.claim_gas_limit, 600_000);
        assert_eq!(config.gas.transfer_gas_limit, 600_000);
        assert_eq!(config.gas.eth_transfer_gas_limit, 210_000);
        assert_eq!(config.withdraw.amount, "625.0");
        assert_eq!(config.contracts.distributor_address, DEFAULT_DISTRIBUTOR_ADDRESS);
        assert_eq!(config.retry.max_attempts, 0);
        assert!(config.retry.to_retry_config().max_attempts.is_none());
    }

    #[test]
    fn test_overlay_merges_nested_tables() {
        let mut base = parse_layer("[gas]\nstrategy = \"fixed\"\nclaim_gas_limit = 1").unwrap();
        overlay(&mut base, parse_layer("[gas]\nclaim_gas_limit = 2\n[retry]\nmax_attempts = 4").unwrap());
        assert_eq!(base["gas"]["claim_gas_limit"].as_integer(), Some(2));
        assert_eq!(base["gas"]["strategy"].as_str(), Some("fixed"));
        assert_eq!(base["retry"]["max_attempts"].as_integer(), Some(4));
    }

    #[test]
    fn test_expand_env_keeps_unset_references() {
        env::set_var("ARB_CLAIMER_CONFIG_TEST_URL", "http://localhost:8547");
        let expanded =
            expand_env("a = \"${ARB_CLAIMER_CONFIG_TEST_URL}\"\nb = \"${ARB_CLAIMER_CONFIG_TEST_UNSET}\"").unwrap();
        assert_eq!(
            expanded,
            "a = \"http://localhost:8547\"\nb = \"${ARB_CLAIMER_CONFIG_TEST_UNSET}\""
        );
    }

    #[test]
    fn test_validate_rejects_bad_destination() {
        let mut config: ChainConfig = toml::from_str(MINIMAL).unwrap();
        assert!(config.validate().is_ok());

        config.withdraw.destination_address = "0x1234".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, crate::error::ClaimerError::InvalidAddress { .. }));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config: ChainConfig = toml::from_str(MINIMAL).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
        assert!(rendered.contains("<redacted>"));
    }
}
