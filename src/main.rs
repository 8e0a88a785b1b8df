use alloy::primitives::U256;
use anyhow::{Context, Result};
use arb_claimer::amount::TokenAmount;
use arb_claimer::blockchain::parse_address;
use arb_claimer::config::ChainConfig;
use arb_claimer::jobs::{
    ClaimAndWithdrawJob, ClaimTokensJob, StatusJob, TransferEthJob, WithdrawTokensJob,
};
use arb_claimer::Claimer;
use clap::{Parser, Subcommand};
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Claims airdropped tokens and forwards them to a destination address", long_about = None)]
struct Cli {
    /// TOML config file, merged over configs/common.toml
    #[arg(long, global = true, default_value = "configs/arbitrum.toml")]
    config: String,

    /// Read HTTP_NODE, PRV_KEY and DEST_ADDRESS from the environment instead of a config file
    #[arg(long, global = true, default_value_t = false)]
    env: bool,

    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Set the log level (trace, debug, info, warn, error)"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Claim and withdraw concurrently, retrying each until it is accepted (default)
    Run,
    /// Claim from the distributor only
    Claim,
    /// Transfer tokens to the destination address only
    Withdraw {
        /// Human-scale amount, overrides [withdraw].amount
        #[arg(long)]
        amount: Option<String>,
    },
    /// Send native currency from the account
    TransferEth {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount_wei: String,
    },
    /// Show nonce, claimable amount, balance and claim window
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = if cli.env {
        ChainConfig::from_env()?
    } else {
        ChainConfig::load(&cli.config)?
    };
    let retry_config = config.retry.to_retry_config();

    info!("🚀 Starting arb-claimer");
    let (claimer, targets) = Claimer::from_config(&config)
        .await
        .context("setup failed")?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let report =
                ClaimAndWithdrawJob::new(claimer, targets.destination, targets.amount, retry_config)
                    .execute()
                    .await?;
            println!("{}", report.claim_tx);
            println!("{}", report.withdraw_tx);
        }
        Command::Claim => {
            let tx_hash = ClaimTokensJob::new(claimer, retry_config).execute().await?;
            println!("{}", tx_hash);
        }
        Command::Withdraw { amount } => {
            let amount = match amount {
                Some(amount) => TokenAmount::parse(&amount)?,
                None => targets.amount,
            };
            let tx_hash = WithdrawTokensJob::new(claimer, targets.destination, amount, retry_config)
                .execute()
                .await?;
            println!("{}", tx_hash);
        }
        Command::TransferEth { to, amount_wei } => {
            let to = parse_address(&to)?;
            let amount_wei = U256::from_str(&amount_wei)
                .with_context(|| format!("invalid wei amount {}", amount_wei))?;
            let tx_hash = TransferEthJob::new(claimer.executor().clone(), to, amount_wei, retry_config)
                .execute()
                .await?;
            println!("{}", tx_hash);
        }
        Command::Status => {
            StatusJob::new(claimer).execute().await?;
        }
    }

    Ok(())
}
