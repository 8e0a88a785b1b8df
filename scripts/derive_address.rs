use anyhow::Result;
use arb_claimer::Account;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let key = match args.get(1) {
        Some(key) => key.clone(),
        None => match std::env::var("PRV_KEY") {
            Ok(key) => key,
            Err(_) => {
                eprintln!("Usage: {} <PRIVATE_KEY_HEX>  (or set PRV_KEY)", args[0]);
                std::process::exit(1);
            }
        },
    };

    let account = Account::from_hex(&key)?;
    let address = account.address();

    println!("✅ Account address: {}", address);
    println!("💰 Fund this address with ETH for gas before running the claimer");
    println!("🔍 Arbiscan: https://arbiscan.io/address/{}", address);

    Ok(())
}
