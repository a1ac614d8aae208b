//! Funding Ledger - Binary Entry Point
//!
//! Runs a local session against a mock price feed: deploys a ledger,
//! funds it from a set of derived signers, then withdraws as the owner.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use funding_ledger::types::amount::{format_usd, from_wei, parse_units, to_wei, UNIT_DECIMALS};
use funding_ledger::{Address, FundingLedger, LedgerConfig, MockV3Aggregator, Wallets};

/// Local funding session
///
/// Deploys a ledger bound to a mock aggregator, has each signer
/// contribute, and withdraws everything back to the deployer.
#[derive(Debug, Parser)]
struct Settings {
    /// Reference-currency price of one native unit
    #[clap(long, default_value = "2000", value_name = "PRICE")]
    price: String,

    /// Decimals reported by the mock aggregator
    #[clap(long, default_value = "8", value_name = "DECIMALS")]
    decimals: u8,

    /// Number of signers (besides the deployer) that contribute
    #[clap(long, short = 'n', default_value = "5", value_name = "COUNT")]
    contributors: u64,

    /// Native units each signer contributes
    #[clap(long, short, default_value = "1", value_name = "AMOUNT")]
    amount: String,

    /// Minimum contribution in reference currency
    #[clap(long, default_value = "1", value_name = "USD")]
    minimum_usd: String,

    /// Native units prefunded to every signer
    #[clap(long, default_value = "10000", value_name = "AMOUNT")]
    prefund: String,
}

fn main() -> anyhow::Result<()> {
    // configure logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // gather CLI parameters
    let settings = Settings::parse();
    info!("startup settings: {settings:#?}");

    let answer = parse_units(&settings.price, settings.decimals as u32)
        .ok_or_else(|| anyhow::anyhow!("invalid price {:?}", settings.price))?;
    let value = to_wei(&settings.amount)
        .ok_or_else(|| anyhow::anyhow!("invalid amount {:?}", settings.amount))?;
    let minimum_usd = parse_units(&settings.minimum_usd, UNIT_DECIMALS)
        .ok_or_else(|| anyhow::anyhow!("invalid minimum {:?}", settings.minimum_usd))?;
    let prefund = to_wei(&settings.prefund)
        .ok_or_else(|| anyhow::anyhow!("invalid prefund {:?}", settings.prefund))?;

    // deploy
    let deployer = Address::derive("signer", 0);
    let feed = Arc::new(MockV3Aggregator::new(settings.decimals, i128::try_from(answer)?));
    let mut ledger = FundingLedger::with_config(
        deployer,
        feed,
        LedgerConfig::with_minimum_usd(minimum_usd),
    );
    info!(
        "minimum contribution at current price: {}",
        from_wei(ledger.minimum_contribution()?)
    );

    let mut wallets = Wallets::new();
    wallets.mint(deployer, prefund)?;

    // fund
    for i in 1..=settings.contributors {
        let signer = Address::derive("signer", i);
        wallets.mint(signer, prefund)?;
        match wallets.fund(&mut ledger, signer, value) {
            Ok(receipt) => info!(
                "funded {} from {} ({})",
                from_wei(receipt.value),
                receipt.sender(),
                format_usd(receipt.usd_value)
            ),
            Err(e) => warn!("fund from {signer} failed: {e}"),
        }
    }
    info!(
        "ledger holds {} from {} funders, root {}",
        from_wei(ledger.balance()),
        ledger.funder_count(),
        ledger.state_root_hex()
    );

    // withdraw
    let start_owner = wallets.balance_of(&deployer);
    let receipt = wallets.withdraw(&mut ledger, deployer)?;
    info!(
        "withdrew {} to {}; owner balance {} -> {}",
        from_wei(receipt.amount),
        receipt.owner(),
        from_wei(start_owner),
        from_wei(wallets.balance_of(&deployer))
    );

    Ok(())
}
