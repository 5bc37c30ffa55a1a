//! Swap Market - Binary Entry Point
//!
//! Runs one request/offer/swap round against an in-memory registry and
//! prints the resulting events and state root. Reads configuration from the
//! file named by `SWAP_MARKET_CONFIG`, falling back to defaults.

use std::process::ExitCode;

use swap_market::config::{init_logging, MarketConfig};
use swap_market::registry::OwnershipRegistry;
use swap_market::types::amount::from_fixed_trimmed;
use swap_market::{InMemoryRegistry, StickerCollection, SwapLedger};
use tracing::{error, info};

const ALICE: u64 = 100;
const BOB: u64 = 200;

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<MarketConfig, swap_market::ConfigError> {
    let config = match std::env::var("SWAP_MARKET_CONFIG") {
        Ok(path) => MarketConfig::load_with_env_overrides(path)?,
        Err(_) => {
            let mut config = MarketConfig::default();
            config.apply_env_overrides()?;
            config
        }
    };
    config.validate()?;
    Ok(config)
}

fn run(config: &MarketConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = InMemoryRegistry::new();
    let mut stickers = StickerCollection::from_config(&config.issuance)?;
    let mut ledger = SwapLedger::from_config(&config.ledger);
    let market = ledger.account();

    info!(
        collection = stickers.collection_id(),
        fee = %from_fixed_trimmed(stickers.mint_fee()),
        "collection ready"
    );

    let fee = stickers.mint_fee();
    let wanted = stickers.buy_sticker(&mut registry, ALICE, fee)?.item;
    let offered = stickers.buy_sticker(&mut registry, BOB, fee)?.item;
    registry.approve(ALICE, wanted, market)?;
    registry.approve(BOB, offered, market)?;

    let mut events = ledger.add_request(&registry, wanted, ALICE)?;
    events.extend(ledger.add_offer(&registry, wanted, offered, BOB)?);
    events.extend(ledger.swap(&mut registry, wanted, offered)?);

    println!("===========================================");
    println!("  Swap Market");
    println!("===========================================");
    for event in &events {
        println!("  {}", event);
    }
    println!();
    println!("  {} now held by {}", wanted, registry.owner_of(wanted)?);
    println!("  {} now held by {}", offered, registry.owner_of(offered)?);
    println!("  State root: {}", ledger.state_root_hex());

    Ok(())
}
