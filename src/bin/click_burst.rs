//! Click Burst Tool
//!
//! Fires several overlapping fund actions at once, the way rapid repeated
//! clicks would, and reports how each one ended.
//!
//! Run with: cargo run --bin click_burst --release -- --clicks 5 --amount 0.01

use std::sync::Arc;
use std::time::Instant;

use fund_me_client::{Action, ActionOutcome, Config, Dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fund_me_client=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let clicks: usize = args
        .iter()
        .position(|a| a == "--clicks")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let amount = args
        .iter()
        .position(|a| a == "--amount")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_else(|| "0.01".to_string());

    let config = Config::from_env()?;
    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);

    println!("Click Burst - {} overlapping deposits of {} ether", clicks, amount);
    println!("Signing agent: {}", config.rpc_url);

    let start = Instant::now();
    let tasks: Vec<_> = (0..clicks)
        .map(|_| {
            let dispatcher = dispatcher.clone();
            let amount = amount.clone();
            tokio::spawn(async move { dispatcher.dispatch(Action::Fund { amount }).await })
        })
        .collect();

    let mut confirmed = 0usize;
    let mut failed = 0usize;
    let mut missing = 0usize;

    for (i, task) in tasks.into_iter().enumerate() {
        match task.await? {
            Ok(ActionOutcome::Confirmed { transaction, text }) => {
                confirmed += 1;
                println!("#{:<3} {} {}", i + 1, transaction.tx_hash, text);
            }
            Ok(ActionOutcome::AgentMissing { text }) => {
                missing += 1;
                println!("#{:<3} {}", i + 1, text);
            }
            Ok(other) => println!("#{:<3} unexpected outcome: {}", i + 1, other.text()),
            Err(error) => {
                failed += 1;
                println!("#{:<3} failed: {}", i + 1, error);
            }
        }
    }

    let elapsed = start.elapsed();

    println!("\n=== Click Burst Results ===");
    println!("Clicks: {}", clicks);
    println!("Confirmed: {}", confirmed);
    println!("Failed: {}", failed);
    println!("Agent missing: {}", missing);
    println!("Time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}
