//! Dining-philosophers simulator
//!
//! Runs the classic deliberately-deadlockable table: start the seats,
//! report progress on a cadence, ask everyone to leave, then name whoever
//! never came back.

use std::time::Duration;

use anyhow::Result;
use dining_sim::observability::init_tracing;
use dining_sim::{SimConfig, Table};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("Starting dining simulation v{}", dining_sim::VERSION);

    let config = SimConfig::load()?;
    info!("Configuration loaded: {:?}", config);

    let mut table = Table::new(&config)?;
    table.start();

    let interval = Duration::from_millis(config.supervisor.report_interval_ms);
    for round in 1..=config.supervisor.report_rounds {
        tokio::time::sleep(interval).await;

        info!("--- status report {} ---", round);
        for seat in table.report() {
            info!(
                "{} has eaten {} times ({} think cycles)",
                seat.name, seat.meals_eaten, seat.think_cycles
            );
        }
    }

    table.stop();
    tokio::time::sleep(Duration::from_millis(config.supervisor.grace_delay_ms)).await;

    let stuck = table.detect_stuck();
    if stuck.is_empty() {
        info!("all philosophers left the table");
        Ok(())
    } else {
        warn!("deadlocked philosophers: {}", stuck.join(", "));
        // Deadlocked tasks can never be joined; exit without waiting on
        // the runtime to wind down.
        std::process::exit(1);
    }
}
