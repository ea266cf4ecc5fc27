//! Parking lot manager - single-lot operator console
//!
//! Module structure:
//! - `domain/` - Core types (Vehicle, HistoryEntry, LicensePlate)
//! - `services/` - Business logic (ParkingLot, FeePolicy, Statistics)
//! - `io/` - Operator menu, text reports, replication file
//! - `infra/` - Infrastructure (Config, Clock, Metrics)

use clap::Parser;
use parking_manager::infra::{Config, SystemClock};
use parking_manager::io::{DataReplicator, Menu};
use parking_manager::services::{ParkingLot, StatusLogger};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Parking lot manager - check vehicles in and out of a single lot
#[derive(Parser, Debug)]
#[command(name = "parking-manager", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/parking.toml")]
    config: String,

    /// Override the number of slots from the config file
    #[arg(long)]
    slots: Option<usize>,

    /// Override the replication file path
    #[arg(long)]
    replication_file: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so the menu owns stdout
    // Default: INFO, use RUST_LOG=debug for slot and history events
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(version = %env!("CARGO_PKG_VERSION"), git_hash = %env!("GIT_HASH"), "parking-manager starting");

    let mut config = Config::load_from_path(&args.config);
    if let Some(slots) = args.slots {
        config = config.with_total_slots(slots);
    }
    if let Some(file) = &args.replication_file {
        config = config.with_replication_file(file);
    }

    info!(
        config_file = %config.config_file(),
        lot_name = %config.lot_name(),
        total_slots = %config.total_slots(),
        hourly_rate = %config.hourly_rate(),
        currency = %config.currency(),
        min_billed_hours = %config.min_billed_hours(),
        replication_enabled = %config.replication_enabled(),
        replication_file = %config.replication_file(),
        "config_loaded"
    );

    let clock = Arc::new(SystemClock);
    let mut lot = ParkingLot::with_clock(&config, clock.clone());
    lot.add_observer(Box::new(StatusLogger));
    if config.replication_enabled() {
        lot.add_observer(Box::new(DataReplicator::new(config.replication_file(), clock)));
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(&mut lot, stdin.lock(), stdout.lock()).run()?;

    lot.metrics().report(lot.occupied_count(), lot.total_slots()).log();
    info!("parking-manager stopped");
    Ok(())
}
