//! Hourly fee policy
//!
//! Any partial hour is billed as a whole hour: billed_hours = (minutes + 59) / 60.
//! A zero-minute stay bills zero hours unless `min_billed_hours` raises the floor.

use crate::domain::vehicle::Vehicle;
use crate::infra::config::{Config, DEFAULT_HOURLY_RATE};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Result of pricing one stay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeeBreakdown {
    /// Whole minutes parked (truncated, never negative)
    pub minutes: u64,
    pub billed_hours: u64,
    pub fee: u64,
}

/// Prices a stay interval
#[derive(Debug, Clone)]
pub struct FeePolicy {
    hourly_rate: u64,
    currency: String,
    min_billed_hours: u64,
}

impl FeePolicy {
    pub fn new(hourly_rate: u64, currency: &str) -> Self {
        Self { hourly_rate, currency: currency.to_string(), min_billed_hours: 0 }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.hourly_rate(), config.currency())
            .with_min_billed_hours(config.min_billed_hours())
    }

    pub fn with_min_billed_hours(mut self, hours: u64) -> Self {
        self.min_billed_hours = hours;
        self
    }

    pub fn hourly_rate(&self) -> u64 {
        self.hourly_rate
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Price a stay; an open or unstarted stay costs nothing
    pub fn breakdown(
        &self,
        entry: Option<NaiveDateTime>,
        exit: Option<NaiveDateTime>,
    ) -> FeeBreakdown {
        let (Some(entry), Some(exit)) = (entry, exit) else {
            return FeeBreakdown::default();
        };

        // Exit before entry (clock adjustment) counts as a zero-minute stay
        let minutes = u64::try_from((exit - entry).num_minutes()).unwrap_or(0);
        let billed_hours = minutes.div_ceil(60).max(self.min_billed_hours);
        let fee = billed_hours.saturating_mul(self.hourly_rate);

        FeeBreakdown { minutes, billed_hours, fee }
    }

    pub fn calculate_fee(&self, entry: Option<NaiveDateTime>, exit: Option<NaiveDateTime>) -> u64 {
        self.breakdown(entry, exit).fee
    }

    /// Fee for a vehicle's recorded stay
    pub fn fee_for(&self, vehicle: &Vehicle) -> u64 {
        self.calculate_fee(vehicle.entry_time(), vehicle.exit_time())
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_HOURLY_RATE, "NIS")
    }
}
