//! Lock-free lot metrics
//!
//! Counters are atomics so a shared lot can record from any caller.
//!
//! All atomics use Relaxed ordering. They are reporting counters only and
//! must not drive lot decisions.

use crate::domain::types::SlotId;
use crate::error::LotError;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Stay-length bucket boundaries (minutes)
/// Buckets: ≤15, ≤30, ≤60, ≤120, ≤240, ≤480, ≤1440, >1440 min
const STAY_BOUNDS: [u64; 7] = [15, 30, 60, 120, 240, 480, 1440];
pub const STAY_NUM_BUCKETS: usize = 8;

/// Compute bucket index for a stay length using binary search
#[inline]
fn stay_bucket_index(minutes: u64) -> usize {
    STAY_BOUNDS.partition_point(|&bound| bound < minutes)
}

/// Load all bucket values
#[inline]
fn load_buckets(buckets: &[AtomicU64; STAY_NUM_BUCKETS]) -> [u64; STAY_NUM_BUCKETS] {
    let mut result = [0u64; STAY_NUM_BUCKETS];
    for (slot, bucket) in result.iter_mut().zip(buckets) {
        *slot = bucket.load(Ordering::Relaxed);
    }
    result
}

/// Lock-free metrics collector for one lot
#[derive(Debug)]
pub struct LotMetrics {
    /// Successful check-ins (monotonic)
    check_ins_total: AtomicU64,
    /// Successful check-outs (monotonic)
    check_outs_total: AtomicU64,
    /// Check-ins refused because the plate was already parked
    rejected_duplicate: AtomicU64,
    /// Check-ins refused because no slot was free
    rejected_full: AtomicU64,
    /// Check-outs for plates not in the lot
    rejected_not_found: AtomicU64,
    /// Requests refused by plate/owner validation
    rejected_invalid: AtomicU64,
    /// Registry refusals on assign/release
    rejected_slot: AtomicU64,
    /// Observer callbacks that returned an error
    observer_failures: AtomicU64,
    /// Sum of all fees charged
    revenue_total: AtomicU64,
    /// Sum of stay minutes over all check-outs
    stay_minutes_sum: AtomicU64,
    /// Stay-length histogram buckets
    stay_buckets: [AtomicU64; STAY_NUM_BUCKETS],
    /// Check-ins per slot
    slot_usage: parking_lot::RwLock<FxHashMap<SlotId, u64>>,
}

impl LotMetrics {
    pub fn new() -> Self {
        Self {
            check_ins_total: AtomicU64::new(0),
            check_outs_total: AtomicU64::new(0),
            rejected_duplicate: AtomicU64::new(0),
            rejected_full: AtomicU64::new(0),
            rejected_not_found: AtomicU64::new(0),
            rejected_invalid: AtomicU64::new(0),
            rejected_slot: AtomicU64::new(0),
            observer_failures: AtomicU64::new(0),
            revenue_total: AtomicU64::new(0),
            stay_minutes_sum: AtomicU64::new(0),
            stay_buckets: std::array::from_fn(|_| AtomicU64::new(0)),
            slot_usage: parking_lot::RwLock::new(FxHashMap::default()),
        }
    }

    pub fn record_check_in(&self, slot: SlotId) {
        self.check_ins_total.fetch_add(1, Ordering::Relaxed);
        *self.slot_usage.write().entry(slot).or_insert(0) += 1;
    }

    pub fn record_check_out(&self, stay_minutes: u64, fee: u64) {
        self.check_outs_total.fetch_add(1, Ordering::Relaxed);
        self.revenue_total.fetch_add(fee, Ordering::Relaxed);
        self.stay_minutes_sum.fetch_add(stay_minutes, Ordering::Relaxed);
        self.stay_buckets[stay_bucket_index(stay_minutes)].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self, err: &LotError) {
        let counter = match err {
            LotError::DuplicateParking { .. } => &self.rejected_duplicate,
            LotError::LotFull { .. } => &self.rejected_full,
            LotError::VehicleNotFound(_) => &self.rejected_not_found,
            LotError::InvalidVehicleInput(_) => &self.rejected_invalid,
            LotError::Slot(_) => &self.rejected_slot,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_observer_failure(&self) {
        self.observer_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn check_ins_total(&self) -> u64 {
        self.check_ins_total.load(Ordering::Relaxed)
    }

    pub fn check_outs_total(&self) -> u64 {
        self.check_outs_total.load(Ordering::Relaxed)
    }

    pub fn observer_failures(&self) -> u64 {
        self.observer_failures.load(Ordering::Relaxed)
    }

    pub fn revenue_total(&self) -> u64 {
        self.revenue_total.load(Ordering::Relaxed)
    }

    /// Check-ins recorded for a slot
    pub fn slot_usage(&self, slot: SlotId) -> u64 {
        self.slot_usage.read().get(&slot).copied().unwrap_or(0)
    }

    /// Snapshot all counters
    pub fn report(&self, occupied_slots: usize, total_slots: usize) -> MetricsSummary {
        let check_outs = self.check_outs_total.load(Ordering::Relaxed);
        let stay_sum = self.stay_minutes_sum.load(Ordering::Relaxed);
        let avg_stay_minutes = if check_outs > 0 { stay_sum / check_outs } else { 0 };

        let busiest_slot = self
            .slot_usage
            .read()
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&slot, &count)| (slot, count));

        MetricsSummary {
            check_ins_total: self.check_ins_total.load(Ordering::Relaxed),
            check_outs_total: check_outs,
            rejected_duplicate: self.rejected_duplicate.load(Ordering::Relaxed),
            rejected_full: self.rejected_full.load(Ordering::Relaxed),
            rejected_not_found: self.rejected_not_found.load(Ordering::Relaxed),
            rejected_invalid: self.rejected_invalid.load(Ordering::Relaxed),
            rejected_slot: self.rejected_slot.load(Ordering::Relaxed),
            observer_failures: self.observer_failures.load(Ordering::Relaxed),
            revenue_total: self.revenue_total.load(Ordering::Relaxed),
            avg_stay_minutes,
            stay_buckets: load_buckets(&self.stay_buckets),
            busiest_slot,
            occupied_slots,
            total_slots,
        }
    }
}

impl Default for LotMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub check_ins_total: u64,
    pub check_outs_total: u64,
    pub rejected_duplicate: u64,
    pub rejected_full: u64,
    pub rejected_not_found: u64,
    pub rejected_invalid: u64,
    pub rejected_slot: u64,
    pub observer_failures: u64,
    pub revenue_total: u64,
    pub avg_stay_minutes: u64,
    /// Stay-length histogram
    /// Bounds: ≤15, ≤30, ≤60, ≤120, ≤240, ≤480, ≤1440, >1440 min
    pub stay_buckets: [u64; STAY_NUM_BUCKETS],
    /// Slot with the most check-ins (lowest id wins ties)
    pub busiest_slot: Option<(SlotId, u64)>,
    pub occupied_slots: usize,
    pub total_slots: usize,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            check_ins = %self.check_ins_total,
            check_outs = %self.check_outs_total,
            rejected_duplicate = %self.rejected_duplicate,
            rejected_full = %self.rejected_full,
            rejected_not_found = %self.rejected_not_found,
            rejected_invalid = %self.rejected_invalid,
            rejected_slot = %self.rejected_slot,
            observer_failures = %self.observer_failures,
            revenue_total = %self.revenue_total,
            avg_stay_minutes = %self.avg_stay_minutes,
            busiest_slot = ?self.busiest_slot.map(|(slot, _)| slot.0),
            occupied = %self.occupied_slots,
            total_slots = %self.total_slots,
            "metrics"
        );
    }
}
