//! Parking lot coordinator
//!
//! Owns the slot registry, the all-time vehicle list and the history log, and
//! drives the per-vehicle state machine:
//!
//! ```text
//! NotParked --check_in--> Parked --check_out--> Exited
//! ```
//!
//! Each transition is all-or-nothing: every precondition is checked before the
//! first mutation. Observers run after the transition has committed.

use crate::domain::history::HistoryEntry;
use crate::domain::types::{SlotId, VehicleId};
use crate::domain::vehicle::Vehicle;
use crate::error::{LotError, LotResult, ValidationError};
use crate::infra::clock::{Clock, SystemClock};
use crate::infra::config::{Config, DEFAULT_LOT_NAME};
use crate::infra::metrics::LotMetrics;
use crate::services::fee_policy::{FeeBreakdown, FeePolicy};
use crate::services::history::ParkingHistory;
use crate::services::observers::{OccupiedSlot, ParkingObserver};
use crate::services::slot_registry::SlotRegistry;
use crate::services::statistics::StatisticsSnapshot;
use chrono::NaiveDateTime;
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{info, warn};

/// Confirmation of a successful check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInReceipt {
    pub slot: SlotId,
    pub plate: String,
    pub owner: String,
    pub entry_time: NaiveDateTime,
}

/// Confirmation of a successful check-out, with the priced stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutReceipt {
    pub slot: SlotId,
    pub plate: String,
    pub owner: String,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    pub minutes: u64,
    pub billed_hours: u64,
    pub fee: u64,
    pub currency: String,
}

/// One row of the slot status view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub slot: SlotId,
    pub plate: Option<String>,
}

/// Slot occupancy view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotStatus {
    pub slots: Vec<SlotStatus>,
    pub occupied: usize,
    pub total: usize,
}

impl LotStatus {
    pub fn available(&self) -> usize {
        self.total - self.occupied
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    CheckIn,
    CheckOut,
}

/// Single parking lot: slots, vehicles, history and observers
pub struct ParkingLot {
    name: String,
    registry: SlotRegistry,
    /// Every vehicle ever admitted, in admission order
    vehicles: Vec<Vehicle>,
    history: ParkingHistory,
    fees: FeePolicy,
    observers: SmallVec<[Box<dyn ParkingObserver>; 4]>,
    clock: Arc<dyn Clock>,
    metrics: Arc<LotMetrics>,
}

impl std::fmt::Debug for ParkingLot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingLot")
            .field("name", &self.name)
            .field("total_slots", &self.registry.total_slots())
            .field("occupied", &self.registry.occupied_count())
            .field("vehicles", &self.vehicles.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ParkingLot {
    /// Create a lot with `total_slots` slots numbered from 1
    pub fn new(total_slots: usize, fees: FeePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: DEFAULT_LOT_NAME.to_string(),
            registry: SlotRegistry::new(total_slots),
            vehicles: Vec::new(),
            history: ParkingHistory::new(),
            fees,
            observers: SmallVec::new(),
            clock,
            metrics: Arc::new(LotMetrics::new()),
        }
    }

    /// Create a lot from configuration using the system clock
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let mut lot = Self::new(config.total_slots(), FeePolicy::from_config(config), clock);
        lot.name = config.lot_name().to_string();
        lot
    }

    /// Register an observer; observers run in registration order
    pub fn add_observer(&mut self, observer: Box<dyn ParkingObserver>) {
        info!(observer = %observer.name(), "observer_registered");
        self.observers.push(observer);
    }

    /// Validate raw input, then check the vehicle in
    pub fn check_in_plate(&mut self, plate: &str, owner: &str) -> LotResult<CheckInReceipt> {
        match Vehicle::new(plate, owner) {
            Ok(vehicle) => self.check_in(vehicle),
            Err(e) => Err(self.reject(Operation::CheckIn, plate, e.into())),
        }
    }

    /// Admit a vehicle into the first free slot
    pub fn check_in(&mut self, mut vehicle: Vehicle) -> LotResult<CheckInReceipt> {
        let plate = vehicle.plate().to_string();

        if let Some(slot) = self.registry.find_slot_by_plate(&plate, &self.vehicles) {
            let err = LotError::DuplicateParking { plate, slot };
            return Err(self.reject(Operation::CheckIn, vehicle.plate().as_str(), err));
        }

        let Some(slot) = self.registry.find_free_slot() else {
            let err = LotError::LotFull { total_slots: self.registry.total_slots() };
            return Err(self.reject(Operation::CheckIn, &plate, err));
        };

        let vehicle_id = VehicleId(self.vehicles.len());
        if let Err(e) = self.registry.assign(slot, vehicle_id) {
            return Err(self.reject(Operation::CheckIn, &plate, e.into()));
        }
        let now = self.clock.now();
        vehicle.mark_entered(now);
        self.history.record_entry(&vehicle, now);

        let receipt = CheckInReceipt {
            slot,
            plate,
            owner: vehicle.owner().to_string(),
            entry_time: now,
        };
        self.vehicles.push(vehicle);
        self.metrics.record_check_in(slot);

        info!(
            slot = %slot,
            plate = %receipt.plate,
            owner = %receipt.owner,
            occupied = %self.registry.occupied_count(),
            total_slots = %self.registry.total_slots(),
            "vehicle_checked_in"
        );

        self.notify_observers();
        Ok(receipt)
    }

    /// Release the slot held by `plate` and charge for the stay
    pub fn check_out(&mut self, plate: &str) -> LotResult<CheckOutReceipt> {
        let found = self.registry.slots().iter().find_map(|s| {
            let vid = s.occupant()?;
            let v = self.vehicles.get(vid.0)?;
            (v.is_present() && v.plate() == plate).then_some((s.id(), vid))
        });

        let Some((slot, vehicle_id)) = found else {
            let err = LotError::VehicleNotFound(plate.to_string());
            return Err(self.reject(Operation::CheckOut, plate, err));
        };

        if let Err(e) = self.registry.release(slot) {
            return Err(self.reject(Operation::CheckOut, plate, e.into()));
        }
        let now = self.clock.now();
        // vehicle_id was just resolved through `self.vehicles.get`
        let vehicle = &mut self.vehicles[vehicle_id.0];
        vehicle.mark_exited(now);

        let FeeBreakdown { minutes, billed_hours, fee } =
            self.fees.breakdown(vehicle.entry_time(), vehicle.exit_time());
        self.history.record_exit(vehicle, now, fee, self.fees.currency());

        let receipt = CheckOutReceipt {
            slot,
            plate: vehicle.plate().to_string(),
            owner: vehicle.owner().to_string(),
            entry_time: vehicle.entry_time().unwrap_or(now),
            exit_time: now,
            minutes,
            billed_hours,
            fee,
            currency: self.fees.currency().to_string(),
        };
        self.metrics.record_check_out(minutes, fee);

        info!(
            slot = %slot,
            plate = %receipt.plate,
            minutes = %minutes,
            billed_hours = %billed_hours,
            fee = %fee,
            currency = %receipt.currency,
            "vehicle_checked_out"
        );

        self.notify_observers();
        Ok(receipt)
    }

    /// Count and log a refused request, handing the error back to the caller
    fn reject(&self, operation: Operation, plate: &str, err: LotError) -> LotError {
        self.metrics.record_rejection(&err);
        match operation {
            Operation::CheckIn => {
                warn!(plate = %plate, reason = %err.kind(), error = %err, "check_in_rejected")
            }
            Operation::CheckOut => {
                warn!(plate = %plate, reason = %err.kind(), error = %err, "check_out_rejected")
            }
        }
        err
    }

    /// Fan out the occupied list to every observer, isolating failures
    fn notify_observers(&mut self) {
        let occupied = occupied_slots(&self.registry, &self.vehicles);

        for observer in self.observers.iter_mut() {
            if let Err(e) = observer.on_occupancy_change(&occupied) {
                self.metrics.record_observer_failure();
                warn!(observer = %observer.name(), error = %format!("{e:#}"), "observer_failed");
            }
        }
    }

    /// Vehicles currently occupying slots, in slot order
    pub fn occupied_vehicles(&self) -> Vec<OccupiedSlot<'_>> {
        occupied_slots(&self.registry, &self.vehicles)
    }

    /// Every vehicle ever admitted, including those that left
    pub fn all_vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn total_slots(&self) -> usize {
        self.registry.total_slots()
    }

    pub fn occupied_count(&self) -> usize {
        self.registry.occupied_count()
    }

    pub fn free_slots(&self) -> usize {
        self.registry.free_count()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fees(&self) -> &FeePolicy {
        &self.fees
    }

    pub fn history(&self) -> &ParkingHistory {
        &self.history
    }

    pub fn metrics(&self) -> &Arc<LotMetrics> {
        &self.metrics
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Slot-by-slot occupancy
    pub fn status(&self) -> LotStatus {
        let slots = self
            .registry
            .slots()
            .iter()
            .map(|s| SlotStatus {
                slot: s.id(),
                plate: s
                    .occupant()
                    .and_then(|vid| self.vehicles.get(vid.0))
                    .map(|v| v.plate().to_string()),
            })
            .collect();
        LotStatus {
            slots,
            occupied: self.registry.occupied_count(),
            total: self.registry.total_slots(),
        }
    }

    /// History entries for a dd-mm-yyyy date
    pub fn query_history(&self, date: &str) -> Result<Vec<&HistoryEntry>, ValidationError> {
        self.history.by_date(date)
    }

    /// Aggregate statistics at the clock's current time
    pub fn statistics(&self) -> StatisticsSnapshot {
        StatisticsSnapshot::compute(
            &self.vehicles,
            self.clock.now(),
            &self.fees,
            self.registry.occupied_count(),
            self.registry.total_slots(),
        )
    }

    /// Slot and record of a vehicle currently in the lot
    pub fn find_parked(&self, plate: &str) -> Option<(SlotId, &Vehicle)> {
        self.occupied_vehicles()
            .into_iter()
            .find(|o| o.vehicle.plate() == plate)
            .map(|o| (o.slot, o.vehicle))
    }
}

fn occupied_slots<'a>(registry: &SlotRegistry, vehicles: &'a [Vehicle]) -> Vec<OccupiedSlot<'a>> {
    registry
        .slots()
        .iter()
        .filter_map(|s| {
            let vehicle = vehicles.get(s.occupant()?.0)?;
            Some(OccupiedSlot { slot: s.id(), vehicle })
        })
        .collect()
}
