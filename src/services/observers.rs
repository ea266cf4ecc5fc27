use crate::domain::types::SlotId;
use crate::domain::vehicle::Vehicle;
use tracing::info;

/// An occupied slot as seen by observers
#[derive(Debug, Clone, Copy)]
pub struct OccupiedSlot<'a> {
    pub slot: SlotId,
    pub vehicle: &'a Vehicle,
}

/// Handler notified after each committed occupancy change
///
/// Receives the vehicles still occupying slots, in slot order. An error is
/// logged by the lot and does not undo the change or stop other observers.
pub trait ParkingObserver: Send {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn on_occupancy_change(&mut self, occupied: &[OccupiedSlot<'_>]) -> anyhow::Result<()>;
}

/// Logs the occupancy snapshot after each change
#[derive(Debug, Default)]
pub struct StatusLogger;

impl ParkingObserver for StatusLogger {
    fn name(&self) -> &str {
        "status_logger"
    }

    fn on_occupancy_change(&mut self, occupied: &[OccupiedSlot<'_>]) -> anyhow::Result<()> {
        for entry in occupied {
            info!(slot = %entry.slot, plate = %entry.vehicle.plate(), "slot_occupied");
        }
        info!(occupied = %occupied.len(), "occupancy_logged");
        Ok(())
    }
}
