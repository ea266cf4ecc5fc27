//! Fixed-size slot registry
//!
//! Slots hold a `VehicleId` into the lot's all-time vehicle list; the registry
//! never owns vehicle records. Slot count is fixed at construction.

use crate::domain::types::{SlotId, VehicleId};
use crate::domain::vehicle::Vehicle;
use crate::error::SlotError;
use tracing::debug;

/// One parking space
#[derive(Debug, Clone)]
pub struct ParkingSlot {
    id: SlotId,
    occupant: Option<VehicleId>,
}

impl ParkingSlot {
    pub fn new(id: SlotId) -> Self {
        Self { id, occupant: None }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn occupant(&self) -> Option<VehicleId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Slots 1..=N in ascending id order
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    slots: Vec<ParkingSlot>,
}

impl SlotRegistry {
    pub fn new(total_slots: usize) -> Self {
        let slots = (1..=total_slots).map(|id| ParkingSlot::new(SlotId(id))).collect();
        Self { slots }
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn free_count(&self) -> usize {
        self.total_slots() - self.occupied_count()
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    /// First unoccupied slot by ascending id
    pub fn find_free_slot(&self) -> Option<SlotId> {
        self.slots.iter().find(|s| !s.is_occupied()).map(|s| s.id)
    }

    /// Slot holding a present vehicle with this plate
    pub fn find_slot_by_plate(&self, plate: &str, vehicles: &[Vehicle]) -> Option<SlotId> {
        self.slots
            .iter()
            .find(|s| {
                s.occupant
                    .and_then(|vid| vehicles.get(vid.0))
                    .is_some_and(|v| v.is_present() && v.plate() == plate)
            })
            .map(|s| s.id)
    }

    pub fn assign(&mut self, slot: SlotId, vehicle: VehicleId) -> Result<(), SlotError> {
        let entry = self.slot_mut(slot)?;
        if entry.occupant.is_some() {
            return Err(SlotError::Occupied(slot));
        }
        entry.occupant = Some(vehicle);
        debug!(slot = %slot, vehicle = %vehicle.0, "slot_assigned");
        Ok(())
    }

    /// Clear a slot, returning the vehicle it held
    pub fn release(&mut self, slot: SlotId) -> Result<VehicleId, SlotError> {
        let entry = self.slot_mut(slot)?;
        let vehicle = entry.occupant.take().ok_or(SlotError::Vacant(slot))?;
        debug!(slot = %slot, vehicle = %vehicle.0, "slot_released");
        Ok(vehicle)
    }

    fn slot_mut(&mut self, slot: SlotId) -> Result<&mut ParkingSlot, SlotError> {
        slot.0
            .checked_sub(1)
            .and_then(|idx| self.slots.get_mut(idx))
            .ok_or(SlotError::Unknown(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parked(plate: &str) -> Vehicle {
        let at = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap().and_hms_opt(9, 0, 0).unwrap();
        Vehicle::with_stay(plate, "Owner", Some(at), None)
    }

    #[test]
    fn test_slot_starts_empty() {
        let slot = ParkingSlot::new(SlotId(1));
        assert_eq!(slot.id(), SlotId(1));
        assert!(!slot.is_occupied());
        assert!(slot.occupant().is_none());
    }

    #[test]
    fn test_registry_ids_ascending() {
        let registry = SlotRegistry::new(3);
        let ids: Vec<SlotId> = registry.slots().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![SlotId(1), SlotId(2), SlotId(3)]);
        assert_eq!(registry.free_count(), 3);
    }

    #[test]
    fn test_find_free_slot_lowest_first() {
        let mut registry = SlotRegistry::new(3);
        assert_eq!(registry.find_free_slot(), Some(SlotId(1)));

        registry.assign(SlotId(1), VehicleId(0)).unwrap();
        registry.assign(SlotId(3), VehicleId(1)).unwrap();
        assert_eq!(registry.find_free_slot(), Some(SlotId(2)));

        registry.assign(SlotId(2), VehicleId(2)).unwrap();
        assert_eq!(registry.find_free_slot(), None);
        assert_eq!(registry.occupied_count(), 3);
    }

    #[test]
    fn test_assign_occupied_slot_fails() {
        let mut registry = SlotRegistry::new(2);
        registry.assign(SlotId(1), VehicleId(0)).unwrap();

        assert_eq!(registry.assign(SlotId(1), VehicleId(1)), Err(SlotError::Occupied(SlotId(1))));
        assert_eq!(registry.slots()[0].occupant(), Some(VehicleId(0)));
    }

    #[test]
    fn test_release() {
        let mut registry = SlotRegistry::new(2);
        registry.assign(SlotId(2), VehicleId(5)).unwrap();

        assert_eq!(registry.release(SlotId(2)), Ok(VehicleId(5)));
        assert!(!registry.slots()[1].is_occupied());
        assert_eq!(registry.release(SlotId(2)), Err(SlotError::Vacant(SlotId(2))));
    }

    #[test]
    fn test_unknown_slot() {
        let mut registry = SlotRegistry::new(2);
        assert_eq!(registry.assign(SlotId(0), VehicleId(0)), Err(SlotError::Unknown(SlotId(0))));
        assert_eq!(registry.release(SlotId(3)), Err(SlotError::Unknown(SlotId(3))));
    }

    #[test]
    fn test_find_slot_by_plate() {
        let vehicles = vec![parked("AAA111"), parked("BBB222")];
        let mut registry = SlotRegistry::new(3);
        registry.assign(SlotId(1), VehicleId(0)).unwrap();
        registry.assign(SlotId(3), VehicleId(1)).unwrap();

        assert_eq!(registry.find_slot_by_plate("BBB222", &vehicles), Some(SlotId(3)));
        assert_eq!(registry.find_slot_by_plate("AAA111", &vehicles), Some(SlotId(1)));
        assert_eq!(registry.find_slot_by_plate("CCC333", &vehicles), None);
    }

    #[test]
    fn test_find_slot_by_plate_ignores_absent_vehicle() {
        let not_present = Vehicle::new("AAA111", "Owner").unwrap();
        let vehicles = vec![not_present];
        let mut registry = SlotRegistry::new(1);
        registry.assign(SlotId(1), VehicleId(0)).unwrap();

        assert_eq!(registry.find_slot_by_plate("AAA111", &vehicles), None);
    }
}
