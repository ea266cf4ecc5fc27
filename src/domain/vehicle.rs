//! Vehicle record: identity, stay timestamps and presence flag

use crate::domain::types::{validate_owner, LicensePlate};
use crate::error::ValidationError;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Where a vehicle record is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleState {
    NotParked,
    Parked,
    Exited,
}

/// One admitted (or about to be admitted) vehicle
///
/// Equality is by license plate only.
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    plate: LicensePlate,
    owner: String,
    entry_time: Option<NaiveDateTime>,
    exit_time: Option<NaiveDateTime>,
    present: bool,
}

impl Vehicle {
    /// Create a vehicle from raw input, validating plate and owner.
    ///
    /// # Example
    ///
    /// ```
    /// use parking_manager::domain::vehicle::{Vehicle, VehicleState};
    ///
    /// let vehicle = Vehicle::new("ABC123", "John").unwrap();
    /// assert_eq!(vehicle.plate().as_str(), "ABC123");
    /// assert_eq!(vehicle.state(), VehicleState::NotParked);
    /// assert!(Vehicle::new("AB", "John").is_err());
    /// ```
    pub fn new(plate: &str, owner: &str) -> Result<Self, ValidationError> {
        let plate = LicensePlate::parse(plate)?;
        let owner = validate_owner(owner)?;
        Ok(Self { plate, owner, entry_time: None, exit_time: None, present: false })
    }

    pub fn plate(&self) -> &LicensePlate {
        &self.plate
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn entry_time(&self) -> Option<NaiveDateTime> {
        self.entry_time
    }

    pub fn exit_time(&self) -> Option<NaiveDateTime> {
        self.exit_time
    }

    /// True between check-in and check-out
    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn state(&self) -> VehicleState {
        match (self.present, self.exit_time) {
            (true, _) => VehicleState::Parked,
            (false, Some(_)) => VehicleState::Exited,
            (false, None) => VehicleState::NotParked,
        }
    }

    /// Whole minutes parked, truncated; None until the stay is closed
    pub fn stay_minutes(&self) -> Option<i64> {
        match (self.entry_time, self.exit_time) {
            (Some(entry), Some(exit)) => Some((exit - entry).num_minutes()),
            _ => None,
        }
    }

    /// Record arrival: sets the entry time and marks the vehicle present
    pub(crate) fn mark_entered(&mut self, at: NaiveDateTime) {
        self.entry_time = Some(at);
        self.exit_time = None;
        self.present = true;
    }

    /// Record departure: sets the exit time and clears presence
    pub(crate) fn mark_exited(&mut self, at: NaiveDateTime) {
        self.exit_time = Some(at);
        self.present = false;
    }

    /// Build a vehicle with a completed or open stay, for statistics tests
    #[cfg(test)]
    pub(crate) fn with_stay(
        plate: &str,
        owner: &str,
        entry: Option<NaiveDateTime>,
        exit: Option<NaiveDateTime>,
    ) -> Self {
        let mut vehicle = Self::new(plate, owner).unwrap();
        if let Some(entry) = entry {
            vehicle.mark_entered(entry);
        }
        if let Some(exit) = exit {
            vehicle.mark_exited(exit);
        }
        vehicle
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.plate == other.plate
    }
}

impl Eq for Vehicle {}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.present { "In Lot" } else { "Not in Lot" };
        write!(f, "Vehicle[License: {}, Owner: {}, Status: {}]", self.plate, self.owner, status)
    }
}
