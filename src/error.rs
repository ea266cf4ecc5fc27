//! Error types for the parking core
//!
//! - `ValidationError` - bad plate, owner or date input
//! - `SlotError` - slot registry precondition breaches
//! - `LotError` - check-in/check-out failures reported to the caller
//!
//! Every variant is a recoverable condition. A failed operation leaves the lot unchanged.

use crate::domain::types::SlotId;
use thiserror::Error;

/// Input validation failures at the vehicle/query boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("license plate '{0}' must contain only letters and numbers (5-8 characters)")]
    InvalidPlate(String),

    #[error("owner name '{0}' must contain only letters and spaces")]
    InvalidOwner(String),

    #[error("date '{0}' must use the dd-mm-yyyy format")]
    InvalidDate(String),
}

/// Slot registry precondition breaches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("slot {0} is already occupied")]
    Occupied(SlotId),

    #[error("slot {0} is not occupied")]
    Vacant(SlotId),

    #[error("slot {0} does not exist")]
    Unknown(SlotId),
}

/// Check-in/check-out failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    #[error("invalid vehicle input: {0}")]
    InvalidVehicleInput(#[from] ValidationError),

    /// Plate already occupies a slot
    #[error("vehicle {plate} is already parked in slot {slot}")]
    DuplicateParking { plate: String, slot: SlotId },

    #[error("parking lot is full ({total_slots} slots occupied)")]
    LotFull { total_slots: usize },

    #[error("vehicle {0} not found in parking lot")]
    VehicleNotFound(String),

    #[error("slot registry error: {0}")]
    Slot(#[from] SlotError),
}

impl LotError {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            LotError::InvalidVehicleInput(_) => "invalid_vehicle_input",
            LotError::DuplicateParking { .. } => "duplicate_parking",
            LotError::LotFull { .. } => "lot_full",
            LotError::VehicleNotFound(_) => "vehicle_not_found",
            LotError::Slot(_) => "slot_error",
        }
    }
}

pub type LotResult<T> = Result<T, LotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LotError::DuplicateParking { plate: "ABC123".to_string(), slot: SlotId(3) };
        assert_eq!(err.to_string(), "vehicle ABC123 is already parked in slot 3");

        let err = LotError::LotFull { total_slots: 10 };
        assert_eq!(err.to_string(), "parking lot is full (10 slots occupied)");

        let err = LotError::VehicleNotFound("ZZZ999".to_string());
        assert_eq!(err.to_string(), "vehicle ZZZ999 not found in parking lot");
    }

    #[test]
    fn test_validation_converts_to_lot_error() {
        let err: LotError = ValidationError::InvalidPlate("AB".to_string()).into();
        assert!(matches!(err, LotError::InvalidVehicleInput(ValidationError::InvalidPlate(_))));
        assert_eq!(err.kind(), "invalid_vehicle_input");
    }

    #[test]
    fn test_slot_error_converts_to_lot_error() {
        let err: LotError = SlotError::Occupied(SlotId(1)).into();
        assert_eq!(err.to_string(), "slot registry error: slot 1 is already occupied");
        assert_eq!(err.kind(), "slot_error");
    }
}
