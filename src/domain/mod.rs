//! Domain models - core parking types
//!
//! This module contains the canonical data types used throughout the system:
//! - `Vehicle` - an admitted vehicle and its stay timestamps
//! - `HistoryEntry` - an immutable ENTRY/EXIT event
//! - `LicensePlate`, `SlotId`, `HistoryAction` - validated identifiers and enums

pub mod history;
pub mod types;
pub mod vehicle;

pub use history::HistoryEntry;
pub use types::{HistoryAction, LicensePlate, SlotId, VehicleId};
pub use vehicle::{Vehicle, VehicleState};
