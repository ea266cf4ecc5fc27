//! Services - parking business logic and state management
//!
//! This module contains the core business logic services:
//! - `lot` - Lot coordinator (check-in/check-out, queries)
//! - `slot_registry` - Fixed-size slot table
//! - `fee_policy` - Hourly fee calculation
//! - `history` - Append-only ENTRY/EXIT log
//! - `statistics` - Read-only aggregates
//! - `observers` - Occupancy change notification
//! - `shared` - Thread-safe lot handle

pub mod fee_policy;
pub mod history;
pub mod lot;
pub mod observers;
pub mod shared;
pub mod slot_registry;
pub mod statistics;

// Re-export commonly used types
pub use fee_policy::{FeeBreakdown, FeePolicy};
pub use history::ParkingHistory;
pub use lot::{CheckInReceipt, CheckOutReceipt, LotStatus, ParkingLot, SlotStatus};
pub use observers::{OccupiedSlot, ParkingObserver, StatusLogger};
pub use shared::SharedParkingLot;
pub use slot_registry::{ParkingSlot, SlotRegistry};
pub use statistics::StatisticsSnapshot;
