//! History entry: one immutable ENTRY or EXIT event

use crate::domain::types::HistoryAction;
use crate::domain::vehicle::Vehicle;
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// Generate a new UUIDv7 (time-sortable)
pub fn new_uuid_v7() -> String {
    Uuid::now_v7().to_string()
}

/// A single recorded lot event
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub plate: String,
    pub owner: String,
    pub timestamp: NaiveDateTime,
    pub action: HistoryAction,
    pub detail: String,
    /// Fee charged, EXIT entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
}

impl HistoryEntry {
    /// ENTRY event stamped with the vehicle's entry time
    pub fn entry(vehicle: &Vehicle, timestamp: NaiveDateTime) -> Self {
        Self {
            id: new_uuid_v7(),
            plate: vehicle.plate().to_string(),
            owner: vehicle.owner().to_string(),
            timestamp,
            action: HistoryAction::Entry,
            detail: "Entered parking lot".to_string(),
            fee: None,
        }
    }

    /// EXIT event stamped with the vehicle's exit time, carrying the fee
    pub fn exit(vehicle: &Vehicle, timestamp: NaiveDateTime, fee: u64, currency: &str) -> Self {
        Self {
            id: new_uuid_v7(),
            plate: vehicle.plate().to_string(),
            owner: vehicle.owner().to_string(),
            timestamp,
            action: HistoryAction::Exit,
            detail: format!("Exited parking lot - Fee: {fee} {currency}"),
            fee: Some(fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap().and_hms_opt(9, 15, 0).unwrap()
    }

    #[test]
    fn test_entry_record() {
        let vehicle = Vehicle::new("ABC123", "John").unwrap();
        let entry = HistoryEntry::entry(&vehicle, ts());

        assert_eq!(entry.plate, "ABC123");
        assert_eq!(entry.owner, "John");
        assert_eq!(entry.timestamp, ts());
        assert_eq!(entry.action, HistoryAction::Entry);
        assert_eq!(entry.detail, "Entered parking lot");
        assert!(entry.fee.is_none());
    }

    #[test]
    fn test_exit_record_detail_contains_fee() {
        let vehicle = Vehicle::new("ABC123", "John").unwrap();
        let exit = HistoryEntry::exit(&vehicle, ts(), 15, "NIS");

        assert_eq!(exit.action, HistoryAction::Exit);
        assert_eq!(exit.detail, "Exited parking lot - Fee: 15 NIS");
        assert_eq!(exit.fee, Some(15));
    }

    #[test]
    fn test_ids_are_unique() {
        let vehicle = Vehicle::new("ABC123", "John").unwrap();
        let a = HistoryEntry::entry(&vehicle, ts());
        let b = HistoryEntry::entry(&vehicle, ts());
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 36);
    }

    #[test]
    fn test_serialized_shape() {
        let vehicle = Vehicle::new("ABC123", "John").unwrap();
        let parsed = serde_json::to_value(HistoryEntry::exit(&vehicle, ts(), 10, "NIS")).unwrap();

        assert_eq!(parsed["plate"], "ABC123");
        assert_eq!(parsed["action"], "EXIT");
        assert_eq!(parsed["fee"], 10);
        assert_eq!(parsed["timestamp"], "2026-10-14T09:15:00");
    }
}
