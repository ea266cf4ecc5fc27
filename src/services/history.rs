//! Append-only parking history

use crate::domain::history::HistoryEntry;
use crate::domain::types::parse_date;
use crate::domain::vehicle::Vehicle;
use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

/// Chronological log of ENTRY/EXIT events
#[derive(Debug, Default)]
pub struct ParkingHistory {
    entries: Vec<HistoryEntry>,
}

impl ParkingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_entry(&mut self, vehicle: &Vehicle, at: NaiveDateTime) {
        self.push(HistoryEntry::entry(vehicle, at))
    }

    pub fn record_exit(
        &mut self,
        vehicle: &Vehicle,
        at: NaiveDateTime,
        fee: u64,
        currency: &str,
    ) {
        self.push(HistoryEntry::exit(vehicle, at, fee, currency))
    }

    fn push(&mut self, entry: HistoryEntry) {
        debug!(
            id = %entry.id,
            plate = %entry.plate,
            action = %entry.action.as_str(),
            "history_recorded"
        );
        self.entries.push(entry);
    }

    /// All entries in insertion (chronological) order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose timestamp falls on the given calendar date
    pub fn on_date(&self, date: NaiveDate) -> Vec<&HistoryEntry> {
        self.entries.iter().filter(|e| e.timestamp.date() == date).collect()
    }

    /// Entries for a dd-mm-yyyy date string
    pub fn by_date(&self, date: &str) -> Result<Vec<&HistoryEntry>, ValidationError> {
        Ok(self.on_date(parse_date(date)?))
    }
}
