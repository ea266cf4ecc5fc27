//! Shared types for the parking core

use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format for timestamps (e.g. "14-10-2026 09:30:00")
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Calendar date format used by history queries
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Placeholder shown for a timestamp that has not been set
pub const NO_TIMESTAMP: &str = "—";

/// Newtype wrapper for slot IDs (1..=N, assigned at lot creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a vehicle record in the lot's all-time vehicle list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct VehicleId(pub usize);

/// Validated license plate: 5-8 ASCII letters or digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LicensePlate(String);

impl LicensePlate {
    pub const MIN_LEN: usize = 5;
    pub const MAX_LEN: usize = 8;

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let len_ok = (Self::MIN_LEN..=Self::MAX_LEN).contains(&raw.len());
        if !len_ok || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidPlate(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LicensePlate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Validate an owner name: one or more ASCII letters or whitespace characters
pub fn validate_owner(raw: &str) -> Result<String, ValidationError> {
    // Whitespace set matches a plain `\s` class: space, \t, \n, \x0B, \x0C, \r
    let allowed = |c: char| {
        c.is_ascii_alphabetic() || matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
    };
    if raw.is_empty() || !raw.chars().all(allowed) {
        return Err(ValidationError::InvalidOwner(raw.to_string()));
    }
    Ok(raw.to_string())
}

/// Parse a dd-mm-yyyy calendar date
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Format an optional timestamp for display
pub fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    match ts {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => NO_TIMESTAMP.to_string(),
    }
}

/// Kind of history event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    Entry,
    Exit,
}

impl HistoryAction {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Entry => "ENTRY",
            HistoryAction::Exit => "EXIT",
        }
    }
}
