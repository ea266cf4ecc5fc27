//! Plain-text renderings of lot state for the operator console

use crate::domain::history::HistoryEntry;
use crate::domain::types::format_timestamp;
use crate::services::lot::{CheckInReceipt, CheckOutReceipt, LotStatus, ParkingLot};
use crate::services::statistics::StatisticsSnapshot;
use std::fmt::Write;

const RULE: &str = "=====================================";

/// One line per slot plus an occupancy summary
pub fn status_report(status: &LotStatus) -> String {
    let mut out = String::new();
    for row in &status.slots {
        match &row.plate {
            Some(plate) => {
                let _ = writeln!(out, "Slot {} - {}", row.slot, plate);
            }
            None => {
                let _ = writeln!(out, "Slot {} - Empty", row.slot);
            }
        }
    }
    let _ = writeln!(out, "Summary: {}/{} slots occupied", status.occupied, status.total);
    let _ = writeln!(out, "Available slots: {}", status.available());
    out
}

/// Every vehicle ever admitted, with entry/exit times and presence
pub fn full_report(lot: &ParkingLot) -> String {
    let mut out = String::new();
    for vehicle in lot.all_vehicles() {
        let status = if vehicle.is_present() { "In Lot" } else { "Exited" };
        let _ = writeln!(
            out,
            "Vehicle: {} (Owner: {}), Entry: {}, Exit: {}, Status: {}",
            vehicle.plate(),
            vehicle.owner(),
            format_timestamp(vehicle.entry_time()),
            format_timestamp(vehicle.exit_time()),
            status
        );
    }
    let _ = writeln!(out, "Currently Parked: {} / {}", lot.occupied_count(), lot.total_slots());
    let _ = writeln!(out, "Total Vehicles Ever Parked: {}", lot.all_vehicles().len());
    out
}

pub fn statistics_report(stats: &StatisticsSnapshot, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Parking Statistics ===");
    let _ = writeln!(out, "Vehicles entered in the last hour: {}", stats.vehicles_last_hour);
    let _ = writeln!(out, "Vehicles entered today: {}", stats.vehicles_today);
    if stats.average_stay_minutes > 0.0 {
        let (hours, minutes) = stats.average_stay_hm();
        let _ = writeln!(out, "Average stay: {hours} hours and {minutes} minutes");
    } else {
        let _ = writeln!(out, "Average stay: no data available");
    }
    let _ = writeln!(out, "Daily revenue: {} {currency}", stats.daily_revenue);
    let _ = writeln!(out, "Weekly revenue: {} {currency}", stats.weekly_revenue);
    let _ = writeln!(out, "Occupancy: {}/{}", stats.occupied_slots, stats.total_slots);
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn history_report(date: &str, entries: &[&HistoryEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== History for Date: {date} ===");
    if entries.is_empty() {
        let _ = writeln!(out, "No data found for this date.");
        return out;
    }
    for entry in entries {
        let _ = write!(
            out,
            "Date: {}, License Plate: {}, Owner: {}, Action: {}",
            format_timestamp(Some(entry.timestamp)),
            entry.plate,
            entry.owner,
            entry.action.as_str()
        );
        if !entry.detail.is_empty() {
            let _ = write!(out, ", Details: {}", entry.detail);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Records for {date}: {}", entries.len());
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn check_in_message(receipt: &CheckInReceipt) -> String {
    format!(
        "Vehicle {} parked in slot {} at {}",
        receipt.plate,
        receipt.slot,
        format_timestamp(Some(receipt.entry_time))
    )
}

pub fn check_out_message(receipt: &CheckOutReceipt) -> String {
    format!(
        "Vehicle {} left slot {} after {} minutes. Fee: {} {} ({} billed hours)",
        receipt.plate,
        receipt.slot,
        receipt.minutes,
        receipt.fee,
        receipt.currency,
        receipt.billed_hours
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::clock::ManualClock;
    use crate::services::fee_policy::FeePolicy;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn lot_with_one_exit() -> ParkingLot {
        let clock = ManualClock::new(start());
        let mut lot = ParkingLot::new(3, FeePolicy::default(), Arc::new(clock.clone()));
        lot.check_in_plate("AAA111", "Alice").unwrap();
        lot.check_in_plate("BBB222", "Bob").unwrap();
        clock.advance_minutes(75);
        lot.check_out("AAA111").unwrap();
        lot
    }

    #[test]
    fn test_status_report() {
        let lot = lot_with_one_exit();
        let text = status_report(&lot.status());
        assert_eq!(
            text,
            "Slot 1 - Empty\nSlot 2 - BBB222\nSlot 3 - Empty\nSummary: 1/3 slots occupied\nAvailable slots: 2\n"
        );
    }

    #[test]
    fn test_full_report() {
        let lot = lot_with_one_exit();
        let text = full_report(&lot);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Vehicle: AAA111 (Owner: Alice), Entry: 14-10-2026 09:00:00, Exit: 14-10-2026 10:15:00, Status: Exited"
        );
        assert_eq!(
            lines[1],
            "Vehicle: BBB222 (Owner: Bob), Entry: 14-10-2026 09:00:00, Exit: —, Status: In Lot"
        );
        assert_eq!(lines[2], "Currently Parked: 1 / 3");
        assert_eq!(lines[3], "Total Vehicles Ever Parked: 2");
    }

    #[test]
    fn test_statistics_report() {
        let lot = lot_with_one_exit();
        let text = statistics_report(&lot.statistics(), "NIS");
        assert!(text.contains("Vehicles entered today: 2"));
        assert!(text.contains("Average stay: 1 hours and 15 minutes"));
        assert!(text.contains("Daily revenue: 10 NIS"));
        assert!(text.contains("Occupancy: 1/3"));
    }

    #[test]
    fn test_statistics_report_without_stays() {
        let lot = ParkingLot::new(2, FeePolicy::default(), Arc::new(ManualClock::new(start())));
        let text = statistics_report(&lot.statistics(), "NIS");
        assert!(text.contains("Average stay: no data available"));
    }

    #[test]
    fn test_history_report() {
        let lot = lot_with_one_exit();
        let entries = lot.query_history("14-10-2026").unwrap();
        let text = history_report("14-10-2026", &entries);

        assert!(text.contains(
            "Date: 14-10-2026 10:15:00, License Plate: AAA111, Owner: Alice, Action: EXIT, Details: Exited parking lot - Fee: 10 NIS"
        ));
        assert!(text.contains("Records for 14-10-2026: 3"));
        assert_eq!(history_report("01-01-2026", &[]).lines().nth(1), Some("No data found for this date."));
    }

    #[test]
    fn test_receipt_messages() {
        let clock = ManualClock::new(start());
        let mut lot = ParkingLot::new(1, FeePolicy::default(), Arc::new(clock.clone()));
        let receipt = lot.check_in_plate("ABC123", "John").unwrap();
        assert_eq!(check_in_message(&receipt), "Vehicle ABC123 parked in slot 1 at 14-10-2026 09:00:00");

        clock.advance_minutes(20);
        let receipt = lot.check_out("ABC123").unwrap();
        assert_eq!(
            check_out_message(&receipt),
            "Vehicle ABC123 left slot 1 after 20 minutes. Fee: 5 NIS (1 billed hours)"
        );
    }
}
