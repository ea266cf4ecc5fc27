//! Interactive operator menu
//!
//! Line-oriented loop over any `BufRead`/`Write` pair. Options:
//! 1 check in, 2 check out, 3 slot status, 4 full report, 5 statistics,
//! 6 history by date, 7 exit. End of input also exits.

use crate::io::report;
use crate::services::lot::ParkingLot;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const BANNER: &str = "=====================================";

pub struct Menu<'a, R, W> {
    lot: &'a mut ParkingLot,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(lot: &'a mut ParkingLot, input: R, output: W) -> Self {
        Self { lot, input, output }
    }

    /// Run until the operator chooses exit or input ends
    pub fn run(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "{BANNER}")?;
        writeln!(self.output, " Welcome to {} ", self.lot.name())?;
        writeln!(self.output, "{BANNER}")?;

        loop {
            self.print_options()?;
            let Some(choice) = self.prompt("\nEnter your choice (1-7): ")? else {
                break;
            };
            debug!(choice = %choice, "menu_choice");

            match choice.as_str() {
                "1" => self.add_vehicle()?,
                "2" => self.remove_vehicle()?,
                "3" => {
                    writeln!(self.output, "\n--- Parking Slot Status ---")?;
                    write!(self.output, "{}", report::status_report(&self.lot.status()))?;
                }
                "4" => {
                    writeln!(self.output, "\n--- Full Parking Report ---")?;
                    write!(self.output, "{}", report::full_report(self.lot))?;
                }
                "5" => {
                    writeln!(self.output, "\n--- Parking Statistics ---")?;
                    let text =
                        report::statistics_report(&self.lot.statistics(), self.lot.fees().currency());
                    write!(self.output, "{text}")?;
                }
                "6" => self.history_by_date()?,
                "7" => {
                    writeln!(self.output, "\nSystem shutting down. Goodbye!")?;
                    info!("menu_exit_requested");
                    return Ok(());
                }
                _ => writeln!(self.output, "\nInvalid choice. Please try again.")?,
            }
        }

        info!("menu_input_closed");
        Ok(())
    }

    fn print_options(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\nSelect an option:")?;
        writeln!(self.output, "1. Add vehicle")?;
        writeln!(self.output, "2. Remove vehicle")?;
        writeln!(self.output, "3. Show parking slot status")?;
        writeln!(self.output, "4. Show full parking report")?;
        writeln!(self.output, "5. Show parking statistics")?;
        writeln!(self.output, "6. Show history by date")?;
        writeln!(self.output, "7. Exit system")
    }

    /// Print `label` and read one trimmed line; None at end of input
    fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_vehicle(&mut self) -> std::io::Result<()> {
        let Some(plate) = self.prompt("Enter license plate: ")? else {
            return Ok(());
        };
        let Some(owner) = self.prompt("Enter owner name: ")? else {
            return Ok(());
        };

        match self.lot.check_in_plate(&plate, &owner) {
            Ok(receipt) => writeln!(self.output, "{}", report::check_in_message(&receipt)),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn remove_vehicle(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- Remove Vehicle ---")?;
        let Some(plate) = self.prompt("Enter license plate to remove: ")? else {
            return Ok(());
        };

        match self.lot.check_out(&plate) {
            Ok(receipt) => writeln!(self.output, "{}", report::check_out_message(&receipt)),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn history_by_date(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n--- History by Date ---")?;
        let Some(date) = self.prompt("Enter date (dd-mm-yyyy): ")? else {
            return Ok(());
        };

        match self.lot.query_history(&date) {
            Ok(entries) => write!(self.output, "{}", report::history_report(&date, &entries)),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::clock::ManualClock;
    use crate::services::fee_policy::FeePolicy;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use std::sync::Arc;

    fn lot() -> ParkingLot {
        let at = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap().and_hms_opt(9, 0, 0).unwrap();
        ParkingLot::new(2, FeePolicy::default(), Arc::new(ManualClock::new(at)))
    }

    fn run(lot: &mut ParkingLot, input: &str) -> String {
        let mut output = Vec::new();
        Menu::new(lot, Cursor::new(input.as_bytes()), &mut output).run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_check_in_and_status() {
        let mut lot = lot();
        let out = run(&mut lot, "1\nABC123\nJohn\n3\n7\n");

        assert!(out.contains("Vehicle ABC123 parked in slot 1"));
        assert!(out.contains("Slot 1 - ABC123"));
        assert!(out.contains("Summary: 1/2 slots occupied"));
        assert!(out.contains("Goodbye!"));
        assert_eq!(lot.occupied_count(), 1);
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let mut lot = lot();
        let out = run(&mut lot, "1\nAB\nJohn\n2\nZZZ999\n6\n2026-10-14\n9\n7\n");

        assert!(out.contains("Error: invalid vehicle input"));
        assert!(out.contains("Error: vehicle ZZZ999 not found in parking lot"));
        assert!(out.contains("must use the dd-mm-yyyy format"));
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_check_out_and_history() {
        let mut lot = lot();
        let out = run(&mut lot, "1\nABC123\nJohn\n2\nABC123\n6\n14-10-2026\n4\n5\n7\n");

        assert!(out.contains("Vehicle ABC123 left slot 1 after 0 minutes. Fee: 0 NIS"));
        assert!(out.contains("Records for 14-10-2026: 2"));
        assert!(out.contains("Total Vehicles Ever Parked: 1"));
        assert!(out.contains("Vehicles entered today: 1"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut lot = lot();
        let out = run(&mut lot, "1\nABC123\n");
        assert!(!out.contains("Goodbye!"));
        assert_eq!(lot.occupied_count(), 0);
    }
}
