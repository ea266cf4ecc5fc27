//! Read-only aggregates over the all-time vehicle list
//!
//! Every query takes "now" explicitly and recomputes from scratch.
//! Time windows are exclusive: a vehicle must be strictly after the cutoff.

use crate::domain::vehicle::Vehicle;
use crate::services::fee_policy::FeePolicy;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Local midnight of the day containing `now`
pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(chrono::NaiveTime::MIN)
}

/// Vehicles that entered within the last hour
pub fn vehicles_in_last_hour(vehicles: &[Vehicle], now: NaiveDateTime) -> usize {
    count_entered_after(vehicles, now - Duration::hours(1))
}

/// Vehicles that entered since local midnight
pub fn vehicles_today(vehicles: &[Vehicle], now: NaiveDateTime) -> usize {
    count_entered_after(vehicles, start_of_day(now))
}

fn count_entered_after(vehicles: &[Vehicle], cutoff: NaiveDateTime) -> usize {
    vehicles.iter().filter(|v| v.entry_time().is_some_and(|t| t > cutoff)).count()
}

/// Mean stay in minutes over closed stays, 0.0 when there are none
pub fn average_stay_minutes(vehicles: &[Vehicle]) -> f64 {
    let stays: Vec<i64> = vehicles.iter().filter_map(Vehicle::stay_minutes).collect();
    if stays.is_empty() {
        return 0.0;
    }
    stays.iter().sum::<i64>() as f64 / stays.len() as f64
}

/// Fees of vehicles that exited since local midnight
pub fn daily_revenue(vehicles: &[Vehicle], now: NaiveDateTime, fees: &FeePolicy) -> u64 {
    revenue_after(vehicles, start_of_day(now), fees)
}

/// Fees of vehicles that exited within the last 7 days
pub fn weekly_revenue(vehicles: &[Vehicle], now: NaiveDateTime, fees: &FeePolicy) -> u64 {
    revenue_after(vehicles, now - Duration::days(7), fees)
}

fn revenue_after(vehicles: &[Vehicle], cutoff: NaiveDateTime, fees: &FeePolicy) -> u64 {
    vehicles
        .iter()
        .filter(|v| v.entry_time().is_some() && v.exit_time().is_some_and(|t| t > cutoff))
        .map(|v| fees.fee_for(v))
        .sum()
}

/// All aggregates at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub taken_at: NaiveDateTime,
    pub vehicles_last_hour: usize,
    pub vehicles_today: usize,
    pub average_stay_minutes: f64,
    pub daily_revenue: u64,
    pub weekly_revenue: u64,
    pub occupied_slots: usize,
    pub total_slots: usize,
}

impl StatisticsSnapshot {
    pub fn compute(
        vehicles: &[Vehicle],
        now: NaiveDateTime,
        fees: &FeePolicy,
        occupied_slots: usize,
        total_slots: usize,
    ) -> Self {
        Self {
            taken_at: now,
            vehicles_last_hour: vehicles_in_last_hour(vehicles, now),
            vehicles_today: vehicles_today(vehicles, now),
            average_stay_minutes: average_stay_minutes(vehicles),
            daily_revenue: daily_revenue(vehicles, now, fees),
            weekly_revenue: weekly_revenue(vehicles, now, fees),
            occupied_slots,
            total_slots,
        }
    }

    /// Average stay split into (hours, minutes)
    pub fn average_stay_hm(&self) -> (u64, u64) {
        let total = self.average_stay_minutes.max(0.0) as u64;
        (total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap().and_hms_opt(15, 0, 0).unwrap()
    }

    fn ago(minutes: i64) -> NaiveDateTime {
        now() - Duration::minutes(minutes)
    }

    fn stay(plate: &str, entry: Option<i64>, exit: Option<i64>) -> Vehicle {
        Vehicle::with_stay(plate, "Owner", entry.map(ago), exit.map(ago))
    }

    #[test]
    fn test_empty_list() {
        let fees = FeePolicy::default();
        assert_eq!(vehicles_in_last_hour(&[], now()), 0);
        assert_eq!(vehicles_today(&[], now()), 0);
        assert_eq!(average_stay_minutes(&[]), 0.0);
        assert_eq!(daily_revenue(&[], now(), &fees), 0);
        assert_eq!(weekly_revenue(&[], now(), &fees), 0);
    }

    #[test]
    fn test_counts_and_average() {
        // v1 parked 2h ago for one hour, v2 arrived 30 min ago and is still parked
        let vehicles = vec![stay("AAA111", Some(120), Some(60)), stay("BBB222", Some(30), None)];

        assert_eq!(vehicles_today(&vehicles, now()), 2);
        assert_eq!(vehicles_in_last_hour(&vehicles, now()), 1);
        assert_eq!(average_stay_minutes(&vehicles), 60.0);
    }

    #[test]
    fn test_average_without_exits_is_zero() {
        let vehicles = vec![stay("AAA111", Some(10), None), stay("BBB222", None, None)];
        assert_eq!(average_stay_minutes(&vehicles), 0.0);
    }

    #[test]
    fn test_average_over_several_stays() {
        let vehicles = vec![stay("AAA111", Some(100), Some(70)), stay("BBB222", Some(100), Some(10))];
        assert_eq!(average_stay_minutes(&vehicles), 60.0);
    }

    #[test]
    fn test_last_hour_cutoff_is_exclusive() {
        let vehicles = vec![stay("AAA111", Some(60), None), stay("BBB222", Some(59), None)];
        assert_eq!(vehicles_in_last_hour(&vehicles, now()), 1);
    }

    #[test]
    fn test_today_excludes_yesterday() {
        let vehicles = vec![
            stay("AAA111", Some(16 * 60), Some(14 * 60)), // entered 23:00 yesterday
            stay("BBB222", Some(14 * 60), None),          // entered 01:00 today
        ];
        assert_eq!(vehicles_today(&vehicles, now()), 1);
    }

    #[test]
    fn test_daily_and_weekly_revenue() {
        let fees = FeePolicy::default();
        let vehicles = vec![
            stay("AAA111", Some(180), Some(60)),                 // 2h today -> 10
            stay("BBB222", Some(3 * 24 * 60), Some(3 * 24 * 60 - 30)), // 3 days ago -> 5
            stay("CCC333", Some(9 * 24 * 60), Some(9 * 24 * 60 - 10)), // 9 days ago -> excluded
            stay("DDD444", Some(20), None),                      // still parked
        ];

        assert_eq!(daily_revenue(&vehicles, now(), &fees), 10);
        assert_eq!(weekly_revenue(&vehicles, now(), &fees), 15);
    }

    #[test]
    fn test_snapshot() {
        let fees = FeePolicy::default();
        let vehicles = vec![stay("AAA111", Some(150), Some(15)), stay("BBB222", Some(5), None)];

        let snapshot = StatisticsSnapshot::compute(&vehicles, now(), &fees, 1, 10);
        assert_eq!(snapshot.taken_at, now());
        assert_eq!(snapshot.vehicles_last_hour, 1);
        assert_eq!(snapshot.vehicles_today, 2);
        assert_eq!(snapshot.average_stay_minutes, 135.0);
        assert_eq!(snapshot.average_stay_hm(), (2, 15));
        assert_eq!(snapshot.daily_revenue, 15);
        assert_eq!(snapshot.weekly_revenue, 15);
        assert_eq!(snapshot.occupied_slots, 1);
    }
}
