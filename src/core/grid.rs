use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::round1;
use crate::model::attendance::AttendanceRecord;
use crate::model::status::status_glyph;
use crate::model::worker::Worker;

/// One worker's row in the monthly grid: one glyph cell per day of the
/// month, plus the derived presence summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridRow {
    pub name: String,
    pub section: String,
    pub department: String,
    pub shift: String,
    pub days: Vec<String>,
    pub present_days: u32,
    pub attendance_pct: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub rows: Vec<GridRow>,
}

/// Number of days in a calendar month, leap years included. Returns 0 for
/// an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Pivot one month of attendance into a worker × day presence matrix.
///
/// Only active workers get a row. Records are matched to rows by exact
/// worker name and the first matching row wins, so two active workers with
/// the same name share one row; names are not unique and this lookup keeps
/// the historical behavior instead of switching to IDs.
///
/// The result has no rows when there are no active workers or no attendance
/// records in the month.
pub fn monthly_grid(
    year: i32,
    month: u32,
    workers: &[Worker],
    records: &[AttendanceRecord],
) -> MonthlyGrid {
    let days = days_in_month(year, month);

    let mut grid = MonthlyGrid {
        year,
        month,
        days_in_month: days,
        rows: Vec::new(),
    };
    if days == 0 {
        return grid;
    }

    let monthly: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
        .collect();

    let mut rows: Vec<GridRow> = workers
        .iter()
        .filter(|w| w.is_active())
        .map(|w| GridRow {
            name: w.name.clone(),
            section: w.section.clone(),
            department: w.department.clone(),
            shift: w.shift.clone(),
            days: vec![String::new(); days as usize],
            present_days: 0,
            attendance_pct: 0.0,
        })
        .collect();

    if rows.is_empty() || monthly.is_empty() {
        return grid;
    }

    for record in monthly {
        if let Some(row) = rows.iter_mut().find(|row| row.name == record.worker_name) {
            row.days[record.date.day() as usize - 1] = status_glyph(&record.status);
        }
    }

    for row in &mut rows {
        row.present_days = row.days.iter().filter(|cell| *cell == "✓").count() as u32;
        row.attendance_pct = round1(row.present_days as f64 / days as f64 * 100.0);
    }

    grid.rows = rows;
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn worker(id: i64, name: &str, department: &str, active: &str) -> Worker {
        Worker {
            id,
            name: name.to_string(),
            section: "Liquid Section".to_string(),
            department: department.to_string(),
            shift: "Morning".to_string(),
            active: active.to_string(),
        }
    }

    fn record(id: i64, worker_id: i64, name: &str, date: &str, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            id,
            worker_id,
            worker_name: name.to_string(),
            date: date.parse().unwrap(),
            section: String::new(),
            department: String::new(),
            shift: String::new(),
            status: status.to_string(),
            timestamp: NaiveDateTime::parse_from_str("2024-03-05 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn month_lengths_respect_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn leap_february_has_twenty_nine_columns() {
        let workers = vec![worker(1, "Asha", "Mixing", "true")];
        let records = vec![record(1, 1, "Asha", "2024-02-01", "Present")];

        let grid = monthly_grid(2024, 2, &workers, &records);

        assert_eq!(grid.days_in_month, 29);
        assert_eq!(grid.rows[0].days.len(), 29);
    }

    #[test]
    fn glyphs_and_summary_columns() {
        let workers = vec![worker(1, "Asha", "Mixing", "true")];
        let records = vec![
            record(1, 1, "Asha", "2024-03-01", "Present"),
            record(2, 1, "Asha", "2024-03-02", "Absent"),
            record(3, 1, "Asha", "2024-03-03", "Late"),
            record(4, 1, "Asha", "2024-03-04", "Leave"),
            record(5, 1, "Asha", "2024-03-05", "Present"),
        ];

        let grid = monthly_grid(2024, 3, &workers, &records);
        let row = &grid.rows[0];

        assert_eq!(row.days[0], "✓");
        assert_eq!(row.days[1], "✗");
        assert_eq!(row.days[2], "L");
        assert_eq!(row.days[3], "L");
        assert_eq!(row.days[4], "✓");
        assert_eq!(row.days[5], "");
        assert_eq!(row.present_days, 2);
        // 2 present days over 31 days of March.
        assert_eq!(row.attendance_pct, 6.5);
    }

    #[test]
    fn inactive_workers_get_no_row() {
        let workers = vec![
            worker(1, "Asha", "Mixing", "true"),
            worker(2, "Rafi", "Filling", "false"),
        ];
        let records = vec![record(1, 1, "Asha", "2024-03-01", "Present")];

        let grid = monthly_grid(2024, 3, &workers, &records);

        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].name, "Asha");
    }

    #[test]
    fn records_outside_the_month_are_ignored() {
        let workers = vec![worker(1, "Asha", "Mixing", "true")];
        let records = vec![record(1, 1, "Asha", "2024-02-15", "Present")];

        let grid = monthly_grid(2024, 3, &workers, &records);

        assert!(grid.rows.is_empty());
    }

    #[test]
    fn empty_without_active_workers_or_records() {
        let grid = monthly_grid(2024, 3, &[], &[record(1, 1, "Asha", "2024-03-01", "Present")]);
        assert!(grid.rows.is_empty());

        let grid = monthly_grid(2024, 3, &[worker(1, "Asha", "Mixing", "true")], &[]);
        assert!(grid.rows.is_empty());
    }

    #[test]
    fn duplicate_names_collapse_onto_first_row() {
        // Two active workers named Sam in different departments: the grid
        // matches by name and the first row wins. Documented ambiguity, not
        // a bug to fix here.
        let workers = vec![
            worker(1, "Sam", "Mixing", "true"),
            worker(2, "Sam", "Packaging", "true"),
        ];
        let records = vec![record(1, 2, "Sam", "2024-03-01", "Present")];

        let grid = monthly_grid(2024, 3, &workers, &records);

        assert_eq!(grid.rows[0].department, "Mixing");
        assert_eq!(grid.rows[0].days[0], "✓");
        assert_eq!(grid.rows[1].department, "Packaging");
        assert_eq!(grid.rows[1].days[0], "");
    }
}
