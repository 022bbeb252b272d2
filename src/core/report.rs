use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::round1;
use crate::model::attendance::AttendanceRecord;
use crate::model::worker::Worker;

/// Monthly per-worker counts plus the worker's current assignment.
///
/// Section/department/shift come from a left join against the current
/// workers relation by name, so a transferred worker shows today's
/// assignment, not the one in force when the records were written.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkerMonthly {
    pub worker_name: String,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub leave: u32,
    pub total: u32,
    pub attendance_pct: f64,
    pub section: String,
    pub department: String,
    pub shift: String,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct StatusTotals {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub leave: u32,
}

impl StatusTotals {
    fn tally(&mut self, status: &str) {
        self.total += 1;
        match status {
            "Present" => self.present += 1,
            "Absent" => self.absent += 1,
            "Late" => self.late += 1,
            "Leave" => self.leave += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<WorkerMonthly>,
    pub totals: StatusTotals,
}

/// Per-status counts and percentages for a single day's records.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailySummary {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub leave: u32,
    pub present_pct: f64,
    pub absent_pct: f64,
    pub late_pct: f64,
    pub leave_pct: f64,
}

/// Group one month of attendance by worker name and count statuses.
///
/// Rows come out sorted by worker name. Workers without records in the
/// period do not appear; an empty month yields an empty report.
pub fn monthly_report(
    year: i32,
    month: u32,
    records: &[AttendanceRecord],
    workers: &[Worker],
) -> MonthlyReport {
    let mut groups: BTreeMap<&str, StatusTotals> = BTreeMap::new();
    let mut totals = StatusTotals::default();

    for record in records
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
    {
        groups
            .entry(record.worker_name.as_str())
            .or_default()
            .tally(&record.status);
        totals.tally(&record.status);
    }

    let rows = groups
        .into_iter()
        .map(|(name, counts)| {
            let current = workers.iter().find(|w| w.name == name);
            WorkerMonthly {
                worker_name: name.to_string(),
                present: counts.present,
                absent: counts.absent,
                late: counts.late,
                leave: counts.leave,
                total: counts.total,
                attendance_pct: round1(counts.present as f64 / counts.total as f64 * 100.0),
                section: current.map(|w| w.section.clone()).unwrap_or_default(),
                department: current.map(|w| w.department.clone()).unwrap_or_default(),
                shift: current.map(|w| w.shift.clone()).unwrap_or_default(),
            }
        })
        .collect();

    MonthlyReport {
        year,
        month,
        rows,
        totals,
    }
}

/// Status breakdown of an already-filtered day of records.
pub fn daily_summary(records: &[AttendanceRecord]) -> DailySummary {
    let mut counts = StatusTotals::default();
    for record in records {
        counts.tally(&record.status);
    }

    let pct = |n: u32| {
        if counts.total == 0 {
            0.0
        } else {
            round1(n as f64 / counts.total as f64 * 100.0)
        }
    };

    DailySummary {
        total: counts.total,
        present: counts.present,
        absent: counts.absent,
        late: counts.late,
        leave: counts.leave,
        present_pct: pct(counts.present),
        absent_pct: pct(counts.absent),
        late_pct: pct(counts.late),
        leave_pct: pct(counts.leave),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(id: i64, name: &str, date: &str, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            id,
            worker_id: id,
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

    fn worker(name: &str, section: &str) -> Worker {
        Worker {
            id: 1,
            name: name.to_string(),
            section: section.to_string(),
            department: "Mixing".to_string(),
            shift: "Morning".to_string(),
            active: "true".to_string(),
        }
    }

    #[test]
    fn counts_sum_to_group_total() {
        let records = vec![
            record(1, "Asha", "2024-03-01", "Present"),
            record(2, "Asha", "2024-03-02", "Absent"),
            record(3, "Asha", "2024-03-03", "Late"),
            record(4, "Asha", "2024-03-04", "Leave"),
            record(5, "Rafi", "2024-03-01", "Present"),
        ];

        let report = monthly_report(2024, 3, &records, &[]);

        for row in &report.rows {
            assert_eq!(row.present + row.absent + row.late + row.leave, row.total);
        }
        let group_sum: u32 = report.rows.iter().map(|r| r.total).sum();
        assert_eq!(group_sum, report.totals.total);
        assert_eq!(report.totals.total, 5);
    }

    #[test]
    fn attendance_percentage_uses_group_total() {
        let records = vec![
            record(1, "Asha", "2024-03-01", "Present"),
            record(2, "Asha", "2024-03-02", "Present"),
            record(3, "Asha", "2024-03-03", "Absent"),
        ];

        let report = monthly_report(2024, 3, &records, &[]);

        assert_eq!(report.rows[0].attendance_pct, 66.7);
    }

    #[test]
    fn joins_current_assignment_by_name() {
        let records = vec![record(1, "Asha", "2024-03-01", "Present")];
        let workers = vec![worker("Asha", "Solid Section")];

        let report = monthly_report(2024, 3, &records, &workers);

        assert_eq!(report.rows[0].section, "Solid Section");
        assert_eq!(report.rows[0].department, "Mixing");
    }

    #[test]
    fn missing_worker_leaves_assignment_blank() {
        let records = vec![record(1, "Ghost", "2024-03-01", "Present")];

        let report = monthly_report(2024, 3, &records, &[]);

        assert_eq!(report.rows[0].section, "");
        assert_eq!(report.rows[0].total, 1);
    }

    #[test]
    fn other_months_are_excluded() {
        let records = vec![
            record(1, "Asha", "2024-03-01", "Present"),
            record(2, "Asha", "2024-04-01", "Present"),
            record(3, "Asha", "2023-03-01", "Present"),
        ];

        let report = monthly_report(2024, 3, &records, &[]);

        assert_eq!(report.rows[0].total, 1);
        assert_eq!(report.totals.total, 1);
    }

    #[test]
    fn empty_month_yields_empty_report() {
        let report = monthly_report(2024, 3, &[], &[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.totals.total, 0);
    }

    #[test]
    fn daily_summary_counts_and_percentages() {
        let records = vec![
            record(1, "Asha", "2024-03-01", "Present"),
            record(2, "Rafi", "2024-03-01", "Present"),
            record(3, "Mina", "2024-03-01", "Absent"),
            record(4, "Sami", "2024-03-01", "Late"),
        ];

        let summary = daily_summary(&records);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.present_pct, 50.0);
        assert_eq!(summary.absent_pct, 25.0);
        assert_eq!(summary.late_pct, 25.0);
        assert_eq!(summary.leave_pct, 0.0);
    }

    #[test]
    fn daily_summary_of_nothing_is_all_zero() {
        let summary = daily_summary(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.present_pct, 0.0);
    }
}
