use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceRecord;
use crate::model::status::AttendanceStatus;

/// A submitted status for one worker, with the snapshot fields that get
/// denormalized onto a freshly created record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Submission {
    pub name: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub shift: String,
}

/// Merge a batch of (worker, status) submissions for one date into the
/// attendance relation.
///
/// A record matching (worker_id, date) is updated in place: only its status
/// and timestamp change. Anything else becomes a new record with the next
/// free ID (max + 1, or 1 on an empty relation). Submissions are keyed by
/// worker ID in a BTreeMap so ID assignment is deterministic.
///
/// Worker IDs are not checked against the workers relation; a submission for
/// an unknown worker is stored as-is. The caller persists the returned rows
/// with a wholesale replace, which makes this a single-writer operation: two
/// concurrent reconciliations can allocate the same ID and the later replace
/// wins.
pub fn reconcile(
    date: NaiveDate,
    submissions: &BTreeMap<i64, Submission>,
    mut records: Vec<AttendanceRecord>,
    now: NaiveDateTime,
) -> Vec<AttendanceRecord> {
    let mut next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

    for (&worker_id, sub) in submissions {
        match records
            .iter_mut()
            .find(|r| r.worker_id == worker_id && r.date == date)
        {
            Some(existing) => {
                existing.status = sub.status.to_string();
                existing.timestamp = now;
            }
            None => {
                records.push(AttendanceRecord {
                    id: next_id,
                    worker_id,
                    worker_name: sub.name.clone(),
                    date,
                    section: sub.section.clone(),
                    department: sub.department.clone(),
                    shift: sub.shift.clone(),
                    status: sub.status.to_string(),
                    timestamp: now,
                });
                next_id += 1;
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, status: AttendanceStatus) -> Submission {
        Submission {
            name: name.to_string(),
            status,
            section: "Liquid Section".to_string(),
            department: "Mixing".to_string(),
            shift: "Morning".to_string(),
        }
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn first_submission_creates_record_with_id_one() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut subs = BTreeMap::new();
        subs.insert(7, submission("Asha", AttendanceStatus::Present));

        let out = reconcile(date, &subs, Vec::new(), at(9));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[0].worker_id, 7);
        assert_eq!(out[0].worker_name, "Asha");
        assert_eq!(out[0].date, date);
        assert_eq!(out[0].status, "Present");
    }

    #[test]
    fn resubmission_updates_in_place() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut subs = BTreeMap::new();
        subs.insert(7, submission("Asha", AttendanceStatus::Present));
        let out = reconcile(date, &subs, Vec::new(), at(9));

        let mut subs = BTreeMap::new();
        subs.insert(7, submission("Asha", AttendanceStatus::Late));
        let out = reconcile(date, &subs, out, at(10));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
        assert_eq!(out[0].status, "Late");
        assert_eq!(out[0].timestamp, at(10));
    }

    #[test]
    fn new_ids_continue_from_current_maximum() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let existing = vec![AttendanceRecord {
            id: 41,
            worker_id: 1,
            worker_name: "Rafi".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            section: String::new(),
            department: String::new(),
            shift: String::new(),
            status: "Present".to_string(),
            timestamp: at(9),
        }];

        let mut subs = BTreeMap::new();
        subs.insert(1, submission("Rafi", AttendanceStatus::Present));
        subs.insert(2, submission("Mina", AttendanceStatus::Absent));
        let out = reconcile(date, &subs, existing, at(9));

        // Both submissions are for a new date, so both append.
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].id, 42);
        assert_eq!(out[2].id, 43);
    }

    #[test]
    fn same_worker_on_other_dates_is_untouched() {
        let mut subs = BTreeMap::new();
        subs.insert(7, submission("Asha", AttendanceStatus::Present));
        let out = reconcile(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), &subs, Vec::new(), at(9));

        let mut subs = BTreeMap::new();
        subs.insert(7, submission("Asha", AttendanceStatus::Leave));
        let out = reconcile(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(), &subs, out, at(9));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].status, "Present");
        assert_eq!(out[1].status, "Leave");
    }

    #[test]
    fn unknown_worker_ids_are_accepted_as_is() {
        // No referential check against the workers relation.
        let mut subs = BTreeMap::new();
        subs.insert(9999, submission("Ghost", AttendanceStatus::Present));
        let out = reconcile(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), &subs, Vec::new(), at(9));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].worker_id, 9999);
    }

    #[test]
    fn mixed_batch_updates_and_appends() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut subs = BTreeMap::new();
        subs.insert(1, submission("Rafi", AttendanceStatus::Present));
        let out = reconcile(date, &subs, Vec::new(), at(9));

        let mut subs = BTreeMap::new();
        subs.insert(1, submission("Rafi", AttendanceStatus::Absent));
        subs.insert(2, submission("Mina", AttendanceStatus::Present));
        let out = reconcile(date, &subs, out, at(11));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].status, "Absent");
        assert_eq!(out[0].timestamp, at(11));
        assert_eq!(out[1].id, 2);
        assert_eq!(out[1].worker_name, "Mina");
    }
}
