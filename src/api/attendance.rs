use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::api::{store_err, DayQuery};
use crate::auth::auth::AuthUser;
use crate::core::reconcile::{reconcile, Submission};
use crate::core::report::{daily_summary, DailySummary};
use crate::model::attendance::AttendanceRecord;
use crate::model::status::AttendanceStatus;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendanceReq {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    /// Submitted statuses keyed by worker ID.
    pub entries: BTreeMap<i64, Submission>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    pub records: Vec<AttendanceRecord>,
    pub summary: DailySummary,
}

#[derive(Deserialize, ToSchema)]
pub struct StatusEdit {
    pub id: i64,
    pub status: AttendanceStatus,
}

pub(crate) fn filter_day(records: Vec<AttendanceRecord>, query: &DayQuery) -> Vec<AttendanceRecord> {
    records
        .into_iter()
        .filter(|r| r.date == query.date)
        .filter(|r| query.section.as_ref().map_or(true, |s| &r.section == s))
        .filter(|r| query.department.as_ref().map_or(true, |d| &r.department == d))
        .filter(|r| query.shift.as_ref().map_or(true, |s| &r.shift == s))
        .collect()
}

/// Submit a batch of statuses for one date. Existing records for the same
/// worker and date are updated, anything else is appended, then the whole
/// relation is written back.
#[utoipa::path(
    post,
    path = "/api/attendance/mark",
    request_body = MarkAttendanceReq,
    responses(
        (status = 200, description = "Attendance reconciled"),
        (status = 403, description = "Supervisor/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<MarkAttendanceReq>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;

    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let submitted = body.entries.len();
    let updated = reconcile(body.date, &body.entries, records, Local::now().naive_local());

    store::replace_attendance(pool.get_ref(), &updated)
        .await
        .map_err(store_err)?;

    info!(date = %body.date, submitted, "Attendance reconciled");
    Ok(HttpResponse::Ok().json(json!({"date": body.date, "submitted": submitted})))
}

/// Attendance register for one date, with optional section/department/shift
/// filters and the day's per-status breakdown.
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(DayQuery),
    responses((status = 200, description = "Register for the date", body = RegisterResponse)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn attendance_register(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<impl Responder> {
    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let records = filter_day(records, &query);
    let summary = daily_summary(&records);

    Ok(HttpResponse::Ok().json(RegisterResponse { records, summary }))
}

/// Register corrections: change the status of individual records by record
/// ID. IDs that no longer exist are ignored.
#[utoipa::path(
    put,
    path = "/api/attendance/statuses",
    request_body = [StatusEdit],
    responses(
        (status = 200, description = "Statuses updated"),
        (status = 403, description = "Supervisor/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn edit_statuses(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<Vec<StatusEdit>>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;

    let mut records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let now = Local::now().naive_local();
    let mut updated = 0usize;

    for edit in body.into_inner() {
        if let Some(record) = records.iter_mut().find(|r| r.id == edit.id) {
            record.status = edit.status.to_string();
            record.timestamp = now;
            updated += 1;
        }
    }

    if updated > 0 {
        store::replace_attendance(pool.get_ref(), &records)
            .await
            .map_err(store_err)?;
    }

    Ok(HttpResponse::Ok().json(json!({"updated": updated})))
}

#[utoipa::path(
    delete,
    path = "/api/attendance",
    responses(
        (status = 200, description = "All attendance cleared"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn clear_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    store::replace_attendance(pool.get_ref(), &[])
        .await
        .map_err(store_err)?;
    Ok(HttpResponse::Ok().json(json!({"message": "Attendance cleared"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(id: i64, date: &str, section: &str, shift: &str) -> AttendanceRecord {
        AttendanceRecord {
            id,
            worker_id: id,
            worker_name: format!("W{id}"),
            date: date.parse().unwrap(),
            section: section.to_string(),
            department: String::new(),
            shift: shift.to_string(),
            status: "Present".to_string(),
            timestamp: NaiveDateTime::parse_from_str("2024-03-05 09:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn filter_day_applies_date_and_optional_filters() {
        let records = vec![
            record(1, "2024-03-05", "Liquid Section", "Morning"),
            record(2, "2024-03-05", "Solid Section", "Morning"),
            record(3, "2024-03-06", "Liquid Section", "Morning"),
        ];

        let query = DayQuery {
            date: "2024-03-05".parse().unwrap(),
            section: Some("Liquid Section".to_string()),
            department: None,
            shift: None,
        };
        let out = filter_day(records.clone(), &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);

        let query = DayQuery {
            date: "2024-03-05".parse().unwrap(),
            section: None,
            department: None,
            shift: None,
        };
        assert_eq!(filter_day(records, &query).len(), 2);
    }
}
