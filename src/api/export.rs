//! CSV downloads of the report and register tables, row-for-row identical
//! to the JSON responses. Pure serialization; no logic of its own.

use actix_web::error::ErrorInternalServerError;
use actix_web::{web, HttpResponse, Responder};
use sqlx::SqlitePool;
use tracing::error;

use crate::api::attendance::filter_day;
use crate::api::{store_err, DayQuery, MonthQuery};
use crate::auth::auth::AuthUser;
use crate::core::grid::monthly_grid;
use crate::core::report::monthly_report;
use crate::store;

fn csv_error(e: impl std::fmt::Display) -> actix_web::Error {
    error!(error = %e, "CSV serialization failed");
    ErrorInternalServerError("Export error")
}

fn csv_response(filename: &str, writer: csv::Writer<Vec<u8>>) -> actix_web::Result<HttpResponse> {
    let bytes = writer.into_inner().map_err(csv_error)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(bytes))
}

#[utoipa::path(
    get,
    path = "/api/export/attendance",
    params(DayQuery),
    responses((status = 200, description = "Attendance register as CSV")),
    security(("bearer_auth" = [])),
    tag = "Export"
)]
pub async fn attendance_csv(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<impl Responder> {
    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let records = filter_day(records, &query);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "ID", "Worker_ID", "Worker_Name", "Date", "Section", "Department", "Shift", "Status",
            "Timestamp",
        ])
        .map_err(csv_error)?;
    for r in &records {
        writer
            .write_record([
                r.id.to_string(),
                r.worker_id.to_string(),
                r.worker_name.clone(),
                r.date.to_string(),
                r.section.clone(),
                r.department.clone(),
                r.shift.clone(),
                r.status.clone(),
                r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])
            .map_err(csv_error)?;
    }

    csv_response(&format!("attendance_{}.csv", query.date), writer)
}

#[utoipa::path(
    get,
    path = "/api/export/monthly",
    params(MonthQuery),
    responses((status = 200, description = "Monthly report as CSV"), (status = 403, description = "HR/Admin only")),
    security(("bearer_auth" = [])),
    tag = "Export"
)]
pub async fn monthly_csv(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let report = monthly_report(query.year, query.month, &records, &workers);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Worker_Name", "Present", "Absent", "Late", "Leave", "Total", "Attendance %",
            "Section", "Department", "Shift",
        ])
        .map_err(csv_error)?;
    for row in &report.rows {
        writer
            .write_record([
                row.worker_name.clone(),
                row.present.to_string(),
                row.absent.to_string(),
                row.late.to_string(),
                row.leave.to_string(),
                row.total.to_string(),
                row.attendance_pct.to_string(),
                row.section.clone(),
                row.department.clone(),
                row.shift.clone(),
            ])
            .map_err(csv_error)?;
    }

    csv_response(
        &format!("monthly_attendance_{}_{}.csv", query.year, query.month),
        writer,
    )
}

#[utoipa::path(
    get,
    path = "/api/export/grid",
    params(MonthQuery),
    responses((status = 200, description = "Monthly grid as CSV")),
    security(("bearer_auth" = [])),
    tag = "Export"
)]
pub async fn grid_csv(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let grid = monthly_grid(query.year, query.month, &workers, &records);

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![
        "Name".to_string(),
        "Section".to_string(),
        "Department".to_string(),
        "Shift".to_string(),
    ];
    header.extend((1..=grid.days_in_month).map(|d| d.to_string()));
    header.push("Present Days".to_string());
    header.push("Attendance %".to_string());
    writer.write_record(&header).map_err(csv_error)?;

    for row in &grid.rows {
        let mut record = vec![
            row.name.clone(),
            row.section.clone(),
            row.department.clone(),
            row.shift.clone(),
        ];
        record.extend(row.days.iter().cloned());
        record.push(row.present_days.to_string());
        record.push(row.attendance_pct.to_string());
        writer.write_record(&record).map_err(csv_error)?;
    }

    csv_response(
        &format!("attendance_grid_{}_{}.csv", query.year, query.month),
        writer,
    )
}

/// Directory of active workers.
#[utoipa::path(
    get,
    path = "/api/export/workers",
    responses((status = 200, description = "Active worker directory as CSV")),
    security(("bearer_auth" = [])),
    tag = "Export"
)]
pub async fn workers_csv(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Name", "Section", "Department", "Shift"])
        .map_err(csv_error)?;
    for w in workers.iter().filter(|w| w.is_active()) {
        writer
            .write_record([
                w.name.clone(),
                w.section.clone(),
                w.department.clone(),
                w.shift.clone(),
            ])
            .map_err(csv_error)?;
    }

    csv_response("worker_directory.csv", writer)
}
