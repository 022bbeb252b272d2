use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

use crate::api::attendance::filter_day;
use crate::api::{store_err, DayQuery, MonthQuery};
use crate::auth::auth::AuthUser;
use crate::core::grid::monthly_grid;
use crate::core::report::{daily_summary, monthly_report};
use crate::store;

fn valid_month(query: &MonthQuery) -> Result<(), HttpResponse> {
    if (1..=12).contains(&query.month) {
        Ok(())
    } else {
        Err(HttpResponse::BadRequest().json(json!({"error": "Month must be 1-12"})))
    }
}

#[utoipa::path(
    get,
    path = "/api/reports/daily",
    params(DayQuery),
    responses((status = 200, description = "Per-status counts for the date", body = crate::core::report::DailySummary)),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn daily_report(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<DayQuery>,
) -> actix_web::Result<impl Responder> {
    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let records = filter_day(records, &query);
    Ok(HttpResponse::Ok().json(daily_summary(&records)))
}

/// Monthly per-worker analysis: status counts, attendance percentage and
/// the worker's current assignment.
#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    params(MonthQuery),
    responses(
        (status = 200, description = "Per-worker monthly statistics", body = crate::core::report::MonthlyReport),
        (status = 400, description = "Invalid month"),
        (status = 403, description = "HR/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn monthly(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;
    if let Err(resp) = valid_month(&query) {
        return Ok(resp);
    }

    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;
    let workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;

    Ok(HttpResponse::Ok().json(monthly_report(query.year, query.month, &records, &workers)))
}

/// Worker × day presence matrix for one month.
#[utoipa::path(
    get,
    path = "/api/reports/grid",
    params(MonthQuery),
    responses(
        (status = 200, description = "Monthly presence grid", body = crate::core::grid::MonthlyGrid),
        (status = 400, description = "Invalid month")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn grid(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    if let Err(resp) = valid_month(&query) {
        return Ok(resp);
    }

    let workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let records = store::fetch_attendance(pool.get_ref()).await.map_err(store_err)?;

    Ok(HttpResponse::Ok().json(monthly_grid(query.year, query.month, &workers, &records)))
}
