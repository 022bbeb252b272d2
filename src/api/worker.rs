use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api::{next_id, store_err};
use crate::auth::auth::AuthUser;
use crate::model::worker::Worker;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct CreateWorker {
    pub name: String,
    pub section: String,
    pub department: String,
    pub shift: String,
}

/// Bulk import row; the upload-from-spreadsheet path of the original
/// system, minus the spreadsheet.
#[derive(Deserialize, ToSchema)]
pub struct ImportWorker {
    pub name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub shift: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetActive {
    pub active: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct TransferWorker {
    pub section: String,
    pub department: String,
    pub shift: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkerQuery {
    pub section: Option<String>,
    pub department: Option<String>,
    pub shift: Option<String>,
    pub active: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/workers",
    params(WorkerQuery),
    responses((status = 200, description = "Workers matching the filters", body = [Worker])),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn list_workers(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<WorkerQuery>,
) -> actix_web::Result<impl Responder> {
    let mut workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;

    if let Some(section) = &query.section {
        workers.retain(|w| &w.section == section);
    }
    if let Some(department) = &query.department {
        workers.retain(|w| &w.department == department);
    }
    if let Some(shift) = &query.shift {
        workers.retain(|w| &w.shift == shift);
    }
    if let Some(active) = query.active {
        workers.retain(|w| w.is_active() == active);
    }

    Ok(HttpResponse::Ok().json(workers))
}

#[utoipa::path(
    post,
    path = "/api/workers",
    request_body = CreateWorker,
    responses(
        (status = 201, description = "Worker created"),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Supervisor/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn create_worker(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateWorker>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;

    if [&body.name, &body.section, &body.department, &body.shift]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Ok(HttpResponse::BadRequest()
            .json(json!({"error": "Name, section, department and shift required"})));
    }

    let mut workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let id = next_id(workers.iter().map(|w| w.id));
    workers.push(Worker {
        id,
        name: body.name.trim().to_string(),
        section: body.section.trim().to_string(),
        department: body.department.trim().to_string(),
        shift: body.shift.trim().to_string(),
        active: "true".to_string(),
    });
    store::replace_workers(pool.get_ref(), &workers)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Created().json(json!({"id": id})))
}

/// Bulk-add workers, skipping rows that already exist with the same name,
/// section, department and shift.
#[utoipa::path(
    post,
    path = "/api/workers/import",
    request_body = [ImportWorker],
    responses(
        (status = 200, description = "Import outcome: rows added and duplicates skipped"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn import_workers(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<Vec<ImportWorker>>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let mut workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let mut id = next_id(workers.iter().map(|w| w.id));
    let mut added = 0usize;
    let mut skipped = 0usize;

    for row in body.into_inner() {
        let name = row.name.trim().to_string();
        let section = row.section.trim().to_string();
        let department = row.department.trim().to_string();
        let shift = row.shift.trim().to_string();

        let duplicate = workers.iter().any(|w| {
            w.name == name && w.section == section && w.department == department && w.shift == shift
        });
        if duplicate {
            skipped += 1;
            continue;
        }

        workers.push(Worker {
            id,
            name,
            section,
            department,
            shift,
            active: "true".to_string(),
        });
        id += 1;
        added += 1;
    }

    if added > 0 {
        store::replace_workers(pool.get_ref(), &workers)
            .await
            .map_err(store_err)?;
    }

    info!(added, skipped, "Worker import finished");
    Ok(HttpResponse::Ok().json(json!({"added": added, "skipped": skipped})))
}

#[utoipa::path(
    put,
    path = "/api/workers/{id}/active",
    params(("id", Path, description = "Worker ID")),
    request_body = SetActive,
    responses(
        (status = 200, description = "Activation flag updated"),
        (status = 404, description = "Worker not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn set_worker_active(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<SetActive>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;
    let worker_id = path.into_inner();

    let mut workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let Some(worker) = workers.iter_mut().find(|w| w.id == worker_id) else {
        return Ok(HttpResponse::NotFound().json(json!({"error": "Worker not found"})));
    };
    worker.active = if body.active { "true" } else { "false" }.to_string();

    store::replace_workers(pool.get_ref(), &workers)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Ok().json(json!({"id": worker_id, "active": body.active})))
}

/// Reassign a worker to a new section/department/shift. Existing attendance
/// records keep their snapshot of the old assignment.
#[utoipa::path(
    put,
    path = "/api/workers/{id}/transfer",
    params(("id", Path, description = "Worker ID")),
    request_body = TransferWorker,
    responses(
        (status = 200, description = "Worker transferred"),
        (status = 404, description = "Worker not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn transfer_worker(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<TransferWorker>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;
    let worker_id = path.into_inner();

    let mut workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let Some(worker) = workers.iter_mut().find(|w| w.id == worker_id) else {
        return Ok(HttpResponse::NotFound().json(json!({"error": "Worker not found"})));
    };
    worker.section = body.section.clone();
    worker.department = body.department.clone();
    worker.shift = body.shift.clone();

    store::replace_workers(pool.get_ref(), &workers)
        .await
        .map_err(store_err)?;

    info!(worker_id, section = %body.section, department = %body.department, shift = %body.shift, "Worker transferred");
    Ok(HttpResponse::Ok().json(json!({"message": "Worker transferred"})))
}

/// Hard delete: the row is removed outright. Deactivation is the
/// non-destructive alternative.
#[utoipa::path(
    delete,
    path = "/api/workers/{id}",
    params(("id", Path, description = "Worker ID")),
    responses(
        (status = 200, description = "Worker deleted"),
        (status = 404, description = "Worker not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn delete_worker(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;
    let worker_id = path.into_inner();

    let mut workers = store::fetch_workers(pool.get_ref()).await.map_err(store_err)?;
    let before = workers.len();
    workers.retain(|w| w.id != worker_id);
    if workers.len() == before {
        return Ok(HttpResponse::NotFound().json(json!({"error": "Worker not found"})));
    }

    store::replace_workers(pool.get_ref(), &workers)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Ok().json(json!({"message": "Worker deleted"})))
}

#[utoipa::path(
    delete,
    path = "/api/workers",
    responses(
        (status = 200, description = "All workers cleared"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Workers"
)]
pub async fn clear_workers(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    store::replace_workers(pool.get_ref(), &[])
        .await
        .map_err(store_err)?;
    Ok(HttpResponse::Ok().json(json!({"message": "Workers cleared"})))
}
