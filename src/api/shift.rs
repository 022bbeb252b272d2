use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::{next_id, store_err};
use crate::auth::auth::AuthUser;
use crate::model::shift::Shift;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct CreateShift {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/shifts",
    responses((status = 200, description = "All shifts", body = [Shift])),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn list_shifts(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let shifts = store::fetch_shifts(pool.get_ref()).await.map_err(store_err)?;
    Ok(HttpResponse::Ok().json(shifts))
}

#[utoipa::path(
    post,
    path = "/api/shifts",
    request_body = CreateShift,
    responses(
        (status = 201, description = "Shift created"),
        (status = 400, description = "Missing shift name"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Shifts"
)]
pub async fn create_shift(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateShift>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if body.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({"error": "Shift name required"})));
    }

    let mut shifts = store::fetch_shifts(pool.get_ref()).await.map_err(store_err)?;
    let id = next_id(shifts.iter().map(|s| s.id));
    shifts.push(Shift {
        id,
        name: body.name.trim().to_string(),
    });
    store::replace_shifts(pool.get_ref(), &shifts)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Created().json(json!({"id": id})))
}
