use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::{next_id, store_err};
use crate::auth::auth::AuthUser;
use crate::model::section::Section;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct CreateSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/api/sections",
    responses((status = 200, description = "All sections", body = [Section])),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
pub async fn list_sections(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let sections = store::fetch_sections(pool.get_ref()).await.map_err(store_err)?;
    Ok(HttpResponse::Ok().json(sections))
}

#[utoipa::path(
    post,
    path = "/api/sections",
    request_body = CreateSection,
    responses(
        (status = 201, description = "Section created"),
        (status = 400, description = "Missing section name"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
pub async fn create_section(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateSection>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if body.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({"error": "Section name required"})));
    }

    let mut sections = store::fetch_sections(pool.get_ref()).await.map_err(store_err)?;
    let id = next_id(sections.iter().map(|s| s.id));
    sections.push(Section {
        id,
        name: body.name.trim().to_string(),
        description: body.description.clone(),
    });
    store::replace_sections(pool.get_ref(), &sections)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Created().json(json!({"id": id})))
}

#[utoipa::path(
    delete,
    path = "/api/sections",
    responses(
        (status = 200, description = "All sections cleared"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Sections"
)]
pub async fn clear_sections(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    store::replace_sections(pool.get_ref(), &[])
        .await
        .map_err(store_err)?;
    Ok(HttpResponse::Ok().json(json!({"message": "Sections cleared"})))
}
