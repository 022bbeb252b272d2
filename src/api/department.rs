use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::{next_id, store_err};
use crate::auth::auth::AuthUser;
use crate::model::department::Department;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct CreateDepartment {
    pub name: String,
    pub section_id: i64,
    #[serde(default)]
    pub description: String,
}

/// Department listing row with the owning section's name resolved for
/// display.
#[derive(Serialize, ToSchema)]
pub struct DepartmentView {
    pub id: i64,
    pub name: String,
    pub section: String,
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/api/departments",
    responses((status = 200, description = "All departments with section names", body = [DepartmentView])),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn list_departments(
    _auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let departments = store::fetch_departments(pool.get_ref()).await.map_err(store_err)?;
    let sections = store::fetch_sections(pool.get_ref()).await.map_err(store_err)?;

    let rows: Vec<DepartmentView> = departments
        .into_iter()
        .map(|d| DepartmentView {
            section: sections
                .iter()
                .find(|s| s.id == d.section_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            id: d.id,
            name: d.name,
            description: d.description,
        })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created"),
        (status = 400, description = "Missing department name"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn create_department(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateDepartment>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if body.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({"error": "Department name required"})));
    }

    let mut departments = store::fetch_departments(pool.get_ref()).await.map_err(store_err)?;
    let id = next_id(departments.iter().map(|d| d.id));
    departments.push(Department {
        id,
        name: body.name.trim().to_string(),
        section_id: body.section_id,
        description: body.description.clone(),
    });
    store::replace_departments(pool.get_ref(), &departments)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Created().json(json!({"id": id})))
}

#[utoipa::path(
    delete,
    path = "/api/departments",
    responses(
        (status = 200, description = "All departments cleared"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Departments"
)]
pub async fn clear_departments(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    store::replace_departments(pool.get_ref(), &[])
        .await
        .map_err(store_err)?;
    Ok(HttpResponse::Ok().json(json!({"message": "Departments cleared"})))
}
