use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::{next_id, store_err};
use crate::auth::auth::AuthUser;
use crate::auth::password::hash_password;
use crate::model::role::Role;
use crate::model::user::User;
use crate::store;

#[derive(Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub password: String,
    #[schema(example = "Supervisor")]
    pub role: String,
    #[serde(default)]
    pub assigned_section: String,
    #[serde(default)]
    pub assigned_shift: String,
}

/// User listing row; the password hash never leaves the service.
#[derive(Serialize, ToSchema)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub role: String,
    pub active: String,
    pub assigned_section: String,
    pub assigned_shift: String,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        UserView {
            id: u.id,
            name: u.name,
            username: u.username,
            role: u.role,
            active: u.active,
            assigned_section: u.assigned_section,
            assigned_shift: u.assigned_shift,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, passwords omitted", body = [UserView]),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    let users = store::fetch_users(pool.get_ref()).await.map_err(store_err)?;
    let rows: Vec<UserView> = users.into_iter().map(UserView::from).collect();
    Ok(HttpResponse::Ok().json(rows))
}

/// Create a user account. Role is fixed at creation; there is no role
/// transition operation.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Missing fields or unknown role"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Username already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateUser>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let username = body.username.trim();
    if body.name.trim().is_empty() || username.is_empty() || body.password.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(json!({"error": "Name, username and password required"})));
    }

    let role = match body.role.parse::<Role>() {
        Ok(role) => role,
        Err(_) => {
            return Ok(HttpResponse::BadRequest()
                .json(json!({"error": "Role must be Admin, Supervisor or HR"})))
        }
    };

    let mut users = store::fetch_users(pool.get_ref()).await.map_err(store_err)?;
    if users.iter().any(|u| u.username == username) {
        return Ok(HttpResponse::Conflict().json(json!({"error": "Username already exists"})));
    }

    let id = next_id(users.iter().map(|u| u.id));
    users.push(User {
        id,
        name: body.name.trim().to_string(),
        username: username.to_string(),
        password: hash_password(&body.password),
        role: role.to_string(),
        active: "true".to_string(),
        assigned_section: body.assigned_section.clone(),
        assigned_shift: body.assigned_shift.clone(),
    });
    store::replace_users(pool.get_ref(), &users)
        .await
        .map_err(store_err)?;

    Ok(HttpResponse::Created().json(json!({"id": id})))
}
