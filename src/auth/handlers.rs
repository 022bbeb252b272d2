use actix_web::{web, HttpResponse, Responder};
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};

use crate::auth::{jwt::generate_access_token, password::verify_password};
use crate::config::Config;
use crate::model::role::Role;
use crate::models::{LoginReqDto, LoginResponse};
use crate::store;

/// Login endpoint.
///
/// Unknown username, inactive account and wrong password all produce the
/// same generic answer so the response does not reveal which check failed.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials or account inactive"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(pool, config, body), fields(username = %body.username))]
pub async fn login(
    body: web::Json<LoginReqDto>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if body.username.trim().is_empty() || body.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    let users = match store::fetch_users(pool.get_ref()).await {
        Ok(users) => users,
        Err(e) => {
            error!(error = %e, "Database error while fetching users");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let user = match users.iter().find(|u| u.username == body.username) {
        Some(user) => user,
        None => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
    };

    if !user.is_active() {
        info!(user_id = user.id, "Invalid credentials: account inactive");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    if let Err(e) = verify_password(&body.password, &user.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    let role = match user.role.parse::<Role>() {
        Ok(role) => role,
        Err(_) => {
            error!(user_id = user.id, role = %user.role, "Unknown role on user row");
            return HttpResponse::InternalServerError().finish();
        }
    };

    debug!(user_id = user.id, "Generating access token");

    let access_token = generate_access_token(
        user.id,
        user.username.clone(),
        role.id(),
        &config.jwt_secret,
        config.access_token_ttl,
    );

    info!(user_id = user.id, "Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        role: role.to_string(),
        user_id: user.id,
        name: user.name.clone(),
    })
}
