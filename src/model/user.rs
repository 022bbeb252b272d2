use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: String,
    pub active: String,
    pub assigned_section: String,
    pub assigned_shift: String,
}

impl User {
    pub fn is_active(&self) -> bool {
        matches!(self.active.to_lowercase().as_str(), "true" | "1" | "yes")
    }
}
