use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the workers relation.
///
/// `active` is free-form text rather than a boolean: historical data mixes
/// "true"/"false", "1"/"0" and "yes"/"no", so the activity test accepts all
/// of them case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub section: String,
    pub department: String,
    pub shift: String,
    pub active: String,
}

impl Worker {
    pub fn is_active(&self) -> bool {
        matches!(self.active.to_lowercase().as_str(), "true" | "1" | "yes")
    }
}
