use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the attendance relation.
///
/// Worker name, section, department and shift are snapshots taken when the
/// record was first written; they deliberately do not follow later transfers
/// or renames. `status` holds free-form text whose canonical values are the
/// `AttendanceStatus` variants.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub section: String,
    pub department: String,
    pub shift: String,
    pub status: String,
    #[schema(value_type = String)]
    pub timestamp: NaiveDateTime,
}
