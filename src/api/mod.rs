pub mod attendance;
pub mod department;
pub mod export;
pub mod report;
pub mod section;
pub mod shift;
pub mod user;
pub mod worker;

use actix_web::error::ErrorInternalServerError;
use serde::Deserialize;
use utoipa::IntoParams;

/// Store failures are logged and surfaced as one generic message; the
/// operation aborts with no partial state change.
pub(crate) fn store_err(e: sqlx::Error) -> actix_web::Error {
    tracing::error!(error = %e, "Store operation failed");
    ErrorInternalServerError("Database error")
}

/// IDs are allocated as max-plus-one over the current relation, 1 when the
/// relation is empty. Not safe under concurrent writers; the service
/// assumes a single writer per relation.
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    pub date: chrono::NaiveDate,
    pub section: Option<String>,
    pub department: Option<String>,
    pub shift: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

#[cfg(test)]
mod tests {
    use super::next_id;

    #[test]
    fn next_id_is_max_plus_one_or_one() {
        assert_eq!(next_id([3, 41, 7].into_iter()), 42);
        assert_eq!(next_id(std::iter::empty()), 1);
    }
}
