//! Whole-relation persistence. Every relation supports exactly two
//! operations: fetch all rows and replace all rows. Mutation anywhere in
//! the service is read-everything, transform in memory, replace-everything;
//! there is no row-level update path.

use sqlx::SqlitePool;

use crate::model::attendance::AttendanceRecord;
use crate::model::department::Department;
use crate::model::section::Section;
use crate::model::shift::Shift;
use crate::model::user::User;
use crate::model::worker::Worker;

pub async fn fetch_shifts(pool: &SqlitePool) -> Result<Vec<Shift>, sqlx::Error> {
    sqlx::query_as::<_, Shift>("SELECT id, name FROM shifts ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn replace_shifts(pool: &SqlitePool, rows: &[Shift]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM shifts").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query("INSERT INTO shifts (id, name) VALUES (?, ?)")
            .bind(row.id)
            .bind(&row.name)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

pub async fn fetch_sections(pool: &SqlitePool) -> Result<Vec<Section>, sqlx::Error> {
    sqlx::query_as::<_, Section>(
        "SELECT id, name, COALESCE(description, '') AS description FROM sections ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn replace_sections(pool: &SqlitePool, rows: &[Section]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM sections").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query("INSERT INTO sections (id, name, description) VALUES (?, ?, ?)")
            .bind(row.id)
            .bind(&row.name)
            .bind(&row.description)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

pub async fn fetch_departments(pool: &SqlitePool) -> Result<Vec<Department>, sqlx::Error> {
    sqlx::query_as::<_, Department>(
        "SELECT id, name, COALESCE(section_id, 0) AS section_id, \
         COALESCE(description, '') AS description FROM departments ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn replace_departments(pool: &SqlitePool, rows: &[Department]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM departments").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query("INSERT INTO departments (id, name, section_id, description) VALUES (?, ?, ?, ?)")
            .bind(row.id)
            .bind(&row.name)
            .bind(row.section_id)
            .bind(&row.description)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

pub async fn fetch_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, username, password, role, COALESCE(active, 'true') AS active, \
         COALESCE(assigned_section, '') AS assigned_section, \
         COALESCE(assigned_shift, '') AS assigned_shift FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn replace_users(pool: &SqlitePool, rows: &[User]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO users (id, name, username, password, role, active, assigned_section, assigned_shift) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.username)
        .bind(&row.password)
        .bind(&row.role)
        .bind(&row.active)
        .bind(&row.assigned_section)
        .bind(&row.assigned_shift)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

/// Missing optional columns come back defaulted (empty assignment text,
/// active) instead of failing the read.
pub async fn fetch_workers(pool: &SqlitePool) -> Result<Vec<Worker>, sqlx::Error> {
    sqlx::query_as::<_, Worker>(
        "SELECT id, name, COALESCE(section, '') AS section, \
         COALESCE(department, '') AS department, COALESCE(shift, '') AS shift, \
         COALESCE(active, 'true') AS active FROM workers ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn replace_workers(pool: &SqlitePool, rows: &[Worker]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM workers").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO workers (id, name, section, department, shift, active) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.section)
        .bind(&row.department)
        .bind(&row.shift)
        .bind(&row.active)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

pub async fn fetch_attendance(pool: &SqlitePool) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        "SELECT id, worker_id, worker_name, date, COALESCE(section, '') AS section, \
         COALESCE(department, '') AS department, COALESCE(shift, '') AS shift, \
         status, timestamp FROM attendance ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn replace_attendance(
    pool: &SqlitePool,
    rows: &[AttendanceRecord],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM attendance").execute(&mut *tx).await?;
    for row in rows {
        sqlx::query(
            "INSERT INTO attendance (id, worker_id, worker_name, date, section, department, shift, status, timestamp) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(row.id)
        .bind(row.worker_id)
        .bind(&row.worker_name)
        .bind(row.date)
        .bind(&row.section)
        .bind(&row.department)
        .bind(&row.shift)
        .bind(&row.status)
        .bind(row.timestamp)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use chrono::{NaiveDate, NaiveDateTime};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // One connection only: every connection to :memory: is its own DB.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        init_schema(&pool).await.expect("schema");
        pool
    }

    #[actix_web::test]
    async fn workers_round_trip_through_replace() {
        let pool = test_pool().await;

        let rows = vec![
            Worker {
                id: 1,
                name: "Asha".into(),
                section: "Liquid Section".into(),
                department: "Mixing".into(),
                shift: "Morning".into(),
                active: "true".into(),
            },
            Worker {
                id: 2,
                name: "Rafi".into(),
                section: "Solid Section".into(),
                department: "Packaging".into(),
                shift: "General".into(),
                active: "false".into(),
            },
        ];
        replace_workers(&pool, &rows).await.unwrap();

        let read = fetch_workers(&pool).await.unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].name, "Asha");
        assert!(read[0].is_active());
        assert!(!read[1].is_active());
    }

    #[actix_web::test]
    async fn replace_discards_previous_rows() {
        let pool = test_pool().await;

        let shift = |id: i64, name: &str| Shift { id, name: name.into() };
        replace_shifts(&pool, &[shift(1, "Morning"), shift(2, "Afternoon")])
            .await
            .unwrap();
        replace_shifts(&pool, &[shift(5, "Night")]).await.unwrap();

        let read = fetch_shifts(&pool).await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].id, 5);
        assert_eq!(read[0].name, "Night");
    }

    #[actix_web::test]
    async fn attendance_round_trip_keeps_dates_and_status() {
        let pool = test_pool().await;

        let row = AttendanceRecord {
            id: 1,
            worker_id: 7,
            worker_name: "Asha".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            section: "Liquid Section".into(),
            department: "Mixing".into(),
            shift: "Morning".into(),
            status: "Present".into(),
            timestamp: NaiveDateTime::parse_from_str("2024-03-05 09:15:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };
        replace_attendance(&pool, &[row]).await.unwrap();

        let read = fetch_attendance(&pool).await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(read[0].status, "Present");
    }

    #[actix_web::test]
    async fn null_optional_columns_are_defaulted_on_read() {
        let pool = test_pool().await;

        sqlx::query("INSERT INTO workers (id, name) VALUES (1, 'Bare')")
            .execute(&pool)
            .await
            .unwrap();

        let read = fetch_workers(&pool).await.unwrap();
        assert_eq!(read[0].section, "");
        assert_eq!(read[0].department, "");
        assert_eq!(read[0].shift, "");
        assert!(read[0].is_active());
    }
}
