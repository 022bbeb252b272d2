use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::hash_password;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS shifts (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS sections (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        section_id INTEGER,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL,
        role TEXT NOT NULL,
        active TEXT DEFAULT 'true',
        assigned_section TEXT,
        assigned_shift TEXT
    )",
    "CREATE TABLE IF NOT EXISTS workers (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        section TEXT,
        department TEXT,
        shift TEXT,
        active TEXT DEFAULT 'true'
    )",
    "CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY,
        worker_id INTEGER,
        worker_name TEXT NOT NULL,
        date TEXT NOT NULL,
        section TEXT,
        department TEXT,
        shift TEXT,
        status TEXT NOT NULL,
        timestamp TEXT NOT NULL
    )",
];

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    init_schema(&pool).await.expect("Failed to create tables");
    seed_defaults(&pool).await.expect("Failed to seed defaults");

    pool
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in TABLES {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}

/// Populate empty reference relations and the default admin account so a
/// fresh database is immediately usable.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shifts")
        .fetch_one(pool)
        .await?;
    if count == 0 {
        sqlx::query("INSERT INTO shifts (name) VALUES ('Morning'), ('Afternoon'), ('General')")
            .execute(pool)
            .await?;
        info!("Seeded default shifts");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sections")
        .fetch_one(pool)
        .await?;
    if count == 0 {
        sqlx::query(
            "INSERT INTO sections (name, description) VALUES
             ('Liquid Section', 'Liquid manufacturing'),
             ('Solid Section', 'Solid manufacturing'),
             ('Utility Section', 'Utility services')",
        )
        .execute(pool)
        .await?;
        info!("Seeded default sections");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
        .fetch_one(pool)
        .await?;
    if count == 0 {
        sqlx::query(
            "INSERT INTO departments (name, section_id, description) VALUES
             ('Mixing', 1, 'Mixing department'),
             ('Filling', 1, 'Filling department'),
             ('Packaging', 2, 'Packaging department'),
             ('Maintenance', 3, 'Maintenance department')",
        )
        .execute(pool)
        .await?;
        info!("Seeded default departments");
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count == 0 {
        let hashed = hash_password("admin123");
        sqlx::query(
            "INSERT INTO users (name, username, password, role, active, assigned_section, assigned_shift)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind("Admin User")
        .bind("admin")
        .bind(hashed)
        .bind("Admin")
        .bind("true")
        .bind("")
        .bind("")
        .execute(pool)
        .await?;
        info!("Seeded default admin user");
    }

    Ok(())
}
