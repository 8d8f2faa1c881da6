pub mod models;
pub mod operations;

use log::{debug, error, info};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::Result;

/// Open (creating if missing) the database at `db_path` and apply the
/// connection pragmas. Schema setup is a separate step, see [`init_database`].
pub async fn connect(db_path: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;

    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    Ok(pool)
}

struct Migration {
    name: &'static str,
    up_sql: &'static str,
}

const MIGRATION_2026_02_14_101500_0000_SETUP_TABLES: &str =
    include_str!("../../../migrations/2026-02-14-101500-0000_setup_tables/up.sql");

const MIGRATIONS: &[Migration] = &[Migration {
    name: "2026-02-14-101500-0000_setup_tables",
    up_sql: MIGRATION_2026_02_14_101500_0000_SETUP_TABLES,
}];

async fn init_migrations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER NOT NULL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER))
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn is_migration_applied(pool: &SqlitePool, migration_name: &str) -> Result<bool> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _migrations WHERE name = ?1")
            .bind(migration_name)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

async fn mark_migration_applied(pool: &SqlitePool, migration_name: &str) -> Result<()> {
    sqlx::query("INSERT INTO _migrations (name) VALUES (?1)")
        .bind(migration_name)
        .execute(pool)
        .await?;
    Ok(())
}

fn parse_sql_statements(sql: &str) -> Vec<String> {
    sql.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("--")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Apply all pending embedded migrations. Safe to call on every startup.
pub async fn init_database(pool: &SqlitePool) -> Result<()> {
    init_migrations_table(pool).await?;

    for migration in MIGRATIONS {
        if is_migration_applied(pool, migration.name).await? {
            debug!("Migration {} already applied, skipping", migration.name);
            continue;
        }

        info!("Applying migration: {}", migration.name);
        for statement in parse_sql_statements(migration.up_sql) {
            if let Err(e) = sqlx::query(&statement).execute(pool).await {
                error!(
                    "Migration {} failed on statement `{}`: {}",
                    migration.name, statement, e
                );
                return Err(e.into());
            }
        }

        mark_migration_applied(pool, migration.name).await?;
        info!("Migration {} applied successfully", migration.name);
    }

    Ok(())
}

const DEFAULT_CATALOG: &[(&str, &str)] = &[
    ("Bench Press", "Chest"),
    ("Dumbbell Press", "Chest"),
    ("Incline Bench Press", "Chest"),
    ("Chest Fly", "Chest"),
    ("Dips", "Chest"),
    ("Deadlift", "Back"),
    ("Lat Pulldown", "Back"),
    ("Bent-Over Row", "Back"),
    ("Pull-Up", "Back"),
    ("Seated Row", "Back"),
    ("Overhead Press", "Shoulders"),
    ("Lateral Raise", "Shoulders"),
    ("Front Raise", "Shoulders"),
    ("Rear Delt Fly", "Shoulders"),
    ("Barbell Curl", "Arms"),
    ("Dumbbell Curl", "Arms"),
    ("Triceps Extension", "Arms"),
    ("Skull Crusher", "Arms"),
    ("Squat", "Legs"),
    ("Leg Press", "Legs"),
    ("Romanian Deadlift", "Legs"),
    ("Leg Curl", "Legs"),
    ("Leg Extension", "Legs"),
    ("Calf Raise", "Legs"),
    ("Crunch", "Core"),
    ("Leg Raise", "Core"),
    ("Plank", "Core"),
    ("Ab Wheel Rollout", "Core"),
];

/// Insert the default exercise catalog if (and only if) the table is empty.
/// Returns the number of rows inserted. Never mutates an existing catalog.
pub async fn seed_default_exercises(pool: &SqlitePool) -> Result<u64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exercises")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        debug!("Exercise catalog already populated ({count} rows), not seeding");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for (name, muscle_group) in DEFAULT_CATALOG {
        sqlx::query("INSERT INTO exercises (name, muscle_group) VALUES (?1, ?2)")
            .bind(name)
            .bind(muscle_group)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!("Seeded {} default exercises", DEFAULT_CATALOG.len());
    Ok(DEFAULT_CATALOG.len() as u64)
}
