#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use liftlog::db::models::{NewExercise, NewWorkout};
use liftlog::db::operations::{create_exercise, create_workout};

/// Isolated in-memory database with the schema applied. Single connection so
/// the memory database survives for the whole test.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("connect options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory pool");
    liftlog::db::init_database(&pool).await.expect("migrations");
    pool
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).expect("test date")
}

pub async fn insert_exercise(pool: &SqlitePool, name: &str, muscle_group: &str) -> i64 {
    create_exercise(
        pool,
        &NewExercise {
            name: name.to_string(),
            muscle_group: muscle_group.to_string(),
        },
    )
    .await
    .expect("insert exercise")
}

pub async fn insert_workout(
    pool: &SqlitePool,
    exercise_id: i64,
    day: NaiveDate,
    sets: i64,
    reps: i64,
    weight: f64,
) -> i64 {
    create_workout(
        pool,
        &NewWorkout {
            exercise_id,
            date: day,
            sets,
            reps,
            weight,
            notes: None,
        },
    )
    .await
    .expect("insert workout")
}
