//! Derived statistics over the workout log: per-exercise aggregates,
//! time-windowed volume breakdowns, and personal records.

use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    /// Unrecognized period strings fall back to a weekly window.
    pub fn parse(s: &str) -> Self {
        match s {
            "month" => Period::Month,
            "year" => Period::Year,
            _ => Period::Week,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Window start: 7 days, 1 calendar month, or 1 calendar year back.
    /// The window end is unbounded.
    fn window_start(self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => today - chrono::Duration::days(7),
            Period::Month => today
                .checked_sub_months(Months::new(1))
                .unwrap_or(NaiveDate::MIN),
            Period::Year => today
                .checked_sub_months(Months::new(12))
                .unwrap_or(NaiveDate::MIN),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseStats {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub muscle_group: String,
    pub max_weight: f64,
    pub max_reps: i64,
    pub total_sets: i64,
    pub total_volume: f64,
    pub history: Vec<WorkoutHistory>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WorkoutHistory {
    pub date: NaiveDate,
    pub weight: f64,
    pub reps: i64,
    pub sets: i64,
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeStats {
    pub period: Period,
    pub total_volume: f64,
    pub by_muscle: Vec<MuscleVolume>,
    pub daily: Vec<DailyVolume>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MuscleVolume {
    pub muscle_group: String,
    pub volume: f64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub muscle_group: String,
    pub max_weight: f64,
    pub reps: i64,
    pub date: NaiveDate,
}

/// All-time aggregates and full date-ordered history for one exercise.
/// Unknown exercise ids fail with `NotFound`; an exercise without workouts
/// reports zeroed aggregates and an empty history.
pub async fn exercise_stats(pool: &SqlitePool, exercise_id: i64) -> Result<ExerciseStats> {
    let mut tx = pool.begin().await?;

    let (exercise_name, muscle_group) =
        sqlx::query_as::<_, (String, String)>("SELECT name, muscle_group FROM exercises WHERE id = ?1")
            .bind(exercise_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound("exercise"))?;

    let (max_weight, max_reps, total_sets, total_volume) =
        sqlx::query_as::<_, (f64, i64, i64, f64)>(
            "SELECT COALESCE(MAX(weight), 0.0), COALESCE(MAX(reps), 0),
                    COALESCE(SUM(sets), 0), COALESCE(SUM(sets * reps * weight), 0.0)
             FROM workouts WHERE exercise_id = ?1",
        )
        .bind(exercise_id)
        .fetch_one(&mut *tx)
        .await?;

    // Date ties stay in storage order.
    let history = sqlx::query_as::<_, WorkoutHistory>(
        "SELECT date, weight, reps, sets, sets * reps * weight AS volume
         FROM workouts WHERE exercise_id = ?1 ORDER BY date ASC",
    )
    .bind(exercise_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(ExerciseStats {
        exercise_id,
        exercise_name,
        muscle_group,
        max_weight,
        max_reps,
        total_sets,
        total_volume,
        history,
    })
}

/// Volume logged since the period's window start, with per-muscle-group and
/// per-date breakdowns. All three reads share one transaction so the total
/// always reconciles with both breakdowns.
pub async fn volume_stats(pool: &SqlitePool, period: Period) -> Result<VolumeStats> {
    let start = period.window_start(Local::now().date_naive());
    let mut tx = pool.begin().await?;

    let total_volume = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(sets * reps * weight), 0.0) FROM workouts WHERE date >= ?1",
    )
    .bind(start)
    .fetch_one(&mut *tx)
    .await?;

    let by_muscle = sqlx::query_as::<_, MuscleVolume>(
        "SELECT e.muscle_group, SUM(w.sets * w.reps * w.weight) AS volume
         FROM workouts w JOIN exercises e ON w.exercise_id = e.id
         WHERE w.date >= ?1 GROUP BY e.muscle_group ORDER BY volume DESC",
    )
    .bind(start)
    .fetch_all(&mut *tx)
    .await?;

    let daily = sqlx::query_as::<_, DailyVolume>(
        "SELECT date, SUM(sets * reps * weight) AS volume
         FROM workouts WHERE date >= ?1 GROUP BY date ORDER BY date ASC",
    )
    .bind(start)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(VolumeStats {
        period,
        total_volume,
        by_muscle,
        daily,
    })
}

#[derive(FromRow)]
struct RecordRow {
    exercise_id: i64,
    exercise_name: String,
    muscle_group: String,
    weight: f64,
    reps: i64,
    date: NaiveDate,
}

/// Heaviest weight ever logged per exercise, with the reps and date of the
/// earliest workout that achieved it (row id breaks same-day ties).
/// Exercises with no workout above zero weight are omitted.
pub async fn personal_records(pool: &SqlitePool) -> Result<Vec<PersonalRecord>> {
    let rows = sqlx::query_as::<_, RecordRow>(
        "SELECT w.exercise_id, e.name AS exercise_name, e.muscle_group, w.weight, w.reps, w.date
         FROM workouts w JOIN exercises e ON w.exercise_id = e.id
         WHERE w.weight > 0
         ORDER BY w.exercise_id, w.weight DESC, w.date ASC, w.id ASC",
    )
    .fetch_all(pool)
    .await?;

    // The first row per exercise is its record under the ordering above.
    let mut records: Vec<PersonalRecord> = Vec::new();
    for row in rows {
        if records
            .last()
            .is_some_and(|record| record.exercise_id == row.exercise_id)
        {
            continue;
        }
        records.push(PersonalRecord {
            exercise_id: row.exercise_id,
            exercise_name: row.exercise_name,
            muscle_group: row.muscle_group,
            max_weight: row.weight,
            reps: row.reps,
            date: row.date,
        });
    }

    records.sort_by(|a, b| {
        (a.muscle_group.as_str(), a.exercise_name.as_str())
            .cmp(&(b.muscle_group.as_str(), b.exercise_name.as_str()))
    });
    Ok(records)
}
