//! Goals joined with current best performance.
//!
//! Progress is informational only: the engine reports it but never flips a
//! goal's `achieved` flag on its own.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::{NewGoal, UpdateGoal};
use crate::error::{CoreError, Result};

/// A goal with its owning exercise and computed progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalStatus {
    pub id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub muscle_group: String,
    pub target_weight: f64,
    pub target_reps: i64,
    pub deadline: Option<NaiveDate>,
    pub achieved: bool,
    pub current_max: f64,
    /// Percentage of target weight reached, capped at 100 and rounded to two
    /// decimals. `None` when the stored target weight is not positive.
    pub progress: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(FromRow)]
struct GoalRow {
    id: i64,
    exercise_id: i64,
    exercise_name: String,
    muscle_group: String,
    target_weight: f64,
    target_reps: i64,
    deadline: Option<NaiveDate>,
    achieved: bool,
    created_at: NaiveDateTime,
    current_max: f64,
}

fn progress_percent(current_max: f64, target_weight: f64) -> Option<f64> {
    if target_weight <= 0.0 {
        // Not a valid target per creation constraints; legacy rows get no
        // progress figure rather than a division by zero.
        return None;
    }
    let pct = (current_max / target_weight * 100.0).clamp(0.0, 100.0);
    Some((pct * 100.0).round() / 100.0)
}

/// All goals with the owning exercise joined in and `current_max` computed
/// from the workout log. Unachieved goals sort before achieved ones, then by
/// deadline ascending; goals without a deadline sort last within their group.
pub async fn list_goals(pool: &SqlitePool) -> Result<Vec<GoalStatus>> {
    let rows = sqlx::query_as::<_, GoalRow>(
        "SELECT g.id, g.exercise_id, e.name AS exercise_name, e.muscle_group,
                g.target_weight, g.target_reps, g.deadline, g.achieved, g.created_at,
                COALESCE((SELECT MAX(weight) FROM workouts WHERE exercise_id = g.exercise_id), 0.0)
                    AS current_max
         FROM goals g JOIN exercises e ON g.exercise_id = e.id
         ORDER BY g.achieved ASC, g.deadline IS NULL, g.deadline ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| GoalStatus {
            progress: progress_percent(row.current_max, row.target_weight),
            id: row.id,
            exercise_id: row.exercise_id,
            exercise_name: row.exercise_name,
            muscle_group: row.muscle_group,
            target_weight: row.target_weight,
            target_reps: row.target_reps,
            deadline: row.deadline,
            achieved: row.achieved,
            current_max: row.current_max,
            created_at: row.created_at,
        })
        .collect())
}

/// Insert a goal with `achieved = false`. Range validation of the targets is
/// the caller-facing layer's job; the store still enforces referential
/// integrity on `exercise_id`.
pub async fn create_goal(pool: &SqlitePool, goal: &NewGoal) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO goals (exercise_id, target_weight, target_reps, deadline)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(goal.exercise_id)
    .bind(goal.target_weight)
    .bind(goal.target_reps)
    .bind(goal.deadline)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Apply exactly the fields present in `update`; absent fields keep their
/// stored value. `deadline: Some(None)` clears the deadline.
pub async fn update_goal(pool: &SqlitePool, goal_id: i64, update: &UpdateGoal) -> Result<()> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE goals SET ");
    let mut any_field = false;
    {
        let mut fields = builder.separated(", ");
        if let Some(exercise_id) = update.exercise_id {
            fields.push("exercise_id = ");
            fields.push_bind_unseparated(exercise_id);
            any_field = true;
        }
        if let Some(target_weight) = update.target_weight {
            fields.push("target_weight = ");
            fields.push_bind_unseparated(target_weight);
            any_field = true;
        }
        if let Some(target_reps) = update.target_reps {
            fields.push("target_reps = ");
            fields.push_bind_unseparated(target_reps);
            any_field = true;
        }
        if let Some(deadline) = update.deadline {
            fields.push("deadline = ");
            fields.push_bind_unseparated(deadline);
            any_field = true;
        }
        if let Some(achieved) = update.achieved {
            fields.push("achieved = ");
            fields.push_bind_unseparated(achieved);
            any_field = true;
        }
    }
    if !any_field {
        return Err(CoreError::validation("no fields to update"));
    }
    builder.push(" WHERE id = ").push_bind(goal_id);

    let result = builder.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("goal"));
    }
    Ok(())
}

pub async fn delete_goal(pool: &SqlitePool, goal_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM goals WHERE id = ?1")
        .bind(goal_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("goal"));
    }
    Ok(())
}
