//! Typed read/write operations over the exercise catalog and the workout log.
//! No business logic beyond mapping rows to entities; the pool is always
//! passed in by the caller.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::{
    Exercise, NewExercise, NewWorkout, UpdateExercise, UpdateWorkout, Workout, WorkoutDetail,
    WorkoutFilter,
};
use crate::error::{CoreError, Result};

// Exercises
pub async fn list_exercises(
    pool: &SqlitePool,
    muscle_group: Option<&str>,
) -> Result<Vec<Exercise>> {
    let rows = match muscle_group {
        Some(group) => {
            sqlx::query_as::<_, Exercise>(
                "SELECT id, name, muscle_group, created_at FROM exercises
                 WHERE muscle_group = ?1 ORDER BY name",
            )
            .bind(group)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Exercise>(
                "SELECT id, name, muscle_group, created_at FROM exercises
                 ORDER BY muscle_group, name",
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Exercise> {
    sqlx::query_as::<_, Exercise>(
        "SELECT id, name, muscle_group, created_at FROM exercises WHERE id = ?1",
    )
    .bind(exercise_id)
    .fetch_optional(pool)
    .await?
    .ok_or(CoreError::NotFound("exercise"))
}

pub async fn create_exercise(pool: &SqlitePool, exercise: &NewExercise) -> Result<i64> {
    let result = sqlx::query("INSERT INTO exercises (name, muscle_group) VALUES (?1, ?2)")
        .bind(&exercise.name)
        .bind(&exercise.muscle_group)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
    update: &UpdateExercise,
) -> Result<()> {
    if update.name.is_none() && update.muscle_group.is_none() {
        return Err(CoreError::validation("no fields to update"));
    }
    let result = sqlx::query(
        "UPDATE exercises SET name = COALESCE(?1, name),
         muscle_group = COALESCE(?2, muscle_group) WHERE id = ?3",
    )
    .bind(&update.name)
    .bind(&update.muscle_group)
    .bind(exercise_id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("exercise"));
    }
    Ok(())
}

/// Deleting an exercise cascades to its workouts, plan memberships, and goals
/// through the schema's foreign keys.
pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("exercise"));
    }
    Ok(())
}

// Workouts
pub async fn create_workout(pool: &SqlitePool, workout: &NewWorkout) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO workouts (exercise_id, date, sets, reps, weight, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(workout.exercise_id)
    .bind(workout.date)
    .bind(workout.sets)
    .bind(workout.reps)
    .bind(workout.weight)
    .bind(&workout.notes)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_workout(pool: &SqlitePool, workout_id: i64) -> Result<Workout> {
    sqlx::query_as::<_, Workout>(
        "SELECT id, exercise_id, date, sets, reps, weight, notes, created_at
         FROM workouts WHERE id = ?1",
    )
    .bind(workout_id)
    .fetch_optional(pool)
    .await?
    .ok_or(CoreError::NotFound("workout"))
}

pub async fn list_workouts(
    pool: &SqlitePool,
    filter: &WorkoutFilter,
) -> Result<Vec<WorkoutDetail>> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT w.id, w.exercise_id, e.name AS exercise_name, e.muscle_group,
                w.date, w.sets, w.reps, w.weight, w.notes, w.created_at
         FROM workouts w JOIN exercises e ON w.exercise_id = e.id WHERE 1=1",
    );
    if let Some(date) = filter.date {
        builder.push(" AND w.date = ").push_bind(date);
    }
    if let Some(exercise_id) = filter.exercise_id {
        builder.push(" AND w.exercise_id = ").push_bind(exercise_id);
    }
    if let Some(start) = filter.start_date {
        builder.push(" AND w.date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        builder.push(" AND w.date <= ").push_bind(end);
    }
    builder.push(" ORDER BY w.date DESC, w.created_at DESC");

    Ok(builder
        .build_query_as::<WorkoutDetail>()
        .fetch_all(pool)
        .await?)
}

pub async fn update_workout(
    pool: &SqlitePool,
    workout_id: i64,
    update: &UpdateWorkout,
) -> Result<()> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE workouts SET ");
    let mut any_field = false;
    {
        let mut fields = builder.separated(", ");
        if let Some(exercise_id) = update.exercise_id {
            fields.push("exercise_id = ");
            fields.push_bind_unseparated(exercise_id);
            any_field = true;
        }
        if let Some(date) = update.date {
            fields.push("date = ");
            fields.push_bind_unseparated(date);
            any_field = true;
        }
        if let Some(sets) = update.sets {
            fields.push("sets = ");
            fields.push_bind_unseparated(sets);
            any_field = true;
        }
        if let Some(reps) = update.reps {
            fields.push("reps = ");
            fields.push_bind_unseparated(reps);
            any_field = true;
        }
        if let Some(weight) = update.weight {
            fields.push("weight = ");
            fields.push_bind_unseparated(weight);
            any_field = true;
        }
        if let Some(notes) = &update.notes {
            fields.push("notes = ");
            fields.push_bind_unseparated(notes.clone());
            any_field = true;
        }
    }
    if !any_field {
        return Err(CoreError::validation("no fields to update"));
    }
    builder.push(" WHERE id = ").push_bind(workout_id);

    let result = builder.build().execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("workout"));
    }
    Ok(())
}

pub async fn delete_workout(pool: &SqlitePool, workout_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ?1")
        .bind(workout_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("workout"));
    }
    Ok(())
}
