//! Plan lifecycle: creation, wholesale membership replacement, deletion.
//!
//! A plan's exercise list is replaced, never diffed: the caller always hands
//! over the full target list, so every replacement deletes the prior rows and
//! inserts the new ones in a single transaction. Readers never observe a
//! half-replaced membership.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::db::models::{NewPlan, NewPlanExercise, Plan, PlanDetail, PlanExerciseDetail, UpdatePlan};
use crate::error::{CoreError, Result};

/// Caller-supplied positive order wins; anything else gets the 1-based
/// position of the entry in the input list.
fn order_index_for(entry: &NewPlanExercise, position: usize) -> i64 {
    match entry.order_index {
        Some(order) if order > 0 => order,
        _ => position as i64 + 1,
    }
}

async fn insert_membership(
    tx: &mut Transaction<'_, Sqlite>,
    plan_id: i64,
    entries: &[NewPlanExercise],
) -> Result<()> {
    for (position, entry) in entries.iter().enumerate() {
        sqlx::query(
            "INSERT INTO plan_exercises (plan_id, exercise_id, target_sets, target_reps, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(plan_id)
        .bind(entry.exercise_id)
        .bind(entry.target_sets)
        .bind(entry.target_reps)
        .bind(order_index_for(entry, position))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Insert the plan row and its whole membership atomically. On any failure
/// the transaction rolls back and no rows are left behind.
pub async fn create_plan(pool: &SqlitePool, plan: &NewPlan) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO plans (name, description) VALUES (?1, ?2)")
        .bind(&plan.name)
        .bind(&plan.description)
        .execute(&mut *tx)
        .await?;
    let plan_id = result.last_insert_rowid();

    insert_membership(&mut tx, plan_id, &plan.exercises).await?;

    tx.commit().await?;
    Ok(plan_id)
}

/// Patch name/description and, when a new exercise list is supplied, replace
/// the entire membership in the same transaction. The rows-affected outcome
/// of the patch doubles as the existence check, no pre-read.
pub async fn update_plan(pool: &SqlitePool, plan_id: i64, update: &UpdatePlan) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE plans SET name = COALESCE(?1, name),
         description = COALESCE(?2, description) WHERE id = ?3",
    )
    .bind(&update.name)
    .bind(&update.description)
    .bind(plan_id)
    .execute(&mut *tx)
    .await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("plan"));
    }

    if let Some(exercises) = &update.exercises {
        sqlx::query("DELETE FROM plan_exercises WHERE plan_id = ?1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;
        insert_membership(&mut tx, plan_id, exercises).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Membership rows go with the plan via the schema's cascade.
pub async fn delete_plan(pool: &SqlitePool, plan_id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM plans WHERE id = ?1")
        .bind(plan_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CoreError::NotFound("plan"));
    }
    Ok(())
}

pub async fn get_plan(pool: &SqlitePool, plan_id: i64) -> Result<PlanDetail> {
    let mut tx = pool.begin().await?;

    let plan = sqlx::query_as::<_, Plan>(
        "SELECT id, name, description, created_at FROM plans WHERE id = ?1",
    )
    .bind(plan_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(CoreError::NotFound("plan"))?;

    let exercises = sqlx::query_as::<_, PlanExerciseDetail>(
        "SELECT pe.id, pe.plan_id, pe.exercise_id, e.name AS exercise_name, e.muscle_group,
                pe.target_sets, pe.target_reps, pe.order_index
         FROM plan_exercises pe JOIN exercises e ON pe.exercise_id = e.id
         WHERE pe.plan_id = ?1 ORDER BY pe.order_index",
    )
    .bind(plan_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(PlanDetail {
        id: plan.id,
        name: plan.name,
        description: plan.description,
        created_at: plan.created_at,
        exercises,
    })
}

pub async fn list_plans(pool: &SqlitePool) -> Result<Vec<Plan>> {
    Ok(sqlx::query_as::<_, Plan>(
        "SELECT id, name, description, created_at FROM plans ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}
