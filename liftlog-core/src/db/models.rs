use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Exercise models
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub muscle_group: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    pub name: String,
    pub muscle_group: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub muscle_group: Option<String>,
}

// Workout models
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub exercise_id: i64,
    pub date: NaiveDate,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Workout row joined with its exercise's name and muscle group.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WorkoutDetail {
    pub id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub muscle_group: String,
    pub date: NaiveDate,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
    pub exercise_id: i64,
    pub date: NaiveDate,
    pub sets: i64,
    pub reps: i64,
    pub weight: f64,
    pub notes: Option<String>,
}

/// Partial update where `None` means "leave the field as it is".
/// `notes` is doubly optional so a caller can clear it explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkout {
    pub exercise_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutFilter {
    pub date: Option<NaiveDate>,
    pub exercise_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// Plan models
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlanExercise {
    pub id: i64,
    pub plan_id: i64,
    pub exercise_id: i64,
    pub target_sets: i64,
    pub target_reps: i64,
    pub order_index: i64,
}

/// Membership row joined with its exercise's name and muscle group.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlanExerciseDetail {
    pub id: i64,
    pub plan_id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub muscle_group: String,
    pub target_sets: i64,
    pub target_reps: i64,
    pub order_index: i64,
}

/// One entry of a plan's target exercise list. When `order_index` is absent
/// or not positive, the entry's 1-based position in the list is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlanExercise {
    pub exercise_id: i64,
    pub target_sets: i64,
    pub target_reps: i64,
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlan {
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<NewPlanExercise>,
}

/// `exercises: Some(list)` replaces the whole membership (an empty list
/// empties the plan); `None` leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Vec<NewPlanExercise>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDetail {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub exercises: Vec<PlanExerciseDetail>,
}

// Goal models
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub exercise_id: i64,
    pub target_weight: f64,
    pub target_reps: i64,
    pub deadline: Option<NaiveDate>,
    pub achieved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub exercise_id: i64,
    pub target_weight: f64,
    pub target_reps: i64,
    pub deadline: Option<NaiveDate>,
}

/// Partial update with explicit field presence. `deadline` is doubly optional
/// so `Some(None)` clears it; `achieved` is only ever set by the caller, the
/// engine never flips it from computed progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGoal {
    pub exercise_id: Option<i64>,
    pub target_weight: Option<f64>,
    pub target_reps: Option<i64>,
    pub deadline: Option<Option<NaiveDate>>,
    pub achieved: Option<bool>,
}
