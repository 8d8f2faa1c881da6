mod common;

use common::{insert_exercise, test_pool};
use liftlog::db::models::{NewPlan, NewPlanExercise, UpdatePlan};
use liftlog::error::CoreError;
use liftlog::plans::{create_plan, delete_plan, get_plan, list_plans, update_plan};

fn entry(exercise_id: i64, sets: i64, reps: i64, order_index: Option<i64>) -> NewPlanExercise {
    NewPlanExercise {
        exercise_id,
        target_sets: sets,
        target_reps: reps,
        order_index,
    }
}

#[tokio::test]
async fn create_plan_assigns_sequential_order() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;
    let row = insert_exercise(&pool, "Bent-Over Row", "Back").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Push/Pull".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, None), entry(row, 3, 8, None)],
        },
    )
    .await
    .unwrap();

    let plan = get_plan(&pool, plan_id).await.unwrap();
    assert_eq!(plan.exercises.len(), 2);
    assert_eq!(plan.exercises[0].exercise_id, bench);
    assert_eq!(plan.exercises[0].order_index, 1);
    assert_eq!(plan.exercises[1].exercise_id, row);
    assert_eq!(plan.exercises[1].order_index, 2);
}

#[tokio::test]
async fn create_plan_respects_explicit_order() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;
    let row = insert_exercise(&pool, "Bent-Over Row", "Back").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Reversed".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, Some(2)), entry(row, 3, 8, Some(1))],
        },
    )
    .await
    .unwrap();

    let plan = get_plan(&pool, plan_id).await.unwrap();
    assert_eq!(plan.exercises[0].exercise_id, row);
    assert_eq!(plan.exercises[1].exercise_id, bench);
}

#[tokio::test]
async fn replace_membership_is_exact() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;
    let row = insert_exercise(&pool, "Bent-Over Row", "Back").await;
    let squat = insert_exercise(&pool, "Squat", "Legs").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Full Body".into(),
            description: Some("original".into()),
            exercises: vec![entry(bench, 3, 5, None), entry(row, 3, 8, None)],
        },
    )
    .await
    .unwrap();

    update_plan(
        &pool,
        plan_id,
        &UpdatePlan {
            name: None,
            description: None,
            exercises: Some(vec![entry(squat, 5, 5, None)]),
        },
    )
    .await
    .unwrap();

    let plan = get_plan(&pool, plan_id).await.unwrap();
    assert_eq!(plan.name, "Full Body");
    assert_eq!(plan.description.as_deref(), Some("original"));
    assert_eq!(plan.exercises.len(), 1);
    assert_eq!(plan.exercises[0].exercise_id, squat);
    assert_eq!(plan.exercises[0].order_index, 1);
}

#[tokio::test]
async fn empty_list_empties_the_plan() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Shrinking".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, None)],
        },
    )
    .await
    .unwrap();

    update_plan(
        &pool,
        plan_id,
        &UpdatePlan {
            exercises: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let plan = get_plan(&pool, plan_id).await.unwrap();
    assert!(plan.exercises.is_empty());
}

#[tokio::test]
async fn membership_untouched_without_exercise_list() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Old Name".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, None)],
        },
    )
    .await
    .unwrap();

    update_plan(
        &pool,
        plan_id,
        &UpdatePlan {
            name: Some("New Name".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let plan = get_plan(&pool, plan_id).await.unwrap();
    assert_eq!(plan.name, "New Name");
    assert_eq!(plan.exercises.len(), 1);
}

#[tokio::test]
async fn update_missing_plan_is_not_found() {
    let pool = test_pool().await;
    let err = update_plan(
        &pool,
        42,
        &UpdatePlan {
            name: Some("nobody".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn failed_create_leaves_no_rows_behind() {
    let pool = test_pool().await;

    // Second entry references a missing exercise, so the insert fails after
    // the plan row and the first membership row were already written.
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;
    let err = create_plan(
        &pool,
        &NewPlan {
            name: "Doomed".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, None), entry(9999, 3, 8, None)],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::Persistence(_)));

    assert!(list_plans(&pool).await.unwrap().is_empty());
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plan_exercises")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn failed_replace_keeps_prior_membership() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Stable".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, None)],
        },
    )
    .await
    .unwrap();

    let err = update_plan(
        &pool,
        plan_id,
        &UpdatePlan {
            exercises: Some(vec![entry(9999, 3, 8, None)]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::Persistence(_)));

    let plan = get_plan(&pool, plan_id).await.unwrap();
    assert_eq!(plan.exercises.len(), 1);
    assert_eq!(plan.exercises[0].exercise_id, bench);
}

#[tokio::test]
async fn delete_plan_cascades_membership() {
    let pool = test_pool().await;
    let bench = insert_exercise(&pool, "Bench Press", "Chest").await;

    let plan_id = create_plan(
        &pool,
        &NewPlan {
            name: "Short-lived".into(),
            description: None,
            exercises: vec![entry(bench, 3, 5, None)],
        },
    )
    .await
    .unwrap();

    delete_plan(&pool, plan_id).await.unwrap();

    let err = get_plan(&pool, plan_id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM plan_exercises")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn delete_missing_plan_is_not_found() {
    let pool = test_pool().await;
    let err = delete_plan(&pool, 7).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}
