use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use liftlog::db;
use liftlog::db::models::{
    NewExercise, NewGoal, NewPlan, NewPlanExercise, NewWorkout, UpdateExercise, UpdateGoal,
    UpdatePlan, UpdateWorkout, WorkoutFilter,
};
use liftlog::db::operations::{
    create_exercise, create_workout, delete_exercise, delete_workout, list_exercises,
    list_workouts, update_exercise, update_workout,
};
use liftlog::goals::{create_goal, delete_goal, list_goals, update_goal};
use liftlog::plans::{create_plan, delete_plan, get_plan, list_plans, update_plan};
use liftlog::stats::{Period, exercise_stats, personal_records, volume_stats};

#[derive(Parser, Debug)]
#[command(version, about = "liftlog - resistance training log", long_about = None)]
struct Cli {
    /// Database file; falls back to DATABASE_URL, then ./liftlog.db
    #[arg(long)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the exercise catalog
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Log and inspect workouts
    Workout {
        #[command(subcommand)]
        command: WorkoutCommands,
    },
    /// Manage training plans
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage progress goals
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Derived statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ExerciseCommands {
    List {
        #[arg(long)]
        muscle_group: Option<String>,
    },
    Add {
        name: String,
        muscle_group: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        muscle_group: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum WorkoutCommands {
    Log {
        exercise_id: i64,
        date: NaiveDate,
        sets: i64,
        reps: i64,
        weight: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        exercise_id: Option<i64>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    Update {
        id: i64,
        #[arg(long)]
        exercise_id: Option<i64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        sets: Option<i64>,
        #[arg(long)]
        reps: Option<i64>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        clear_notes: bool,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum PlanCommands {
    List,
    Show {
        id: i64,
    },
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Repeatable: EXERCISE_ID:SETS:REPS[:ORDER]
        #[arg(long = "exercise", value_parser = parse_plan_entry)]
        exercises: Vec<NewPlanExercise>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Repeatable: EXERCISE_ID:SETS:REPS[:ORDER]; replaces the whole list
        #[arg(long = "exercise", value_parser = parse_plan_entry)]
        exercises: Option<Vec<NewPlanExercise>>,
        /// Replace the membership with an empty list
        #[arg(long, conflicts_with = "exercises")]
        clear_exercises: bool,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum GoalCommands {
    List,
    Add {
        exercise_id: i64,
        target_weight: f64,
        target_reps: i64,
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    Update {
        id: i64,
        #[arg(long)]
        exercise_id: Option<i64>,
        #[arg(long)]
        target_weight: Option<f64>,
        #[arg(long)]
        target_reps: Option<i64>,
        #[arg(long)]
        deadline: Option<NaiveDate>,
        #[arg(long, conflicts_with = "deadline")]
        clear_deadline: bool,
        #[arg(long)]
        achieved: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum StatsCommands {
    Exercise {
        id: i64,
    },
    Volume {
        /// week, month, or year
        #[arg(long, default_value = "week")]
        period: String,
    },
    Records,
}

fn parse_plan_entry(s: &str) -> Result<NewPlanExercise, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(format!("expected EXERCISE_ID:SETS:REPS[:ORDER], got `{s}`"));
    }
    let parse = |field: &str, value: &str| -> Result<i64, String> {
        value
            .parse::<i64>()
            .map_err(|e| format!("bad {field} `{value}`: {e}"))
    };
    Ok(NewPlanExercise {
        exercise_id: parse("exercise id", parts[0])?,
        target_sets: parse("sets", parts[1])?,
        target_reps: parse("reps", parts[2])?,
        order_index: match parts.get(3) {
            Some(order) => Some(parse("order", order)?),
            None => None,
        },
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, pool: &sqlx::SqlitePool) -> Result<()> {
    match cli.command {
        Commands::Exercise { command } => match command {
            ExerciseCommands::List { muscle_group } => {
                let exercises = list_exercises(pool, muscle_group.as_deref()).await?;
                print_json(&exercises)?;
            }
            ExerciseCommands::Add { name, muscle_group } => {
                let id = create_exercise(pool, &NewExercise { name, muscle_group }).await?;
                println!("created exercise {id}");
            }
            ExerciseCommands::Update {
                id,
                name,
                muscle_group,
            } => {
                update_exercise(pool, id, &UpdateExercise { name, muscle_group }).await?;
                println!("updated exercise {id}");
            }
            ExerciseCommands::Delete { id } => {
                delete_exercise(pool, id).await?;
                println!("deleted exercise {id}");
            }
        },
        Commands::Workout { command } => match command {
            WorkoutCommands::Log {
                exercise_id,
                date,
                sets,
                reps,
                weight,
                notes,
            } => {
                let id = create_workout(
                    pool,
                    &NewWorkout {
                        exercise_id,
                        date,
                        sets,
                        reps,
                        weight,
                        notes,
                    },
                )
                .await?;
                println!("logged workout {id}");
            }
            WorkoutCommands::List {
                date,
                exercise_id,
                start,
                end,
            } => {
                let workouts = list_workouts(
                    pool,
                    &WorkoutFilter {
                        date,
                        exercise_id,
                        start_date: start,
                        end_date: end,
                    },
                )
                .await?;
                print_json(&workouts)?;
            }
            WorkoutCommands::Update {
                id,
                exercise_id,
                date,
                sets,
                reps,
                weight,
                notes,
                clear_notes,
            } => {
                let notes = if clear_notes { Some(None) } else { notes.map(Some) };
                update_workout(
                    pool,
                    id,
                    &UpdateWorkout {
                        exercise_id,
                        date,
                        sets,
                        reps,
                        weight,
                        notes,
                    },
                )
                .await?;
                println!("updated workout {id}");
            }
            WorkoutCommands::Delete { id } => {
                delete_workout(pool, id).await?;
                println!("deleted workout {id}");
            }
        },
        Commands::Plan { command } => match command {
            PlanCommands::List => {
                let plans = list_plans(pool).await?;
                print_json(&plans)?;
            }
            PlanCommands::Show { id } => {
                let plan = get_plan(pool, id).await?;
                print_json(&plan)?;
            }
            PlanCommands::Create {
                name,
                description,
                exercises,
            } => {
                let id = create_plan(
                    pool,
                    &NewPlan {
                        name,
                        description,
                        exercises,
                    },
                )
                .await?;
                println!("created plan {id}");
            }
            PlanCommands::Update {
                id,
                name,
                description,
                exercises,
                clear_exercises,
            } => {
                let exercises = if clear_exercises { Some(vec![]) } else { exercises };
                update_plan(
                    pool,
                    id,
                    &UpdatePlan {
                        name,
                        description,
                        exercises,
                    },
                )
                .await?;
                println!("updated plan {id}");
            }
            PlanCommands::Delete { id } => {
                delete_plan(pool, id).await?;
                println!("deleted plan {id}");
            }
        },
        Commands::Goal { command } => match command {
            GoalCommands::List => {
                let goals = list_goals(pool).await?;
                print_json(&goals)?;
            }
            GoalCommands::Add {
                exercise_id,
                target_weight,
                target_reps,
                deadline,
            } => {
                let id = create_goal(
                    pool,
                    &NewGoal {
                        exercise_id,
                        target_weight,
                        target_reps,
                        deadline,
                    },
                )
                .await?;
                println!("created goal {id}");
            }
            GoalCommands::Update {
                id,
                exercise_id,
                target_weight,
                target_reps,
                deadline,
                clear_deadline,
                achieved,
            } => {
                let deadline = if clear_deadline {
                    Some(None)
                } else {
                    deadline.map(Some)
                };
                update_goal(
                    pool,
                    id,
                    &UpdateGoal {
                        exercise_id,
                        target_weight,
                        target_reps,
                        deadline,
                        achieved,
                    },
                )
                .await?;
                println!("updated goal {id}");
            }
            GoalCommands::Delete { id } => {
                delete_goal(pool, id).await?;
                println!("deleted goal {id}");
            }
        },
        Commands::Stats { command } => match command {
            StatsCommands::Exercise { id } => {
                let stats = exercise_stats(pool, id).await?;
                print_json(&stats)?;
            }
            StatsCommands::Volume { period } => {
                let stats = volume_stats(pool, Period::parse(&period)).await?;
                print_json(&stats)?;
            }
            StatsCommands::Records => {
                let records = personal_records(pool).await?;
                print_json(&records)?;
            }
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let db_path = cli
        .db
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "liftlog.db".to_string());

    let pool = db::connect(&db_path).await?;
    db::init_database(&pool).await?;
    db::seed_default_exercises(&pool).await?;

    run(cli, &pool).await?;
    Ok(())
}
