use std::env;

use ingest::{JsonExportProvider, WorkoutProvider, extract_workout, is_excluded};
use workout_core::default_excluded_disciplines;

/// Dry run: prints the rows an ingest would store, without touching a database.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: ingest_cli <path|->");
        std::process::exit(2);
    }

    let provider = JsonExportProvider::from_arg(&args[1]);
    let batch = provider.list_workouts().unwrap_or_else(|err| {
        eprintln!("failed to read workouts from {}: {}", args[1], err);
        std::process::exit(1);
    });
    for rejected in &batch.rejected {
        eprintln!(
            "rejected entry {} ({}): {}",
            rejected.index,
            rejected.workout_id.as_deref().unwrap_or("no id"),
            rejected.reason
        );
    }

    let excluded = default_excluded_disciplines();
    for workout in &batch.workouts {
        if is_excluded(workout, &excluded) {
            eprintln!("excluded {} ({})", workout.id, workout.fitness_discipline);
            continue;
        }
        let extracted = extract_workout(workout);
        for issue in &extracted.issues {
            eprintln!("issue {} {}: {}", issue.workout_id, issue.fitness_discipline, issue.message);
        }
        match extracted.into_record() {
            Some(record) => match serde_json::to_string(&record) {
                Ok(line) => println!("{}", line),
                Err(err) => {
                    eprintln!("failed to serialize {}: {}", record.workout_id, err);
                    std::process::exit(1);
                }
            },
            None => eprintln!("skipped {} (no duration)", workout.id),
        }
    }
}
