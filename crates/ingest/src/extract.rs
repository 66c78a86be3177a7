use chrono::{DateTime, Utc};
use workout_core::{CALORIES_SLUG, MILES_UNIT, WorkoutRecord};

use crate::provider::UpstreamWorkout;
use crate::types::{IngestIssue, IssueKind};

/// Fields pulled from one upstream workout, defaults already applied.
///
/// `duration_seconds` stays optional here; only [`ExtractedWorkout::into_record`]
/// decides whether the workout can become a stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedWorkout {
    pub workout_id: String,
    pub fitness_discipline: String,
    pub created_at: DateTime<Utc>,
    pub calories: f64,
    pub instructor_name: Option<String>,
    pub duration_seconds: Option<f64>,
    pub distance_miles: f64,
    pub issues: Vec<IngestIssue>,
}

impl ExtractedWorkout {
    /// `None` when the class carried no duration, since the column is required.
    pub fn into_record(self) -> Option<WorkoutRecord> {
        let duration_seconds = self.duration_seconds?;
        Some(WorkoutRecord {
            workout_id: self.workout_id,
            fitness_discipline: self.fitness_discipline,
            created_at: self.created_at,
            calories: Some(self.calories),
            instructor_name: self.instructor_name,
            duration_seconds,
            distance_miles: Some(self.distance_miles),
        })
    }
}

pub fn is_excluded(workout: &UpstreamWorkout, excluded: &[String]) -> bool {
    excluded
        .iter()
        .any(|discipline| *discipline == workout.fitness_discipline)
}

pub fn extract_calories(workout: &UpstreamWorkout) -> Option<f64> {
    workout
        .metrics
        .as_deref()?
        .iter()
        .find(|metric| metric.slug == CALORIES_SLUG)
        .and_then(|metric| metric.value)
}

pub fn extract_distance_miles(workout: &UpstreamWorkout) -> Option<f64> {
    workout
        .metrics
        .as_deref()?
        .iter()
        .find(|metric| metric.unit() == Some(MILES_UNIT))
        .and_then(|metric| metric.value)
}

pub fn extract_instructor_name(workout: &UpstreamWorkout) -> Option<String> {
    workout
        .ride
        .as_ref()?
        .instructor
        .as_ref()?
        .name
        .clone()
}

pub fn extract_duration_seconds(workout: &UpstreamWorkout) -> Option<f64> {
    workout.ride.as_ref()?.duration
}

/// Maps one upstream workout to the stored field set.
///
/// Absent calories and distance become zero, absent instructor and duration stay
/// empty. Each fallback logs a warning and is recorded in `issues`.
pub fn extract_workout(workout: &UpstreamWorkout) -> ExtractedWorkout {
    let mut issues = Vec::new();
    let mut note = |kind: IssueKind, message: &str| {
        tracing::warn!(
            workout_id = %workout.id,
            fitness_discipline = %workout.fitness_discipline,
            "{}",
            message
        );
        issues.push(IngestIssue {
            workout_id: workout.id.clone(),
            fitness_discipline: workout.fitness_discipline.clone(),
            kind,
            message: message.to_string(),
        });
    };

    let calories = extract_calories(workout).unwrap_or_else(|| {
        note(IssueKind::MissingCalories, "workout has no calorie summary metric");
        0.0
    });
    let distance_miles = extract_distance_miles(workout).unwrap_or_else(|| {
        note(IssueKind::MissingDistance, "workout has no distance in miles");
        0.0
    });
    let instructor_name = extract_instructor_name(workout);
    if instructor_name.is_none() {
        note(IssueKind::MissingInstructor, "workout is missing instructor information");
    }
    let duration_seconds = extract_duration_seconds(workout);
    if duration_seconds.is_none() {
        note(IssueKind::MissingDuration, "workout is missing duration information");
    }

    ExtractedWorkout {
        workout_id: workout.id.clone(),
        fitness_discipline: workout.fitness_discipline.clone(),
        created_at: workout.created_at,
        calories,
        instructor_name,
        duration_seconds,
        distance_miles,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Instructor, Ride, SummaryMetric};

    fn metric(slug: &str, value: Option<f64>, unit: Option<&str>) -> SummaryMetric {
        SummaryMetric {
            slug: slug.to_string(),
            value,
            unit: unit.map(str::to_string),
            display_unit: None,
            display_name: None,
        }
    }

    fn full_workout() -> UpstreamWorkout {
        UpstreamWorkout {
            id: "w1".to_string(),
            fitness_discipline: "running".to_string(),
            created_at: DateTime::from_timestamp(1586815217, 0).expect("ts"),
            metrics: Some(vec![
                metric("distance", Some(2.5), Some("mi")),
                metric("elevation", Some(74.0), Some("ft")),
                metric("calories", Some(312.0), Some("kcal")),
            ]),
            ride: Some(Ride {
                duration: Some(1800.0),
                instructor: Some(Instructor {
                    name: Some("Robin".to_string()),
                }),
            }),
        }
    }

    #[test]
    fn extracts_every_field_without_issues() {
        let extracted = extract_workout(&full_workout());
        assert!(extracted.issues.is_empty());
        let record = extracted.into_record().expect("record");
        assert_eq!(record.calories, Some(312.0));
        assert_eq!(record.distance_miles, Some(2.5));
        assert_eq!(record.instructor_name.as_deref(), Some("Robin"));
        assert_eq!(record.duration_seconds, 1800.0);
    }

    #[test]
    fn missing_calorie_metric_defaults_to_zero() {
        let mut workout = full_workout();
        workout.metrics = Some(vec![metric("distance", Some(2.5), Some("mi"))]);
        let extracted = extract_workout(&workout);
        assert_eq!(extracted.calories, 0.0);
        assert_eq!(extracted.issues.len(), 1);
        assert_eq!(extracted.issues[0].kind, IssueKind::MissingCalories);
        assert_eq!(extracted.issues[0].fitness_discipline, "running");
        let record = extracted.into_record().expect("record");
        assert_eq!(record.calories, Some(0.0));
    }

    #[test]
    fn distance_requires_mile_unit() {
        let mut workout = full_workout();
        workout.metrics = Some(vec![
            metric("distance", Some(4.0), Some("km")),
            metric("calories", Some(100.0), Some("kcal")),
        ]);
        let extracted = extract_workout(&workout);
        assert_eq!(extracted.distance_miles, 0.0);
        assert_eq!(extracted.issues[0].kind, IssueKind::MissingDistance);
    }

    #[test]
    fn distance_reads_display_unit_when_unit_is_absent() {
        let mut workout = full_workout();
        let mut distance = metric("distance", Some(3.1), None);
        distance.display_unit = Some("mi".to_string());
        workout.metrics = Some(vec![distance, metric("calories", Some(90.0), Some("kcal"))]);
        let extracted = extract_workout(&workout);
        assert_eq!(extracted.distance_miles, 3.1);
        assert!(extracted.issues.is_empty());
    }

    #[test]
    fn tagged_metric_without_value_counts_as_missing() {
        let mut workout = full_workout();
        workout.metrics = Some(vec![
            metric("calories", None, Some("kcal")),
            metric("distance", Some(1.0), Some("mi")),
        ]);
        assert_eq!(extract_calories(&workout), None);
    }

    #[test]
    fn missing_instructor_is_null() {
        let mut workout = full_workout();
        workout.ride = Some(Ride {
            duration: Some(600.0),
            instructor: None,
        });
        let extracted = extract_workout(&workout);
        assert_eq!(extracted.instructor_name, None);
        assert_eq!(extracted.issues[0].kind, IssueKind::MissingInstructor);
        let record = extracted.into_record().expect("record");
        assert_eq!(record.instructor_name, None);
    }

    #[test]
    fn missing_ride_blocks_record() {
        let mut workout = full_workout();
        workout.metrics = None;
        workout.ride = None;
        let extracted = extract_workout(&workout);
        let kinds: Vec<IssueKind> = extracted.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MissingCalories,
                IssueKind::MissingDistance,
                IssueKind::MissingInstructor,
                IssueKind::MissingDuration,
            ]
        );
        assert!(extracted.into_record().is_none());
    }

    #[test]
    fn excluded_discipline_matches_exactly() {
        let excluded = workout_core::default_excluded_disciplines();
        let mut workout = full_workout();
        assert!(!is_excluded(&workout, &excluded));
        workout.fitness_discipline = "meditation".to_string();
        assert!(is_excluded(&workout, &excluded));
    }
}
