//! Aggregate views over a snapshot of the `workouts` table.
//!
//! Every function here is a pure reduction over `&[WorkoutRecord]`. Null calories and
//! null instructors are left out of sums and counts; nothing is coerced to zero.
//! Date-keyed views read each timestamp at the given calendar offset.

use std::collections::{BTreeMap, HashMap};

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ReferencePeriod, WorkoutRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCategoryTotal {
    pub date: NaiveDate,
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCategoryCount {
    pub date: NaiveDate,
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorCount {
    pub instructor_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationCount {
    pub duration_minutes: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDurationCount {
    pub date: NaiveDate,
    pub duration_minutes: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_workouts: u64,
    pub average_calories_per_day: Option<f64>,
    pub average_calories_per_day_reference: Option<f64>,
    pub reference_period: ReferencePeriod,
}

/// Everything the dashboard page shows, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    pub summary: DashboardSummary,
    pub calories_by_date: Vec<DailyTotal>,
    pub calories_by_date_discipline: Vec<DailyCategoryTotal>,
    pub instructor_counts: Vec<InstructorCount>,
    pub workouts_by_date: Vec<DailyCount>,
    pub workouts_by_date_discipline: Vec<DailyCategoryCount>,
    pub workouts_by_duration: Vec<DurationCount>,
    pub workouts_by_date_duration: Vec<DailyDurationCount>,
}

/// Durations group on whole seconds so float noise cannot split a bucket.
fn duration_key(record: &WorkoutRecord) -> i64 {
    record.duration_seconds.round() as i64
}

fn key_minutes(seconds: i64) -> f64 {
    seconds as f64 / 60.0
}

pub fn calories_by_date(records: &[WorkoutRecord], offset: FixedOffset) -> Vec<DailyTotal> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        let total = buckets.entry(record.date_at(offset)).or_insert(0.0);
        if let Some(calories) = record.calories {
            *total += calories;
        }
    }
    buckets
        .into_iter()
        .map(|(date, value)| DailyTotal { date, value })
        .collect()
}

pub fn calories_by_date_discipline(
    records: &[WorkoutRecord],
    offset: FixedOffset,
) -> Vec<DailyCategoryTotal> {
    let mut buckets: BTreeMap<(NaiveDate, &str), f64> = BTreeMap::new();
    for record in records {
        let total = buckets
            .entry((record.date_at(offset), record.fitness_discipline.as_str()))
            .or_insert(0.0);
        if let Some(calories) = record.calories {
            *total += calories;
        }
    }
    buckets
        .into_iter()
        .map(|((date, category), value)| DailyCategoryTotal {
            date,
            category: category.to_string(),
            value,
        })
        .collect()
}

pub fn mean_daily_total(totals: &[DailyTotal]) -> Option<f64> {
    mean(totals.iter().map(|total| total.value))
}

pub fn mean_daily_total_within(totals: &[DailyTotal], period: &ReferencePeriod) -> Option<f64> {
    mean(
        totals
            .iter()
            .filter(|total| period.contains(total.date))
            .map(|total| total.value),
    )
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Classes per instructor, most frequent first; ties fall back to name order.
pub fn instructor_counts(records: &[WorkoutRecord]) -> Vec<InstructorCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        if let Some(name) = record.instructor_name.as_deref() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<InstructorCount> = counts
        .into_iter()
        .map(|(name, count)| InstructorCount {
            instructor_name: name.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.instructor_name.cmp(&b.instructor_name))
    });
    counts
}

pub fn workouts_by_date(records: &[WorkoutRecord], offset: FixedOffset) -> Vec<DailyCount> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.date_at(offset)).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

pub fn workouts_by_date_discipline(
    records: &[WorkoutRecord],
    offset: FixedOffset,
) -> Vec<DailyCategoryCount> {
    let mut buckets: BTreeMap<(NaiveDate, &str), u64> = BTreeMap::new();
    for record in records {
        *buckets
            .entry((record.date_at(offset), record.fitness_discipline.as_str()))
            .or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|((date, category), count)| DailyCategoryCount {
            date,
            category: category.to_string(),
            count,
        })
        .collect()
}

pub fn workouts_by_duration(records: &[WorkoutRecord]) -> Vec<DurationCount> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(duration_key(record)).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(seconds, count)| DurationCount {
            duration_minutes: key_minutes(seconds),
            count,
        })
        .collect()
}

pub fn workouts_by_date_duration(
    records: &[WorkoutRecord],
    offset: FixedOffset,
) -> Vec<DailyDurationCount> {
    let mut buckets: BTreeMap<(NaiveDate, i64), u64> = BTreeMap::new();
    for record in records {
        *buckets
            .entry((record.date_at(offset), duration_key(record)))
            .or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|((date, seconds), count)| DailyDurationCount {
            date,
            duration_minutes: key_minutes(seconds),
            count,
        })
        .collect()
}

pub fn build_dashboard(
    records: &[WorkoutRecord],
    period: &ReferencePeriod,
    offset: FixedOffset,
) -> DashboardViews {
    let calories_by_date = calories_by_date(records, offset);
    let summary = DashboardSummary {
        total_workouts: records.len() as u64,
        average_calories_per_day: mean_daily_total(&calories_by_date),
        average_calories_per_day_reference: mean_daily_total_within(&calories_by_date, period),
        reference_period: *period,
    };
    DashboardViews {
        summary,
        calories_by_date_discipline: calories_by_date_discipline(records, offset),
        instructor_counts: instructor_counts(records),
        workouts_by_date: workouts_by_date(records, offset),
        workouts_by_date_discipline: workouts_by_date_discipline(records, offset),
        workouts_by_duration: workouts_by_duration(records),
        workouts_by_date_duration: workouts_by_date_duration(records, offset),
        calories_by_date,
    }
}
