use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod views;

pub use views::{
    DashboardSummary, DashboardViews, DailyCategoryCount, DailyCategoryTotal, DailyCount,
    DailyDurationCount, DailyTotal, DurationCount, InstructorCount, build_dashboard,
    calories_by_date, calories_by_date_discipline, instructor_counts, mean_daily_total,
    mean_daily_total_within, workouts_by_date, workouts_by_date_discipline,
    workouts_by_date_duration, workouts_by_duration,
};

/// Discipline dropped before anything reaches the store.
pub const EXCLUDED_DISCIPLINE: &str = "meditation";

/// Summary metric slug carrying the calorie total of a workout.
pub const CALORIES_SLUG: &str = "calories";

/// Unit tag of mile-denominated summary metrics.
pub const MILES_UNIT: &str = "mi";

/// Calendar offsets outside UTC-12:00..=UTC+14:00 are rejected.
pub const MIN_UTC_OFFSET_MINUTES: i32 = -12 * 60;
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

pub const REFERENCE_YEAR: i32 = 2020;
pub const REFERENCE_FIRST_MONTH: u32 = 3;
pub const REFERENCE_LAST_MONTH: u32 = 7;

pub fn default_excluded_disciplines() -> Vec<String> {
    vec![EXCLUDED_DISCIPLINE.to_string()]
}

/// Offset east of UTC that decides which calendar day a workout falls on.
pub fn calendar_offset(minutes_east: i32) -> Option<FixedOffset> {
    if !(MIN_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes_east) {
        return None;
    }
    FixedOffset::east_opt(minutes_east * 60)
}

/// One persisted row of the `workouts` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub workout_id: String,
    pub fitness_discipline: String,
    pub created_at: DateTime<Utc>,
    pub calories: Option<f64>,
    pub instructor_name: Option<String>,
    pub duration_seconds: f64,
    pub distance_miles: Option<f64>,
}

impl WorkoutRecord {
    /// Calendar date used by every date-keyed view, read at `offset`.
    pub fn date_at(&self, offset: FixedOffset) -> NaiveDate {
        self.created_at.with_timezone(&offset).date_naive()
    }
}

/// Inclusive month window inside a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencePeriod {
    pub year: i32,
    pub first_month: u32,
    pub last_month: u32,
}

impl Default for ReferencePeriod {
    fn default() -> Self {
        Self {
            year: REFERENCE_YEAR,
            first_month: REFERENCE_FIRST_MONTH,
            last_month: REFERENCE_LAST_MONTH,
        }
    }
}

impl ReferencePeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && (self.first_month..=self.last_month).contains(&date.month())
    }

    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.first_month)
            && (1..=12).contains(&self.last_month)
            && self.first_month <= self.last_month
    }

    /// Human label such as "March-July 2020".
    pub fn label(&self) -> String {
        format!(
            "{}-{} {}",
            month_name(self.first_month),
            month_name(self.last_month),
            self.year
        )
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}
