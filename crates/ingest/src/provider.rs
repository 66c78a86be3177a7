//! Upstream workout payloads and the seam the ingest job pulls them through.
//!
//! The workout service itself is an external collaborator. What the pipeline needs
//! is "list every workout for the user"; [`WorkoutProvider`] is that contract and
//! [`JsonExportProvider`] serves it from an exported list on disk or stdin.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ProviderError, RejectedWorkout};

/// One completed workout as the provider reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamWorkout {
    pub id: String,
    pub fitness_discipline: String,
    /// Epoch seconds or an RFC 3339 string.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metrics: Option<Vec<SummaryMetric>>,
    #[serde(default)]
    pub ride: Option<Ride>,
}

/// A tagged measurement such as `{"slug": "calories", "value": 312, "unit": "kcal"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetric {
    pub slug: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl SummaryMetric {
    /// `unit` when present, otherwise `display_unit`.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref().or(self.display_unit.as_deref())
    }
}

/// The class (or ride) a workout was taken from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub instructor: Option<Instructor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(default)]
    pub name: Option<String>,
}

/// The provider's workout list, split into readable workouts and rejected entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutBatch {
    pub workouts: Vec<UpstreamWorkout>,
    pub rejected: Vec<RejectedWorkout>,
}

impl From<Vec<UpstreamWorkout>> for WorkoutBatch {
    fn from(workouts: Vec<UpstreamWorkout>) -> Self {
        Self {
            workouts,
            rejected: Vec::new(),
        }
    }
}

pub trait WorkoutProvider {
    fn list_workouts(&self) -> Result<WorkoutBatch, ProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSource {
    File(PathBuf),
    Stdin,
}

/// Reads a workout list exported from the provider.
#[derive(Debug, Clone)]
pub struct JsonExportProvider {
    source: ExportSource,
}

impl JsonExportProvider {
    pub fn new(source: ExportSource) -> Self {
        Self { source }
    }

    /// `-` means stdin, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::new(ExportSource::Stdin)
        } else {
            Self::new(ExportSource::File(PathBuf::from(arg)))
        }
    }

    pub fn source(&self) -> &ExportSource {
        &self.source
    }
}

impl WorkoutProvider for JsonExportProvider {
    fn list_workouts(&self) -> Result<WorkoutBatch, ProviderError> {
        match &self.source {
            ExportSource::File(path) => {
                let file = File::open(path)?;
                workouts_from_reader(BufReader::new(file))
            }
            ExportSource::Stdin => workouts_from_reader(io::stdin().lock()),
        }
    }
}

/// Accepts either a bare array of workouts or a list page with a `data` array.
///
/// Only a payload that is not JSON or has no workout list fails outright. Entries
/// that do not read as a workout are returned in [`WorkoutBatch::rejected`].
pub fn workouts_from_reader<R: Read>(reader: R) -> Result<WorkoutBatch, ProviderError> {
    let value: Value = serde_json::from_reader(reader)?;
    workouts_from_value(value)
}

pub fn workouts_from_str(payload: &str) -> Result<WorkoutBatch, ProviderError> {
    let value: Value = serde_json::from_str(payload)?;
    workouts_from_value(value)
}

fn workouts_from_value(value: Value) -> Result<WorkoutBatch, ProviderError> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut page) => match page.remove("data") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ProviderError::InvalidPayload(
                    "`data` is not an array".to_string(),
                ));
            }
            None => {
                return Err(ProviderError::InvalidPayload(
                    "object payload has no `data` array".to_string(),
                ));
            }
        },
        _ => {
            return Err(ProviderError::InvalidPayload(
                "expected a workout array or a page object".to_string(),
            ));
        }
    };

    let mut batch = WorkoutBatch::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let workout_id = entry.get("id").and_then(Value::as_str).map(str::to_string);
        match serde_json::from_value::<UpstreamWorkout>(entry) {
            Ok(workout) => batch.workouts.push(workout),
            Err(err) => {
                tracing::warn!(
                    index,
                    workout_id = workout_id.as_deref().unwrap_or("<none>"),
                    error = %err,
                    "skipping unreadable workout entry"
                );
                batch.rejected.push(RejectedWorkout {
                    index,
                    workout_id,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(batch)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Fractional(f64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Seconds(seconds) => DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}"))),
        // Sub-second precision is dropped; stored timestamps are whole seconds.
        RawTimestamp::Fractional(seconds) if seconds.is_finite() => {
            DateTime::from_timestamp(seconds.trunc() as i64, 0)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}")))
        }
        RawTimestamp::Fractional(seconds) => Err(de::Error::custom(format!(
            "timestamp is not a finite number: {seconds}"
        ))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|value| value.with_timezone(&Utc))
            .map_err(de::Error::custom),
    }
}
