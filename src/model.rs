//src/model.rs
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// Names served by the exercise catalog endpoint.
pub type ExerciseName = String;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kgs,
}

// Parse the form/wire spelling
impl TryFrom<&str> for WeightUnit {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "lbs" => Ok(WeightUnit::Lbs),
            "kgs" => Ok(WeightUnit::Kgs),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Kgs => write!(f, "kgs"),
        }
    }
}

/// Identifier assigned by the remote store. The client never interprets it,
/// it only echoes it back in delete requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        WorkoutId(value.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        WorkoutId(value)
    }
}

impl From<i64> for WorkoutId {
    fn from(value: i64) -> Self {
        WorkoutId(value.to_string())
    }
}

// The store may hand out integer keys or string keys
impl<'de> Deserialize<'de> for WorkoutId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => WorkoutId::from(n),
            RawId::Text(s) => WorkoutId(s),
        })
    }
}

/// A workout as returned by `GET /workouts`. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: WorkoutId,
    pub exercise: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub reps: u32,
    pub rpe: f64,
    pub tempo: String,
    #[serde(deserialize_with = "deserialize_server_timestamp")]
    pub date: DateTime<Utc>,
}

/// Normalized draft, sent as the body of `POST /workouts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutCandidate {
    pub exercise: String,
    #[serde(rename = "customExercise", skip_serializing_if = "Option::is_none")]
    pub custom_exercise: Option<String>,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub reps: u32,
    pub rpe: f64,
    pub tempo: String,
}

/// Parses either an RFC 3339 timestamp or a naive ISO-8601 one. Naive values
/// are taken as UTC, which is how the backend stores creation times.
pub fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_server_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_server_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}
