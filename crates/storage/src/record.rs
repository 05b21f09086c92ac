use gymlog_domain as domain;
use serde_json::Value;
use uuid::Uuid;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("invalid duration: {0}")]
    InvalidDuration(i64),
    #[error(transparent)]
    Name(#[from] domain::NameError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

impl From<&domain::User> for User {
    fn from(value: &domain::User) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
        }
    }
}

impl TryFrom<User> for domain::User {
    type Error = RecordError;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: u64,
    pub workout_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    pub completed_at: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub session_guid: Option<String>,
}

impl From<&domain::WorkoutRecord> for WorkoutRecord {
    fn from(value: &domain::WorkoutRecord) -> Self {
        Self {
            id: *value.id,
            workout_id: *value.workout_id,
            name: Some(value.name.to_string()),
            duration: Some(i64::from(value.duration)),
            completed_at: value.completed_at.to_string(),
            comment: value.comment.clone(),
            session_guid: value.session_guid.as_ref().map(ToString::to_string),
        }
    }
}

impl TryFrom<WorkoutRecord> for domain::WorkoutRecord {
    type Error = RecordError;

    fn try_from(value: WorkoutRecord) -> Result<Self, Self::Error> {
        let duration = value.duration.unwrap_or_default();
        Ok(Self {
            id: value.id.into(),
            workout_id: value.workout_id.into(),
            name: name(value.name.as_deref()),
            duration: u32::try_from(duration).map_err(|_| RecordError::InvalidDuration(duration))?,
            completed_at: domain::Timestamp::new(&value.completed_at),
            comment: value.comment.filter(|c| !c.trim().is_empty()),
            session_guid: session_guid(value.session_guid.as_deref()),
        })
    }
}

/// Stored exercise completion. The per-set fields keep whatever shape the
/// writing app version used.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCompletion {
    pub id: u64,
    pub exercise_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub is_bodyweight: Option<bool>,
    #[serde(default)]
    pub sets_completed: Option<u32>,
    #[serde(default)]
    pub weight_per_set: Value,
    #[serde(default)]
    pub reps_per_set: Value,
    #[serde(default)]
    pub difficulty_per_set: Value,
    pub completed_at: String,
    #[serde(default)]
    pub session_guid: Option<String>,
}

impl From<&domain::ExerciseCompletion> for ExerciseCompletion {
    fn from(value: &domain::ExerciseCompletion) -> Self {
        Self {
            id: *value.id,
            exercise_id: *value.exercise_id,
            name: Some(value.name.to_string()),
            muscle_group: Some(value.muscle_group.clone()),
            is_bodyweight: Some(value.is_bodyweight),
            sets_completed: Some(value.sets_completed),
            weight_per_set: set_data_value(&value.weight),
            reps_per_set: set_data_value(&value.reps),
            difficulty_per_set: set_data_value(&value.difficulty),
            completed_at: value.completed_at.to_string(),
            session_guid: value.session_guid.as_ref().map(ToString::to_string),
        }
    }
}

impl From<ExerciseCompletion> for domain::ExerciseCompletion {
    fn from(value: ExerciseCompletion) -> Self {
        Self {
            id: value.id.into(),
            exercise_id: value.exercise_id.into(),
            name: name(value.name.as_deref()),
            muscle_group: value.muscle_group.unwrap_or_default(),
            is_bodyweight: value.is_bodyweight.unwrap_or(false),
            sets_completed: value.sets_completed.unwrap_or_default(),
            weight: value.weight_per_set.into(),
            reps: value.reps_per_set.into(),
            difficulty: value.difficulty_per_set.into(),
            completed_at: domain::Timestamp::new(&value.completed_at),
            session_guid: session_guid(value.session_guid.as_deref()),
        }
    }
}

/// Missing, null and invalid names are shown as unnamed.
fn name(value: Option<&str>) -> domain::Name {
    value
        .and_then(|name| domain::Name::new(name).ok())
        .unwrap_or_else(domain::Name::unnamed)
}

fn session_guid(value: Option<&str>) -> Option<domain::SessionGUID> {
    value.and_then(|guid| domain::SessionGUID::new(guid).ok())
}

fn set_data_value(value: &domain::SetData) -> Value {
    match value {
        domain::SetData::Sequence(values) => Value::Array(values.clone()),
        domain::SetData::EncodedSequence(text) => Value::String(text.clone()),
        domain::SetData::Scalar(value) => value.clone(),
        domain::SetData::Absent => Value::Null,
    }
}
