use derive_more::{AsRef, Deref, Display};

use crate::{Name, ReadError, Timestamp, UserID};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workout_history(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// Most recent workouts first.
    async fn read_workout_history(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, ReadError>;
}

/// One finished workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    pub workout_id: WorkoutTemplateID,
    pub name: Name,
    /// Minutes.
    pub duration: u32,
    pub completed_at: Timestamp,
    pub comment: Option<String>,
    pub session_guid: Option<SessionGUID>,
}

#[derive(Deref, Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(u64);

impl From<u64> for WorkoutID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Deref, Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutTemplateID(u64);

impl From<u64> for WorkoutTemplateID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier minted when a workout is logged, shared by the workout and all
/// of its exercise completions. Records written before it existed have none.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct SessionGUID(String);

impl SessionGUID {
    pub fn new(value: &str) -> Result<Self, SessionGUIDError> {
        let trimmed_value = value.trim();

        if trimmed_value.is_empty() {
            return Err(SessionGUIDError::Empty);
        }

        Ok(Self(trimmed_value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionGUIDError {
    #[error("Session GUID must not be empty")]
    Empty,
}
