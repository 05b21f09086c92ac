use derive_more::{Deref, Display};

use crate::{Name, ReadError, SessionGUID, SetData, Timestamp, UserID};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercise_history(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<ExerciseCompletion>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    /// Most recent completions first.
    async fn read_exercise_history(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<ExerciseCompletion>, ReadError>;
}

/// One exercise logged as part of some workout.
///
/// The per-set fields should have `sets_completed` entries each, but legacy
/// data does not always hold to that.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseCompletion {
    pub id: CompletionID,
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub muscle_group: String,
    pub is_bodyweight: bool,
    pub sets_completed: u32,
    pub weight: SetData,
    pub reps: SetData,
    pub difficulty: SetData,
    pub completed_at: Timestamp,
    pub session_guid: Option<SessionGUID>,
}

#[derive(Deref, Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompletionID(u64);

impl From<u64> for CompletionID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Deref, Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(u64);

impl From<u64> for ExerciseID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
