use crate::{
    CompletionID, ExerciseCompletion, MatchTier, Name, ReadError, SetKind, WorkoutID,
    WorkoutRecord, match_session, normalize,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutSummaryService {
    /// Returns [`ReadError::NotFound`] if the current user has no workout with this id.
    async fn get_workout_summary(&self, workout_id: WorkoutID)
    -> Result<WorkoutSummary, ReadError>;
}

/// Number of records read per history when building a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub workouts: usize,
    pub exercises: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            workouts: 100,
            exercises: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub workout: WorkoutRecord,
    pub tier: Option<MatchTier>,
    pub exercises: Vec<ExerciseSummary>,
}

impl WorkoutSummary {
    #[must_use]
    pub fn has_exercises(&self) -> bool {
        !self.exercises.is_empty()
    }

    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets_completed).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSummary {
    pub id: CompletionID,
    pub name: Name,
    pub muscle_group: String,
    pub is_bodyweight: bool,
    pub sets_completed: u32,
    pub weight: String,
    pub reps: String,
    pub effort: String,
}

impl From<&ExerciseCompletion> for ExerciseSummary {
    fn from(value: &ExerciseCompletion) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            muscle_group: value.muscle_group.clone(),
            is_bodyweight: value.is_bodyweight,
            sets_completed: value.sets_completed,
            weight: normalize(&value.weight, SetKind::Weight, value.is_bodyweight),
            reps: normalize(&value.reps, SetKind::Reps, value.is_bodyweight),
            effort: normalize(&value.difficulty, SetKind::Difficulty, value.is_bodyweight),
        }
    }
}

/// Builds the summary of the workout `workout_id` from both histories.
///
/// Returns `None` if `workouts` does not contain the workout.
#[must_use]
pub fn summarize(
    workout_id: WorkoutID,
    workouts: &[WorkoutRecord],
    completions: &[ExerciseCompletion],
) -> Option<WorkoutSummary> {
    let workout = workouts.iter().find(|w| w.id == workout_id)?;
    let session_match = match_session(workout, completions);
    Some(WorkoutSummary {
        workout: workout.clone(),
        tier: session_match.tier,
        exercises: session_match
            .completions
            .into_iter()
            .map(ExerciseSummary::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{SessionGUID, SetData, Timestamp};

    use super::*;

    static WORKOUTS: std::sync::LazyLock<Vec<WorkoutRecord>> = std::sync::LazyLock::new(|| {
        vec![
            WorkoutRecord {
                id: 8.into(),
                workout_id: 2.into(),
                name: Name::new("Leg Day").unwrap(),
                duration: 50,
                completed_at: Timestamp::new("2024-01-02T18:00:00"),
                comment: None,
                session_guid: None,
            },
            WorkoutRecord {
                id: 7.into(),
                workout_id: 1.into(),
                name: Name::new("Push Day").unwrap(),
                duration: 45,
                completed_at: Timestamp::new("2024-01-01T10:00:00"),
                comment: Some(String::from("Felt strong")),
                session_guid: Some(SessionGUID::new("abc").unwrap()),
            },
        ]
    });

    static COMPLETIONS: std::sync::LazyLock<Vec<ExerciseCompletion>> =
        std::sync::LazyLock::new(|| {
            vec![
                ExerciseCompletion {
                    id: 3.into(),
                    exercise_id: 30.into(),
                    name: Name::new("Squat").unwrap(),
                    muscle_group: String::from("Legs"),
                    is_bodyweight: false,
                    sets_completed: 5,
                    weight: SetData::from(json!([100, 120, 140])),
                    reps: SetData::from(json!([5, 5, 5])),
                    difficulty: SetData::from(json!(["medium", "hard"])),
                    completed_at: Timestamp::new("2024-01-02T17:50:00"),
                    session_guid: None,
                },
                ExerciseCompletion {
                    id: 2.into(),
                    exercise_id: 20.into(),
                    name: Name::new("Plank").unwrap(),
                    muscle_group: String::from("Core"),
                    is_bodyweight: true,
                    sets_completed: 2,
                    weight: SetData::Absent,
                    reps: SetData::from(json!("[45,60]")),
                    difficulty: SetData::from(json!("easy")),
                    completed_at: Timestamp::new("2024-01-01T09:50:00"),
                    session_guid: Some(SessionGUID::new("abc").unwrap()),
                },
                ExerciseCompletion {
                    id: 1.into(),
                    exercise_id: 10.into(),
                    name: Name::new("Bench Press").unwrap(),
                    muscle_group: String::from("Chest"),
                    is_bodyweight: false,
                    sets_completed: 3,
                    weight: SetData::from(json!([135, 145, 135])),
                    reps: SetData::from(json!([null, "NaN"])),
                    difficulty: SetData::from(json!([null])),
                    completed_at: Timestamp::new("2024-01-01T09:30:00"),
                    session_guid: Some(SessionGUID::new("abc").unwrap()),
                },
            ]
        });

    #[test]
    fn test_summarize() {
        assert_eq!(
            summarize(7.into(), &WORKOUTS, &COMPLETIONS),
            Some(WorkoutSummary {
                workout: WORKOUTS[1].clone(),
                tier: Some(MatchTier::SessionGuid),
                exercises: vec![
                    ExerciseSummary {
                        id: 2.into(),
                        name: Name::new("Plank").unwrap(),
                        muscle_group: String::from("Core"),
                        is_bodyweight: true,
                        sets_completed: 2,
                        weight: String::from("No weight recorded"),
                        reps: String::from("45 - 60 seconds"),
                        effort: String::from("easy"),
                    },
                    ExerciseSummary {
                        id: 1.into(),
                        name: Name::new("Bench Press").unwrap(),
                        muscle_group: String::from("Chest"),
                        is_bodyweight: false,
                        sets_completed: 3,
                        weight: String::from("135 - 145 lbs"),
                        reps: String::from("10 reps"),
                        effort: String::from("No effort recorded"),
                    },
                ],
            })
        );
    }

    #[test]
    fn test_summarize_by_time_window() {
        let summary = summarize(8.into(), &WORKOUTS, &COMPLETIONS).unwrap();

        assert_eq!(summary.tier, Some(MatchTier::TimeWindow));
        assert_eq!(
            summary.exercises,
            vec![ExerciseSummary {
                id: 3.into(),
                name: Name::new("Squat").unwrap(),
                muscle_group: String::from("Legs"),
                is_bodyweight: false,
                sets_completed: 5,
                weight: String::from("100 - 140 lbs"),
                reps: String::from("5 reps"),
                effort: String::from("hard, medium"),
            }]
        );
        assert_eq!(summary.total_sets(), 5);
        assert!(summary.has_exercises());
    }

    #[test]
    fn test_summarize_without_exercises() {
        let summary = summarize(8.into(), &WORKOUTS, &[]).unwrap();

        assert_eq!(summary.tier, None);
        assert!(!summary.has_exercises());
        assert_eq!(summary.total_sets(), 0);
    }

    #[test]
    fn test_summarize_not_found() {
        assert_eq!(summarize(9.into(), &WORKOUTS, &COMPLETIONS), None);
        assert_eq!(summarize(7.into(), &[], &COMPLETIONS), None);
    }
}
