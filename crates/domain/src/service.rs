use log::{debug, error};

use crate::{
    ExerciseCompletion, ExerciseRepository, ExerciseService, HistoryLimits, ReadError,
    SessionRepository, SessionService, User, UserID, WorkoutID, WorkoutRecord, WorkoutRepository,
    WorkoutService, WorkoutSummary, WorkoutSummaryService, summarize,
};

pub struct Service<R> {
    repository: R,
    limits: HistoryLimits,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            limits: HistoryLimits::default(),
        }
    }

    #[must_use]
    pub fn with_history_limits(mut self, limits: HistoryLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn history_limits(&self) -> HistoryLimits {
        self.limits
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn get_current_user(&self) -> Result<Option<User>, ReadError> {
        log_on_error!(
            self.repository.read_current_user(),
            ReadError,
            "get",
            "current user"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workout_history(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, ReadError> {
        log_on_error!(
            self.repository.read_workout_history(user_id, limit),
            ReadError,
            "get",
            "workout history"
        )
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercise_history(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<ExerciseCompletion>, ReadError> {
        log_on_error!(
            self.repository.read_exercise_history(user_id, limit),
            ReadError,
            "get",
            "exercise history"
        )
    }
}

impl<R> WorkoutSummaryService for Service<R>
where
    R: SessionRepository + WorkoutRepository + ExerciseRepository,
{
    async fn get_workout_summary(
        &self,
        workout_id: WorkoutID,
    ) -> Result<WorkoutSummary, ReadError> {
        let user_id = self.get_current_user_id().await;
        let workouts = self
            .get_workout_history(user_id, self.limits.workouts)
            .await?;
        let completions = self
            .get_exercise_history(user_id, self.limits.exercises)
            .await?;
        let summary = summarize(workout_id, &workouts, &completions).ok_or(ReadError::NotFound)?;
        match summary.tier {
            Some(tier) => debug!(
                "matched {} exercises to workout {workout_id} by {tier}",
                summary.exercises.len()
            ),
            None => debug!("found no exercises for workout {workout_id}"),
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{MatchTier, Name, SessionGUID, SetData, StorageError, Timestamp};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        user: Option<User>,
        workouts: Vec<WorkoutRecord>,
        completions: Vec<ExerciseCompletion>,
        fail_exercises: bool,
        requests: RefCell<Vec<(&'static str, UserID, usize)>>,
    }

    impl SessionRepository for FakeRepository {
        async fn read_current_user(&self) -> Result<Option<User>, ReadError> {
            Ok(self.user.clone())
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workout_history(
            &self,
            user_id: UserID,
            limit: usize,
        ) -> Result<Vec<WorkoutRecord>, ReadError> {
            self.requests
                .borrow_mut()
                .push(("workouts", user_id, limit));
            Ok(self.workouts.iter().take(limit).cloned().collect())
        }
    }

    impl ExerciseRepository for FakeRepository {
        async fn read_exercise_history(
            &self,
            user_id: UserID,
            limit: usize,
        ) -> Result<Vec<ExerciseCompletion>, ReadError> {
            self.requests
                .borrow_mut()
                .push(("exercises", user_id, limit));
            if self.fail_exercises {
                return Err(StorageError::NoConnection.into());
            }
            Ok(self.completions.iter().take(limit).cloned().collect())
        }
    }

    fn repository() -> FakeRepository {
        FakeRepository {
            user: Some(User {
                id: 1.into(),
                name: Name::new("Alice").unwrap(),
            }),
            workouts: vec![WorkoutRecord {
                id: 7.into(),
                workout_id: 1.into(),
                name: Name::new("Push Day").unwrap(),
                duration: 45,
                completed_at: Timestamp::new("2024-01-01T10:00:00"),
                comment: None,
                session_guid: Some(SessionGUID::new("abc").unwrap()),
            }],
            completions: vec![ExerciseCompletion {
                id: 1.into(),
                exercise_id: 10.into(),
                name: Name::new("Bench Press").unwrap(),
                muscle_group: String::from("Chest"),
                is_bodyweight: false,
                sets_completed: 2,
                weight: SetData::from(json!("[135,135]")),
                reps: SetData::from(json!([8, 6])),
                difficulty: SetData::from(json!(["hard", "hard"])),
                completed_at: Timestamp::new("2024-01-02T03:00:00"),
                session_guid: Some(SessionGUID::new("abc").unwrap()),
            }],
            ..FakeRepository::default()
        }
    }

    #[tokio::test]
    async fn test_get_workout_summary() {
        let service = Service::new(repository());

        let summary = service.get_workout_summary(7.into()).await.unwrap();

        assert_eq!(summary.tier, Some(MatchTier::SessionGuid));
        assert_eq!(summary.exercises.len(), 1);
        assert_eq!(summary.exercises[0].weight, "135 lbs");
        assert_eq!(summary.exercises[0].reps, "6 - 8 reps");
        assert_eq!(summary.exercises[0].effort, "hard");
        assert_eq!(
            *service.repository.requests.borrow(),
            vec![
                ("workouts", UserID::from(1), 100),
                ("exercises", UserID::from(1), 1000)
            ]
        );
    }

    #[tokio::test]
    async fn test_get_workout_summary_not_found() {
        let service = Service::new(repository());

        assert!(matches!(
            service.get_workout_summary(8.into()).await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_workout_summary_without_user() {
        let service = Service::new(FakeRepository {
            user: None,
            ..repository()
        })
        .with_history_limits(HistoryLimits {
            workouts: 10,
            exercises: 20,
        });

        assert!(service.get_workout_summary(7.into()).await.is_ok());
        assert_eq!(
            *service.repository.requests.borrow(),
            vec![
                ("workouts", UserID::nil(), 10),
                ("exercises", UserID::nil(), 20)
            ]
        );
    }

    #[tokio::test]
    async fn test_get_workout_summary_storage_error() {
        let service = Service::new(FakeRepository {
            fail_exercises: true,
            ..repository()
        });

        assert!(matches!(
            service.get_workout_summary(7.into()).await,
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
    }

    #[test]
    fn test_history_limits() {
        let service = Service::new(repository());
        assert_eq!(service.history_limits(), HistoryLimits::default());

        let limits = HistoryLimits {
            workouts: 1,
            exercises: 2,
        };
        assert_eq!(
            service.with_history_limits(limits).history_limits(),
            limits
        );
    }
}
