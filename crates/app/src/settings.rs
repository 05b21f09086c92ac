use gymlog_domain::HistoryLimits;
use log::warn;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;

    /// History limits to pass to [`gymlog_domain::Service::with_history_limits`].
    async fn get_history_limits(&self) -> HistoryLimits {
        match self.get_settings().await {
            Ok(settings) => settings.into(),
            Err(err) => {
                warn!("using default history limits: {err}");
                HistoryLimits::default()
            }
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub workout_history_limit: usize,
    pub exercise_history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let limits = HistoryLimits::default();
        Self {
            workout_history_limit: limits.workouts,
            exercise_history_limit: limits.exercises,
        }
    }
}

impl From<Settings> for HistoryLimits {
    fn from(value: Settings) -> Self {
        Self {
            workouts: value.workout_history_limit,
            exercises: value.exercise_history_limit,
        }
    }
}
