use std::{
    cmp::Reverse,
    collections::{BTreeMap, VecDeque},
    fs, io,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use gymlog_app::{Settings, SettingsRepository, log as app_log};
use gymlog_domain as domain;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum::AsRefStr;

use crate::record::{ExerciseCompletion, User, WorkoutRecord};

/// Key-value store holding every entry as JSON text, in the layout written by
/// the mobile app.
#[derive(Default)]
pub struct LocalStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

#[derive(AsRefStr)]
enum Key {
    #[strum(serialize = "currentUser")]
    CurrentUser,
    #[strum(serialize = "workoutHistory")]
    WorkoutHistory,
    #[strum(serialize = "exerciseHistory")]
    ExerciseHistory,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

fn user_key(key: &Key, user_id: domain::UserID) -> String {
    format!("{}:{user_id}", key.as_ref())
}

#[derive(thiserror::Error, Debug)]
pub enum LocalStorageError {
    #[error("storage lock poisoned")]
    Lock,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<LocalStorageError> for domain::ReadError {
    fn from(value: LocalStorageError) -> Self {
        domain::ReadError::Storage(domain::StorageError::Other(Box::new(value)))
    }
}

impl LocalStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a store previously written by [`LocalStorage::save`]. A missing
    /// file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, LocalStorageError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self {
                entries: Mutex::new(serde_json::from_str(&text)?),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), LocalStorageError> {
        let text = serde_json::to_string(&*self.lock()?)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LocalStorageError> {
        let text = self.lock()?.get(key).cloned();
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), LocalStorageError> {
        let text = serde_json::to_string(value)?;
        self.lock()?.insert(key.to_string(), text);
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), LocalStorageError> {
        self.lock()?.remove(key);
        Ok(())
    }

    pub fn set_current_user(&self, user: Option<&domain::User>) -> Result<(), LocalStorageError> {
        match user {
            Some(user) => self.set(Key::CurrentUser.as_ref(), &User::from(user)),
            None => self.remove(Key::CurrentUser.as_ref()),
        }
    }

    pub fn set_workout_history(
        &self,
        user_id: domain::UserID,
        workouts: &[domain::WorkoutRecord],
    ) -> Result<(), LocalStorageError> {
        self.set(
            &user_key(&Key::WorkoutHistory, user_id),
            &workouts.iter().map(WorkoutRecord::from).collect::<Vec<_>>(),
        )
    }

    pub fn set_exercise_history(
        &self,
        user_id: domain::UserID,
        completions: &[domain::ExerciseCompletion],
    ) -> Result<(), LocalStorageError> {
        self.set(
            &user_key(&Key::ExerciseHistory, user_id),
            &completions
                .iter()
                .map(ExerciseCompletion::from)
                .collect::<Vec<_>>(),
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, LocalStorageError> {
        self.entries.lock().map_err(|_| LocalStorageError::Lock)
    }

    /// Records that cannot be decoded are skipped.
    fn read_records<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, LocalStorageError> {
        Ok(self
            .get::<Vec<Value>>(key)?
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping record {index} of {key}: {err}");
                    None
                }
            })
            .collect())
    }
}

fn most_recent_first<T>(
    records: &mut Vec<T>,
    completed_at: fn(&T) -> &domain::Timestamp,
    limit: usize,
) {
    records.sort_by_cached_key(|r| Reverse(completed_at(r).instant()));
    records.truncate(limit);
}

impl domain::SessionRepository for LocalStorage {
    async fn read_current_user(&self) -> Result<Option<domain::User>, domain::ReadError> {
        match self.get::<User>(Key::CurrentUser.as_ref())? {
            Some(user) => Ok(Some(
                domain::User::try_from(user).map_err(|err| domain::ReadError::Other(err.into()))?,
            )),
            None => Ok(None),
        }
    }
}

impl domain::WorkoutRepository for LocalStorage {
    async fn read_workout_history(
        &self,
        user_id: domain::UserID,
        limit: usize,
    ) -> Result<Vec<domain::WorkoutRecord>, domain::ReadError> {
        let mut workouts = self
            .read_records::<WorkoutRecord>(&user_key(&Key::WorkoutHistory, user_id))?
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                domain::WorkoutRecord::try_from(record)
                    .inspect_err(|err| warn!("skipping workout {id}: {err}"))
                    .ok()
            })
            .collect::<Vec<_>>();
        most_recent_first(&mut workouts, |w| &w.completed_at, limit);
        Ok(workouts)
    }
}

impl domain::ExerciseRepository for LocalStorage {
    async fn read_exercise_history(
        &self,
        user_id: domain::UserID,
        limit: usize,
    ) -> Result<Vec<domain::ExerciseCompletion>, domain::ReadError> {
        let mut completions = self
            .read_records::<ExerciseCompletion>(&user_key(&Key::ExerciseHistory, user_id))?
            .into_iter()
            .map(domain::ExerciseCompletion::from)
            .collect::<Vec<_>>();
        most_recent_first(&mut completions, |c| &c.completed_at, limit);
        Ok(completions)
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        self.get(Key::Settings.as_ref())
            .map(Option::unwrap_or_default)
            .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.set(Key::Settings.as_ref(), &settings)
            .map_err(|err| err.to_string())
    }
}

impl app_log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<app_log::Entry>, app_log::Error> {
        self.get(Key::Log.as_ref())
            .map(Option::unwrap_or_default)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: app_log::Entry) -> Result<(), app_log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(app_log::MAX_ENTRIES);
        self.set(Key::Log.as_ref(), &entries)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))
    }
}
