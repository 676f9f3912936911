#![warn(clippy::pedantic)]

use log::warn;
use serde::de::DeserializeOwned;

use liftlog_domain::{
    HistoryRecord, HistoryRepository, Plan, PlanRepository, ReadError, SavedWorkout,
    SavedWorkoutRepository, StorageError, WriteError,
};

pub mod file;
pub mod memory;
mod model;

pub const KEY_PLANS: &str = "workoutPlans";
pub const KEY_HISTORY: &str = "workoutHistory";
pub const KEY_SAVED_WORKOUT: &str = "savedWorkout";

/// A key-value blob store holding JSON payloads.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: BlobStore> BlobStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (*self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (*self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (*self).remove(key)
    }
}

/// Implements the domain repositories on top of a [`BlobStore`].
///
/// An absent key yields empty collections, a malformed payload is discarded
/// with a warning instead of propagating a parse fault.
pub struct JsonStorage<S> {
    store: S,
}

impl<S: BlobStore> JsonStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ReadError> {
        match self.store.get(key)? {
            None => Ok(None),
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    warn!("discarding malformed payload for key {key}: {err}");
                    Ok(None)
                }
            },
        }
    }

    fn save<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), WriteError> {
        let payload = serde_json::to_string(value).map_err(|err| WriteError::Other(err.into()))?;
        self.store.set(key, &payload)?;
        Ok(())
    }
}

impl<S: BlobStore> PlanRepository for JsonStorage<S> {
    fn read_plans(&self) -> Result<Vec<Plan>, ReadError> {
        Ok(self
            .load::<Vec<model::Plan>>(KEY_PLANS)?
            .unwrap_or_default()
            .into_iter()
            .filter_map(|plan| match Plan::try_from(plan) {
                Ok(plan) => Some(plan),
                Err(err) => {
                    warn!("discarding invalid plan: {err}");
                    None
                }
            })
            .collect())
    }

    fn write_plans(&self, plans: &[Plan]) -> Result<(), WriteError> {
        self.save(
            KEY_PLANS,
            &plans.iter().map(model::Plan::from).collect::<Vec<_>>(),
        )
    }
}

impl<S: BlobStore> HistoryRepository for JsonStorage<S> {
    fn read_history(&self) -> Result<Vec<HistoryRecord>, ReadError> {
        Ok(self
            .load::<Vec<model::HistoryRecord>>(KEY_HISTORY)?
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| match HistoryRecord::try_from(record) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("discarding invalid history record: {err}");
                    None
                }
            })
            .collect())
    }

    fn write_history(&self, history: &[HistoryRecord]) -> Result<(), WriteError> {
        self.save(
            KEY_HISTORY,
            &history
                .iter()
                .map(model::HistoryRecord::from)
                .collect::<Vec<_>>(),
        )
    }
}

impl<S: BlobStore> SavedWorkoutRepository for JsonStorage<S> {
    fn read_saved_workout(&self) -> Result<Option<SavedWorkout>, ReadError> {
        Ok(self
            .load::<model::SavedWorkout>(KEY_SAVED_WORKOUT)?
            .map(SavedWorkout::from))
    }

    fn write_saved_workout(
        &self,
        saved_workout: Option<&SavedWorkout>,
    ) -> Result<(), WriteError> {
        match saved_workout {
            Some(saved_workout) => {
                self.save(KEY_SAVED_WORKOUT, &model::SavedWorkout::from(saved_workout))
            }
            None => {
                self.store.remove(KEY_SAVED_WORKOUT)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use liftlog_domain as domain;

    use crate::memory::MemoryStore;

    use super::*;

    fn storage() -> JsonStorage<MemoryStore> {
        JsonStorage::new(MemoryStore::default())
    }

    fn plan() -> Plan {
        Plan {
            id: 1.into(),
            name: domain::Name::new("Push Day").unwrap(),
            day_of_week: chrono::Weekday::Mon,
            exercises: vec![domain::Exercise {
                id: 2.into(),
                name: domain::Name::new("Bench Press").unwrap(),
                sets: domain::Sets::new(3).unwrap(),
                target: domain::ExerciseTarget::Reps {
                    reps: domain::Reps::new(10).unwrap(),
                },
            }],
        }
    }

    fn record() -> HistoryRecord {
        HistoryRecord {
            date: Utc.with_ymd_and_hms(2020, 2, 2, 10, 0, 0).unwrap(),
            exercise: domain::Name::new("Bench Press").unwrap(),
            set: 1,
            plan_id: 1.into(),
            session_id: Some(3.into()),
            performance: domain::Performance::Reps {
                reps: domain::Reps::new(10).unwrap(),
                weight: domain::Weight::new(100.0).unwrap(),
            },
        }
    }

    fn saved_workout() -> SavedWorkout {
        SavedWorkout {
            plan_id: 1.into(),
            exercise_index: 1,
            set_index: 2,
            session_id: 3.into(),
        }
    }

    #[test]
    fn test_read_plans_absent_key() {
        assert_eq!(storage().read_plans().unwrap(), vec![]);
    }

    #[test]
    fn test_read_plans_malformed_payload() {
        let storage = storage();
        storage.store.set(KEY_PLANS, "{not json").unwrap();
        assert_eq!(storage.read_plans().unwrap(), vec![]);
    }

    #[test]
    fn test_plans_round_trip() {
        let storage = storage();
        storage.write_plans(&[plan()]).unwrap();
        assert_eq!(storage.read_plans().unwrap(), vec![plan()]);
    }

    #[test]
    fn test_read_plans_discards_invalid_entries() {
        let storage = storage();
        storage
            .store
            .set(
                KEY_PLANS,
                r#"[{"id": "00000000-0000-0000-0000-000000000001", "name": "", "dayOfWeek": 1, "exercises": []}]"#,
            )
            .unwrap();
        assert_eq!(storage.read_plans().unwrap(), vec![]);
    }

    #[test]
    fn test_history_round_trip() {
        let storage = storage();
        storage.write_history(&[record()]).unwrap();
        assert_eq!(storage.read_history().unwrap(), vec![record()]);
    }

    #[test]
    fn test_read_history_absent_key() {
        assert_eq!(storage().read_history().unwrap(), vec![]);
    }

    #[test]
    fn test_saved_workout_round_trip() {
        let storage = storage();
        storage.write_saved_workout(Some(&saved_workout())).unwrap();
        assert_eq!(storage.read_saved_workout().unwrap(), Some(saved_workout()));
    }

    #[test]
    fn test_write_saved_workout_none_removes_key() {
        let storage = storage();
        storage.write_saved_workout(Some(&saved_workout())).unwrap();
        storage.write_saved_workout(None).unwrap();
        assert_eq!(storage.store.get(KEY_SAVED_WORKOUT).unwrap(), None);
        assert_eq!(storage.read_saved_workout().unwrap(), None);
    }

    #[test]
    fn test_read_saved_workout_absent_key() {
        assert_eq!(storage().read_saved_workout().unwrap(), None);
    }

    #[test]
    fn test_read_saved_workout_malformed_payload() {
        let storage = storage();
        storage.store.set(KEY_SAVED_WORKOUT, "[]").unwrap();
        assert_eq!(storage.read_saved_workout().unwrap(), None);
    }
}
