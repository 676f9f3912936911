//! Wire models for the persisted JSON payloads.
//!
//! Field names and shapes follow the previously persisted schema: camelCase
//! keys, `type`-tagged set payloads and a day of week counted from Sunday.
//! Ids are UUID strings, with no migration for payloads that carry numeric
//! ids. Loaded values are validated on conversion into domain types.

use chrono::{DateTime, Utc, Weekday};
use uuid::Uuid;

use liftlog_domain as domain;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub day_of_week: u8,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::Plan> for Plan {
    fn from(value: &domain::Plan) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            day_of_week: day_of_week(value.day_of_week),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Plan> for domain::Plan {
    type Error = ConversionError;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            day_of_week: weekday(value.day_of_week)?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: u32,
    #[serde(flatten)]
    pub target: ExerciseTarget,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            sets: value.sets.into(),
            target: value.target.into(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ConversionError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            sets: domain::Sets::new(value.sets)?,
            target: value.target.try_into()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExerciseTarget {
    Reps { reps: u32 },
    Time { duration: u32 },
}

impl From<domain::ExerciseTarget> for ExerciseTarget {
    fn from(value: domain::ExerciseTarget) -> Self {
        match value {
            domain::ExerciseTarget::Reps { reps } => ExerciseTarget::Reps { reps: reps.into() },
            domain::ExerciseTarget::Time { duration } => ExerciseTarget::Time {
                duration: duration.into(),
            },
        }
    }
}

impl TryFrom<ExerciseTarget> for domain::ExerciseTarget {
    type Error = ConversionError;

    fn try_from(value: ExerciseTarget) -> Result<Self, Self::Error> {
        Ok(match value {
            ExerciseTarget::Reps { reps } => domain::ExerciseTarget::Reps {
                reps: domain::Reps::new(reps)?,
            },
            ExerciseTarget::Time { duration } => domain::ExerciseTarget::Time {
                duration: domain::Time::new(duration)?,
            },
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub exercise: String,
    pub set: u32,
    pub plan_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(flatten)]
    pub performance: Performance,
}

impl From<&domain::HistoryRecord> for HistoryRecord {
    fn from(value: &domain::HistoryRecord) -> Self {
        Self {
            date: value.date,
            exercise: value.exercise.to_string(),
            set: value.set,
            plan_id: *value.plan_id,
            session_id: value.session_id.map(|id| *id),
            performance: value.performance.into(),
        }
    }
}

impl TryFrom<HistoryRecord> for domain::HistoryRecord {
    type Error = ConversionError;

    fn try_from(value: HistoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value.date,
            exercise: domain::Name::new(&value.exercise)?,
            set: value.set,
            plan_id: value.plan_id.into(),
            session_id: value.session_id.map(Into::into),
            performance: value.performance.try_into()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Performance {
    Reps { reps: u32, weight: f32 },
    Time { duration: f32 },
}

impl From<domain::Performance> for Performance {
    fn from(value: domain::Performance) -> Self {
        match value {
            domain::Performance::Reps { reps, weight } => Performance::Reps {
                reps: reps.into(),
                weight: weight.into(),
            },
            domain::Performance::Time { duration } => Performance::Time {
                duration: duration.into(),
            },
        }
    }
}

impl TryFrom<Performance> for domain::Performance {
    type Error = ConversionError;

    fn try_from(value: Performance) -> Result<Self, Self::Error> {
        Ok(match value {
            Performance::Reps { reps, weight } => domain::Performance::Reps {
                reps: domain::Reps::new(reps)?,
                weight: domain::Weight::new(weight)?,
            },
            Performance::Time { duration } => domain::Performance::Time {
                duration: domain::Duration::from_secs(duration),
            },
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
    pub plan_id: Uuid,
    pub exercise_index: usize,
    pub set_index: usize,
    pub session_id: Uuid,
}

impl From<&domain::SavedWorkout> for SavedWorkout {
    fn from(value: &domain::SavedWorkout) -> Self {
        Self {
            plan_id: *value.plan_id,
            exercise_index: value.exercise_index,
            set_index: value.set_index,
            session_id: *value.session_id,
        }
    }
}

impl From<SavedWorkout> for domain::SavedWorkout {
    fn from(value: SavedWorkout) -> Self {
        Self {
            plan_id: value.plan_id.into(),
            exercise_index: value.exercise_index,
            set_index: value.set_index,
            session_id: value.session_id.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Sets(#[from] domain::SetsError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Time(#[from] domain::TimeError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error("Day of week must be in the range 0 to 6")]
    DayOfWeek(u8),
}

fn weekday(day_of_week: u8) -> Result<Weekday, ConversionError> {
    Ok(match day_of_week {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        value => return Err(ConversionError::DayOfWeek(value)),
    })
}

fn day_of_week(weekday: Weekday) -> u8 {
    #[allow(clippy::cast_possible_truncation)]
    let value = weekday.num_days_from_sunday() as u8;
    value
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn domain_plan() -> domain::Plan {
        domain::Plan {
            id: 1.into(),
            name: domain::Name::new("Push Day").unwrap(),
            day_of_week: Weekday::Sun,
            exercises: vec![
                domain::Exercise {
                    id: 2.into(),
                    name: domain::Name::new("Bench Press").unwrap(),
                    sets: domain::Sets::new(3).unwrap(),
                    target: domain::ExerciseTarget::Reps {
                        reps: domain::Reps::new(10).unwrap(),
                    },
                },
                domain::Exercise {
                    id: 3.into(),
                    name: domain::Name::new("Plank").unwrap(),
                    sets: domain::Sets::new(2).unwrap(),
                    target: domain::ExerciseTarget::Time {
                        duration: domain::Time::new(60).unwrap(),
                    },
                },
            ],
        }
    }

    fn domain_record() -> domain::HistoryRecord {
        domain::HistoryRecord {
            date: Utc.with_ymd_and_hms(2020, 2, 2, 10, 0, 0).unwrap(),
            exercise: domain::Name::new("Bench Press").unwrap(),
            set: 1,
            plan_id: 1.into(),
            session_id: Some(4.into()),
            performance: domain::Performance::Reps {
                reps: domain::Reps::new(12).unwrap(),
                weight: domain::Weight::new(185.0).unwrap(),
            },
        }
    }

    #[test]
    fn test_plan_try_from() {
        assert_eq!(
            domain::Plan::try_from(Plan::from(&domain_plan())),
            Ok(domain_plan())
        );
    }

    #[test]
    fn test_plan_serde() {
        let obj = Plan::from(&domain_plan());
        let serialized = json!(obj);
        assert_eq!(serialized["dayOfWeek"], 0);
        assert_eq!(serialized["exercises"][0]["type"], "reps");
        assert_eq!(serialized["exercises"][0]["reps"], 10);
        assert_eq!(serialized["exercises"][1]["type"], "time");
        assert_eq!(serialized["exercises"][1]["duration"], 60);
        let deserialized: Plan = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[test]
    fn test_history_record_try_from() {
        assert_eq!(
            domain::HistoryRecord::try_from(HistoryRecord::from(&domain_record())),
            Ok(domain_record())
        );
    }

    #[test]
    fn test_history_record_serde() {
        let obj = HistoryRecord::from(&domain_record());
        let serialized = json!(obj);
        assert_eq!(
            serialized,
            json!({
                "date": "2020-02-02T10:00:00Z",
                "exercise": "Bench Press",
                "set": 1,
                "planId": "00000000-0000-0000-0000-000000000001",
                "sessionId": "00000000-0000-0000-0000-000000000004",
                "type": "reps",
                "reps": 12,
                "weight": 185.0,
            })
        );
        let deserialized: HistoryRecord = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[test]
    fn test_history_record_without_session_id() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "date": "2020-02-02T10:00:00Z",
            "exercise": "Plank",
            "set": 2,
            "planId": "00000000-0000-0000-0000-000000000001",
            "type": "time",
            "duration": 45.2,
        }))
        .unwrap();
        assert_eq!(record.session_id, None);
        assert_eq!(record.performance, Performance::Time { duration: 45.2 });
        assert!(!json!(record).as_object().unwrap().contains_key("sessionId"));
    }

    #[test]
    fn test_saved_workout_from() {
        let saved_workout = domain::SavedWorkout {
            plan_id: 1.into(),
            exercise_index: 1,
            set_index: 2,
            session_id: 4.into(),
        };
        assert_eq!(
            domain::SavedWorkout::from(SavedWorkout::from(&saved_workout)),
            saved_workout
        );
    }

    #[test]
    fn test_saved_workout_serde() {
        let obj = SavedWorkout {
            plan_id: Uuid::from_u128(1),
            exercise_index: 1,
            set_index: 2,
            session_id: Uuid::from_u128(4),
        };
        let serialized = json!(obj);
        assert_eq!(serialized["planId"], "00000000-0000-0000-0000-000000000001");
        assert_eq!(serialized["exerciseIndex"], 1);
        assert_eq!(serialized["setIndex"], 2);
        let deserialized: SavedWorkout = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[rstest]
    #[case(0, Ok(Weekday::Sun))]
    #[case(6, Ok(Weekday::Sat))]
    #[case(7, Err(ConversionError::DayOfWeek(7)))]
    fn test_weekday(#[case] value: u8, #[case] expected: Result<Weekday, ConversionError>) {
        assert_eq!(weekday(value), expected);
    }

    #[rstest]
    #[case(Weekday::Sun, 0)]
    #[case(Weekday::Sat, 6)]
    fn test_day_of_week(#[case] value: Weekday, #[case] expected: u8) {
        assert_eq!(day_of_week(value), expected);
    }
}
