use chrono::Weekday;
use derive_more::Deref;
use thiserror::Error;
use uuid::Uuid;

use crate::{Name, ReadError, Reps, Sets, Time, WriteError};

pub trait PlanRepository {
    fn read_plans(&self) -> Result<Vec<Plan>, ReadError>;
    fn write_plans(&self, plans: &[Plan]) -> Result<(), WriteError>;
}

/// A named, ordered template of exercises for a given day of week.
///
/// The exercise order is the execution order. Apart from
/// [`Plan::move_exercise`], mutation preserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: PlanID,
    pub name: Name,
    pub day_of_week: Weekday,
    pub exercises: Vec<Exercise>,
}

impl Plan {
    pub fn new(
        name: Name,
        day_of_week: Weekday,
        exercises: Vec<Exercise>,
    ) -> Result<Self, PlanError> {
        if exercises.is_empty() {
            return Err(PlanError::NoExercises);
        }

        Ok(Self {
            id: PlanID::random(),
            name,
            day_of_week,
            exercises,
        })
    }

    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| u32::from(e.sets)).sum()
    }

    pub fn move_exercise(&mut self, id: ExerciseID, direction: MoveDirection) {
        let Some(index) = self.exercises.iter().position(|e| e.id == id) else {
            return;
        };

        match direction {
            MoveDirection::Up if index > 0 => self.exercises.swap(index - 1, index),
            MoveDirection::Down if index < self.exercises.len() - 1 => {
                self.exercises.swap(index, index + 1);
            }
            MoveDirection::Up | MoveDirection::Down => {}
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PlanError {
    #[error("A plan must contain at least one exercise")]
    NoExercises,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanID(Uuid);

impl PlanID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One movement within a plan, either rep-based or time-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub sets: Sets,
    pub target: ExerciseTarget,
}

impl Exercise {
    #[must_use]
    pub fn new(name: Name, sets: Sets, target: ExerciseTarget) -> Self {
        Self {
            id: ExerciseID::random(),
            name,
            sets,
            target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseTarget {
    Reps { reps: Reps },
    Time { duration: Time },
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn plan() -> Plan {
        Plan {
            id: 1.into(),
            name: Name::new("Push Day").unwrap(),
            day_of_week: Weekday::Mon,
            exercises: vec![
                Exercise {
                    id: 1.into(),
                    name: Name::new("Bench Press").unwrap(),
                    sets: Sets::new(3).unwrap(),
                    target: ExerciseTarget::Reps {
                        reps: Reps::new(10).unwrap(),
                    },
                },
                Exercise {
                    id: 2.into(),
                    name: Name::new("Plank").unwrap(),
                    sets: Sets::new(2).unwrap(),
                    target: ExerciseTarget::Time {
                        duration: Time::new(60).unwrap(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_plan_new() {
        let plan = Plan::new(
            Name::new("Push Day").unwrap(),
            Weekday::Mon,
            plan().exercises,
        )
        .unwrap();
        assert!(!plan.id.is_nil());
        assert_eq!(plan.exercises.len(), 2);
    }

    #[test]
    fn test_plan_new_without_exercises() {
        assert_eq!(
            Plan::new(Name::new("Push Day").unwrap(), Weekday::Mon, vec![]),
            Err(PlanError::NoExercises)
        );
    }

    #[test]
    fn test_plan_total_sets() {
        assert_eq!(plan().total_sets(), 5);
    }

    #[rstest]
    #[case(2.into(), MoveDirection::Up, vec![2.into(), 1.into()])]
    #[case(1.into(), MoveDirection::Down, vec![2.into(), 1.into()])]
    #[case(1.into(), MoveDirection::Up, vec![1.into(), 2.into()])]
    #[case(2.into(), MoveDirection::Down, vec![1.into(), 2.into()])]
    #[case(3.into(), MoveDirection::Up, vec![1.into(), 2.into()])]
    fn test_plan_move_exercise(
        #[case] id: ExerciseID,
        #[case] direction: MoveDirection,
        #[case] expected: Vec<ExerciseID>,
    ) {
        let mut plan = plan();
        plan.move_exercise(id, direction);
        assert_eq!(
            plan.exercises.iter().map(|e| e.id).collect::<Vec<_>>(),
            expected
        );
    }

    #[test]
    fn test_plan_id_nil() {
        assert!(PlanID::nil().is_nil());
        assert_eq!(PlanID::nil(), PlanID::default());
    }

    #[test]
    fn test_exercise_new() {
        let exercise = Exercise::new(
            Name::new("Bench Press").unwrap(),
            Sets::new(3).unwrap(),
            ExerciseTarget::Reps {
                reps: Reps::new(10).unwrap(),
            },
        );
        assert!(!exercise.id.is_nil());
    }
}
