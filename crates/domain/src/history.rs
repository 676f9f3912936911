use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{Duration, Name, PlanID, ReadError, Reps, Weight, WriteError};

pub trait HistoryRepository {
    fn read_history(&self) -> Result<Vec<HistoryRecord>, ReadError>;
    fn write_history(&self, history: &[HistoryRecord]) -> Result<(), WriteError>;
}

/// An immutable log entry for one completed set.
///
/// The exercise is referenced by name rather than by id, so history outlives
/// renamed or deleted plans. Records are append-only in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub exercise: Name,
    /// 1-based set index within the exercise.
    pub set: u32,
    pub plan_id: PlanID,
    /// Absent only on records written before sessions were introduced.
    pub session_id: Option<SessionID>,
    pub performance: Performance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Performance {
    Reps { reps: Reps, weight: Weight },
    Time { duration: Duration },
}

/// Identifies one continuous execution attempt of a plan, shared by all
/// records of the attempt, including across a pause/resume cycle.
#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionID(Uuid);

impl SessionID {
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

impl From<Uuid> for SessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// The reps of the most recently appended rep-based record for the exercise
/// name, if any.
#[must_use]
pub fn last_reps(history: &[HistoryRecord], name: &Name) -> Option<Reps> {
    history.iter().rev().find_map(|r| match r.performance {
        Performance::Reps { reps, .. } if r.exercise == *name => Some(reps),
        _ => None,
    })
}

/// The weight of the most recently appended rep-based record for the exercise
/// name, or zero. Weight has no authored default.
#[must_use]
pub fn last_weight(history: &[HistoryRecord], name: &Name) -> Weight {
    history
        .iter()
        .rev()
        .find_map(|r| match r.performance {
            Performance::Reps { weight, .. } if r.exercise == *name => Some(weight),
            _ => None,
        })
        .unwrap_or_default()
}

/// The duration of the most recently appended time-based record for the
/// exercise name, or zero.
#[must_use]
pub fn last_duration(history: &[HistoryRecord], name: &Name) -> Duration {
    history
        .iter()
        .rev()
        .find_map(|r| match r.performance {
            Performance::Time { duration } if r.exercise == *name => Some(duration),
            _ => None,
        })
        .unwrap_or_default()
}
