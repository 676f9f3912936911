use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::{HistoryRecord, PlanID, ReadError, SessionID, WriteError};

pub trait SavedWorkoutRepository {
    fn read_saved_workout(&self) -> Result<Option<SavedWorkout>, ReadError>;
    fn write_saved_workout(&self, saved_workout: Option<&SavedWorkout>)
    -> Result<(), WriteError>;
}

/// The at-most-one paused-session pointer enabling resume.
///
/// Exists exactly while a workout is paused. Cleared on resume, on abandon
/// and on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedWorkout {
    pub plan_id: PlanID,
    pub exercise_index: usize,
    pub set_index: usize,
    pub session_id: SessionID,
}

/// A derived view grouping the history records of one execution attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub session_id: Option<SessionID>,
    pub records: Vec<HistoryRecord>,
    pub start_time: DateTime<Utc>,
    /// `None` while the session is paused and resumable.
    pub end_time: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SessionKey {
    Id(SessionID),
    // Records from before sessions were introduced are grouped by calendar
    // date instead.
    Date(NaiveDate),
}

/// Groups all history records of a plan into sessions, most recent first.
///
/// A session whose id matches the saved workout is still open: it has no end
/// time and is not complete. Read-only and idempotent.
#[must_use]
pub fn sessions(
    history: &[HistoryRecord],
    plan_id: PlanID,
    saved_workout: Option<&SavedWorkout>,
) -> Vec<Session> {
    let mut groups: BTreeMap<SessionKey, Vec<HistoryRecord>> = BTreeMap::new();

    for record in history.iter().filter(|r| r.plan_id == plan_id) {
        let key = record.session_id.map_or_else(
            || SessionKey::Date(record.date.date_naive()),
            SessionKey::Id,
        );
        groups.entry(key).or_default().push(record.clone());
    }

    let mut result = groups
        .into_values()
        .filter_map(|mut records| {
            records.sort_by_key(|r| r.date);
            let session_id = records.first()?.session_id;
            let start_time = records.first()?.date;
            let is_complete = !matches!(
                (saved_workout, session_id),
                (Some(saved), Some(id)) if saved.session_id == id
            );
            let end_time = if is_complete {
                Some(records.last()?.date)
            } else {
                None
            };
            Some(Session {
                session_id,
                records,
                start_time,
                end_time,
                is_complete,
            })
        })
        .collect::<Vec<_>>();

    result.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    result
}
