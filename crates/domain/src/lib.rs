#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod history;
pub mod plan;
pub mod quantity;
pub mod session;

pub use error::{ReadError, StorageError, WriteError};
pub use history::{
    HistoryRecord, HistoryRepository, Performance, SessionID, last_duration, last_reps,
    last_weight,
};
pub use plan::{
    Exercise, ExerciseID, ExerciseTarget, MoveDirection, Plan, PlanError, PlanID, PlanRepository,
};
pub use quantity::{
    Duration, Name, NameError, Reps, RepsError, Sets, SetsError, Time, TimeError, Weight,
    WeightError,
};
pub use session::{SavedWorkout, SavedWorkoutRepository, Session, sessions};
