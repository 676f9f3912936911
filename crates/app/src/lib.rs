#![warn(clippy::pedantic)]

pub mod command;
pub mod controller;
pub mod workout;

pub use command::Command;
pub use controller::Controller;
pub use workout::{ExecutionSession, SetTargets, Timer};

/// The view the presentation layer currently shows.
///
/// The application core never renders. It only keeps the view name so that
/// navigation can cancel a running timer before the view changes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    CreatePlan,
    Workout,
    PlanHistory,
    WorkoutComplete,
}
