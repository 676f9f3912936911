use liftlog_domain::{PlanID, Reps, Weight};

use crate::View;

/// Everything the presentation layer can ask the application core to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Navigate(View),
    StartWorkout(PlanID),
    ResumeWorkout,
    ViewPlanHistory(PlanID),
    CompleteSet,
    StartTimer,
    StopTimer,
    SaveAndExit,
    FinishEarly,
    SetReps(Reps),
    AdjustReps(i32),
    SetWeight(Weight),
    AdjustWeight(f32),
}
