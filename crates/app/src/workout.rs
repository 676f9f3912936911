use std::time::Instant;

use chrono::Utc;

use liftlog_domain::{
    Duration, Exercise, ExerciseTarget, HistoryRecord, Performance, Plan, Reps, SavedWorkout,
    SessionID, Weight, last_duration, last_reps, last_weight,
};

/// A single active workout attempt, driven set by set through its plan.
///
/// All history records produced by the attempt share its session id,
/// including records written after a pause/resume cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSession {
    plan: Plan,
    exercise_index: usize,
    set_index: usize,
    session_id: SessionID,
    targets: SetTargets,
}

/// The working targets for the current set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetTargets {
    Reps {
        reps: Reps,
        weight: Weight,
    },
    Time {
        timer: Timer,
        /// The record to beat, taken from the last performance of the
        /// exercise name.
        last_duration: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Idle,
    Running { start: Instant },
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continued,
    Completed,
}

impl ExecutionSession {
    /// Begins a fresh attempt at the first set of the first exercise.
    ///
    /// Returns `None` for a plan without exercises.
    pub(crate) fn start(plan: Plan, history: &[HistoryRecord]) -> Option<Self> {
        let targets = seed_targets(plan.exercises.first()?, history);
        Some(Self {
            plan,
            exercise_index: 0,
            set_index: 0,
            session_id: SessionID::random(),
            targets,
        })
    }

    /// Rebuilds a paused attempt at its saved position, keeping the original
    /// session id.
    ///
    /// Returns `None` if the saved position no longer exists in the plan.
    pub(crate) fn resume(
        plan: Plan,
        saved_workout: &SavedWorkout,
        history: &[HistoryRecord],
    ) -> Option<Self> {
        let exercise = plan.exercises.get(saved_workout.exercise_index)?;
        let sets = usize::try_from(u32::from(exercise.sets)).unwrap_or(usize::MAX);
        if saved_workout.set_index >= sets {
            return None;
        }
        let targets = match exercise.target {
            // Unlike a fresh start, reps are taken from the plan's authored
            // default. Weight still comes from history.
            ExerciseTarget::Reps { reps } => SetTargets::Reps {
                reps,
                weight: last_weight(history, &exercise.name),
            },
            ExerciseTarget::Time { .. } => SetTargets::Time {
                timer: Timer::Idle,
                last_duration: last_duration(history, &exercise.name),
            },
        };
        Some(Self {
            exercise_index: saved_workout.exercise_index,
            set_index: saved_workout.set_index,
            session_id: saved_workout.session_id,
            plan,
            targets,
        })
    }

    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    #[must_use]
    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    #[must_use]
    pub fn set_index(&self) -> usize {
        self.set_index
    }

    #[must_use]
    pub fn session_id(&self) -> SessionID {
        self.session_id
    }

    #[must_use]
    pub fn targets(&self) -> &SetTargets {
        &self.targets
    }

    #[must_use]
    pub fn current_exercise(&self) -> &Exercise {
        &self.plan.exercises[self.exercise_index]
    }

    /// The fraction of sets completed so far. Non-decreasing over the
    /// lifetime of the attempt.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        self.completed_sets() as f32 / self.plan.total_sets() as f32
    }

    fn completed_sets(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let current = self.set_index as u32;
        self.plan.exercises[..self.exercise_index]
            .iter()
            .map(|e| u32::from(e.sets))
            .sum::<u32>()
            + current
    }

    /// The history record for the current rep-based set.
    ///
    /// Returns `None` for a time-based exercise: those sets are completed by
    /// stopping the timer, never directly.
    pub(crate) fn complete_set(&mut self) -> Option<HistoryRecord> {
        match self.targets {
            SetTargets::Reps { reps, weight } => {
                Some(self.record(Performance::Reps { reps, weight }))
            }
            SetTargets::Time { .. } => None,
        }
    }

    pub(crate) fn start_timer(&mut self) {
        if let SetTargets::Time { timer, .. } = &mut self.targets {
            if *timer == Timer::Idle {
                *timer = Timer::Running {
                    start: Instant::now(),
                };
            }
        }
    }

    /// Stops a running timer and returns the record for the completed set,
    /// with the elapsed time rounded to 0.1 s.
    pub(crate) fn stop_timer(&mut self) -> Option<HistoryRecord> {
        let SetTargets::Time { timer, .. } = &mut self.targets else {
            return None;
        };
        let Timer::Running { start } = *timer else {
            return None;
        };
        *timer = Timer::Idle;
        let duration = Duration::from_secs(start.elapsed().as_secs_f32());
        Some(self.record(Performance::Time { duration }))
    }

    /// Cancels a running timer. Every transition out of the workout goes
    /// through here before any other state changes, so a stale tick can
    /// never outlive its session.
    pub(crate) fn cancel_timer(&mut self) {
        if let SetTargets::Time { timer, .. } = &mut self.targets {
            *timer = Timer::Idle;
        }
    }

    /// The elapsed time of the running timer, recomputed from the fixed
    /// start instant so that repeated polling cannot drift. Never persisted
    /// while running.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.targets {
            SetTargets::Time {
                timer: Timer::Running { start },
                ..
            } => Duration::from_secs(start.elapsed().as_secs_f32()),
            _ => Duration::ZERO,
        }
    }

    /// Moves to the next set, or the next exercise, or reports completion.
    pub(crate) fn advance(&mut self, history: &[HistoryRecord]) -> Outcome {
        let sets = usize::try_from(u32::from(self.current_exercise().sets)).unwrap_or(usize::MAX);
        if self.set_index + 1 < sets {
            self.set_index += 1;
        } else if self.exercise_index + 1 < self.plan.exercises.len() {
            self.exercise_index += 1;
            self.set_index = 0;
            self.targets = seed_targets(self.current_exercise(), history);
        } else {
            return Outcome::Completed;
        }
        Outcome::Continued
    }

    #[must_use]
    pub fn saved(&self) -> SavedWorkout {
        SavedWorkout {
            plan_id: self.plan.id,
            exercise_index: self.exercise_index,
            set_index: self.set_index,
            session_id: self.session_id,
        }
    }

    pub(crate) fn set_reps(&mut self, value: Reps) {
        if let SetTargets::Reps { reps, .. } = &mut self.targets {
            *reps = value;
        }
    }

    pub(crate) fn adjust_reps(&mut self, delta: i32) {
        if let SetTargets::Reps { reps, .. } = &mut self.targets {
            *reps = reps.adjusted_by(delta);
        }
    }

    pub(crate) fn set_weight(&mut self, value: Weight) {
        if let SetTargets::Reps { weight, .. } = &mut self.targets {
            *weight = value;
        }
    }

    pub(crate) fn adjust_weight(&mut self, delta: f32) {
        if let SetTargets::Reps { weight, .. } = &mut self.targets {
            *weight = weight.adjusted_by(delta);
        }
    }

    fn record(&self, performance: Performance) -> HistoryRecord {
        let exercise = self.current_exercise();
        #[allow(clippy::cast_possible_truncation)]
        let set = self.set_index as u32 + 1;
        HistoryRecord {
            date: Utc::now(),
            exercise: exercise.name.clone(),
            set,
            plan_id: self.plan.id,
            session_id: Some(self.session_id),
            performance,
        }
    }
}

/// The targets for a freshly entered exercise, seeded from the most recent
/// performance of the same exercise name.
fn seed_targets(exercise: &Exercise, history: &[HistoryRecord]) -> SetTargets {
    match exercise.target {
        ExerciseTarget::Reps { reps } => SetTargets::Reps {
            reps: last_reps(history, &exercise.name).unwrap_or(reps),
            weight: last_weight(history, &exercise.name),
        },
        ExerciseTarget::Time { .. } => SetTargets::Time {
            timer: Timer::Idle,
            last_duration: last_duration(history, &exercise.name),
        },
    }
}
