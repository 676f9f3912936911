use chrono::{Datelike, Local, Weekday};
use log::warn;

use liftlog_domain::{
    Exercise, ExerciseID, HistoryRecord, HistoryRepository, MoveDirection, Name, Plan, PlanError,
    PlanID, PlanRepository, Reps, SavedWorkout, SavedWorkoutRepository, Session, Weight, sessions,
};

use crate::{
    Command, View,
    workout::{ExecutionSession, Outcome},
};

macro_rules! log_on_error {
    ($result:expr) => {
        if let Err(err) = $result {
            log::error!("{err}");
        }
    };
}

/// Owns the application state and applies [`Command`]s to it.
///
/// State changes happen in memory first and are then written through the
/// repository. A failing write is logged and the in-memory state stays
/// authoritative, so the application keeps working without persistence.
pub struct Controller<R> {
    repository: R,
    plans: Vec<Plan>,
    history: Vec<HistoryRecord>,
    saved_workout: Option<SavedWorkout>,
    session: Option<ExecutionSession>,
    current_view: View,
    selected_plan: Option<PlanID>,
}

impl<R> Controller<R>
where
    R: PlanRepository + HistoryRepository + SavedWorkoutRepository,
{
    pub fn new(repository: R) -> Self {
        let plans = repository.read_plans().unwrap_or_else(|err| {
            warn!("failed to read plans: {err}");
            Vec::new()
        });
        let history = repository.read_history().unwrap_or_else(|err| {
            warn!("failed to read history: {err}");
            Vec::new()
        });
        let saved_workout = repository.read_saved_workout().unwrap_or_else(|err| {
            warn!("failed to read saved workout: {err}");
            None
        });

        Self {
            repository,
            plans,
            history,
            saved_workout,
            session: None,
            current_view: View::default(),
            selected_plan: None,
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Navigate(view) => self.navigate(view),
            Command::StartWorkout(plan_id) => self.start_workout(plan_id),
            Command::ResumeWorkout => self.resume_workout(),
            Command::ViewPlanHistory(plan_id) => self.view_plan_history(plan_id),
            Command::CompleteSet => self.complete_set(),
            Command::StartTimer => {
                if let Some(session) = self.session.as_mut() {
                    session.start_timer();
                }
            }
            Command::StopTimer => self.stop_timer(),
            Command::SaveAndExit => self.save_and_exit(),
            Command::FinishEarly => self.finish_early(),
            Command::SetReps(reps) => {
                if let Some(session) = self.session.as_mut() {
                    session.set_reps(reps);
                }
            }
            Command::AdjustReps(delta) => {
                if let Some(session) = self.session.as_mut() {
                    session.adjust_reps(delta);
                }
            }
            Command::SetWeight(weight) => {
                if let Some(session) = self.session.as_mut() {
                    session.set_weight(weight);
                }
            }
            Command::AdjustWeight(delta) => {
                if let Some(session) = self.session.as_mut() {
                    session.adjust_weight(delta);
                }
            }
        }
    }

    fn navigate(&mut self, view: View) {
        if view == self.current_view {
            return;
        }

        // A timer must never keep ticking behind another view.
        if self.current_view == View::Workout {
            if let Some(session) = self.session.as_mut() {
                session.cancel_timer();
            }
        }

        self.current_view = view;
    }

    fn start_workout(&mut self, plan_id: PlanID) {
        let Some(plan) = self.plans.iter().find(|p| p.id == plan_id) else {
            warn!("cannot start workout: unknown plan");
            return;
        };

        match ExecutionSession::start(plan.clone(), &self.history) {
            Some(session) => {
                self.session = Some(session);
                // A fresh attempt invalidates any earlier pause point.
                self.saved_workout = None;
                self.persist_saved_workout();
                self.current_view = View::Workout;
            }
            None => warn!("cannot start workout: plan has no exercises"),
        }
    }

    fn resume_workout(&mut self) {
        let Some(saved_workout) = self.saved_workout else {
            warn!("cannot resume workout: nothing saved");
            return;
        };

        let session = self
            .plans
            .iter()
            .find(|p| p.id == saved_workout.plan_id)
            .and_then(|plan| ExecutionSession::resume(plan.clone(), &saved_workout, &self.history));

        match session {
            Some(session) => {
                self.session = Some(session);
                self.saved_workout = None;
                self.persist_saved_workout();
                self.current_view = View::Workout;
            }
            None => {
                warn!("discarding saved workout: its plan or position no longer exists");
                self.saved_workout = None;
                self.persist_saved_workout();
            }
        }
    }

    fn complete_set(&mut self) {
        if let Some(record) = self.session.as_mut().and_then(ExecutionSession::complete_set) {
            self.finish_set(record);
        }
    }

    fn stop_timer(&mut self) {
        if let Some(record) = self.session.as_mut().and_then(ExecutionSession::stop_timer) {
            self.finish_set(record);
        }
    }

    fn finish_set(&mut self, record: HistoryRecord) {
        self.history.push(record);
        self.persist_history();

        let completed = match self.session.as_mut() {
            Some(session) => session.advance(&self.history) == Outcome::Completed,
            None => false,
        };
        if completed {
            self.session = None;
            self.saved_workout = None;
            self.persist_saved_workout();
            self.current_view = View::WorkoutComplete;
        }
    }

    fn save_and_exit(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        session.cancel_timer();
        self.saved_workout = Some(session.saved());
        self.persist_saved_workout();
        self.current_view = View::Dashboard;
    }

    fn finish_early(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        session.cancel_timer();
        self.saved_workout = None;
        self.persist_saved_workout();
        self.current_view = View::WorkoutComplete;
    }

    fn view_plan_history(&mut self, plan_id: PlanID) {
        self.selected_plan = Some(plan_id);
        self.navigate(View::PlanHistory);
    }

    pub fn create_plan(
        &mut self,
        name: Name,
        day_of_week: Weekday,
        exercises: Vec<Exercise>,
    ) -> Result<PlanID, PlanError> {
        let plan = Plan::new(name, day_of_week, exercises)?;
        let id = plan.id;
        self.plans.push(plan);
        self.persist_plans();
        Ok(id)
    }

    pub fn delete_plan(&mut self, id: PlanID) {
        self.plans.retain(|p| p.id != id);
        if self.selected_plan == Some(id) {
            self.selected_plan = None;
        }
        self.persist_plans();
    }

    pub fn move_exercise(&mut self, plan_id: PlanID, id: ExerciseID, direction: MoveDirection) {
        if let Some(plan) = self.plans.iter_mut().find(|p| p.id == plan_id) {
            plan.move_exercise(id, direction);
            self.persist_plans();
        }
    }

    fn persist_plans(&self) {
        log_on_error!(self.repository.write_plans(&self.plans));
    }

    fn persist_history(&self) {
        log_on_error!(self.repository.write_history(&self.history));
    }

    fn persist_saved_workout(&self) {
        log_on_error!(
            self.repository
                .write_saved_workout(self.saved_workout.as_ref())
        );
    }

    #[must_use]
    pub fn current_view(&self) -> View {
        self.current_view
    }

    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    #[must_use]
    pub fn plan_for_day(&self, day_of_week: Weekday) -> Option<&Plan> {
        self.plans.iter().find(|p| p.day_of_week == day_of_week)
    }

    #[must_use]
    pub fn todays_plan(&self) -> Option<&Plan> {
        self.plan_for_day(Local::now().weekday())
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    #[must_use]
    pub fn session(&self) -> Option<&ExecutionSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn saved_workout(&self) -> Option<&SavedWorkout> {
        self.saved_workout.as_ref()
    }

    #[must_use]
    pub fn selected_plan(&self) -> Option<PlanID> {
        self.selected_plan
    }

    #[must_use]
    pub fn plan_sessions(&self, plan_id: PlanID) -> Vec<Session> {
        sessions(&self.history, plan_id, self.saved_workout.as_ref())
    }

    pub fn set_reps(&mut self, reps: Reps) {
        self.dispatch(Command::SetReps(reps));
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.dispatch(Command::SetWeight(weight));
    }
}
