// src/app/actions.rs
use super::navigation_helpers::{clamp_selection, cycle_option};
use super::state::{ActiveModal, App, FocusField};
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};
use workout_logger_lib::form::{REPS_RANGE, RPE_RANGE};
use workout_logger_lib::{execute, FormField, Outcome, Request, WeightUnit, WorkoutGateway};

/// Runs gateway requests on the async runtime and hands their outcomes back
/// to the event loop.
pub struct Dispatcher {
    gateway: Arc<dyn WorkoutGateway>,
    runtime: Handle,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn WorkoutGateway>, runtime: Handle) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Dispatcher {
            gateway,
            runtime,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn dispatch(&self, request: Request) {
        let gateway = Arc::clone(&self.gateway);
        let outcome_tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let outcome = execute(gateway.as_ref(), request).await;
            if outcome_tx.send(outcome).is_err() {
                debug!("Event loop gone, dropping outcome");
            }
        });
    }

    /// Everything that finished since the last call, in completion order.
    pub fn drain(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.outcome_rx.try_recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Outcome channel closed");
                    break;
                }
            }
        }
        outcomes
    }
}

impl App {
    /// Called once per frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        for outcome in self.dispatcher.drain() {
            for follow_up in self.session.apply(outcome, now) {
                self.dispatcher.dispatch(follow_up);
            }
        }
        clamp_selection(&mut self.history_list_state, self.session.history.len());
        self.session.tick(now);
    }

    pub fn submit(&mut self) {
        if let Some(request) = self.session.submit(Instant::now()) {
            self.dispatcher.dispatch(request);
            self.focus = FocusField::Exercise;
        }
    }

    pub fn refresh_history(&mut self) {
        let request = self.session.refresh();
        self.dispatcher.dispatch(request);
    }

    pub fn reset_form(&mut self) {
        self.session.reset_form();
        if self.focus == FocusField::CustomExercise {
            self.focus = FocusField::Exercise;
        }
    }

    pub fn open_delete_confirmation(&mut self) {
        let Some(workout_id) = self.selected_workout_id() else {
            return;
        };
        let exercise_name = self
            .session
            .history
            .get(&workout_id)
            .map(|record| record.exercise.clone())
            .unwrap_or_default();
        self.active_modal = ActiveModal::ConfirmDeleteWorkout {
            workout_id,
            exercise_name,
        };
    }

    pub fn confirm_delete(&mut self) {
        if let ActiveModal::ConfirmDeleteWorkout { workout_id, .. } =
            std::mem::replace(&mut self.active_modal, ActiveModal::None)
        {
            let request = self.session.delete(workout_id);
            self.dispatcher.dispatch(request);
        }
    }

    /// Values a selector cycles through. The leading empty entry is the
    /// "nothing chosen" state.
    pub fn selector_options(&self, field: FormField) -> Vec<String> {
        match field {
            FormField::Exercise => std::iter::once(String::new())
                .chain(self.session.catalog.options().into_iter().map(str::to_string))
                .collect(),
            FormField::WeightUnit => WeightUnit::iter().map(|unit| unit.to_string()).collect(),
            FormField::Reps => numbered_options(REPS_RANGE),
            FormField::Rpe => numbered_options(RPE_RANGE),
            _ => Vec::new(),
        }
    }

    pub fn cycle_selector(&mut self, forward: bool) {
        let Some(field) = self.focus.form_field().filter(|_| self.focus.is_selector()) else {
            return;
        };
        let options = self.selector_options(field);
        let options: Vec<&str> = options.iter().map(String::as_str).collect();
        let current = self.session.form.draft().get(field).to_string();
        if let Some(next) = cycle_option(&options, &current, forward) {
            let next = next.to_string();
            self.session.set_field(field, next);
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focus.form_field().filter(|_| self.focus.is_text_input()) {
            let mut value = self.session.form.draft().get(field).to_string();
            value.push(c);
            self.session.set_field(field, value);
        }
    }

    pub fn pop_char(&mut self) {
        let Some(field) = self.focus.form_field() else {
            return;
        };
        if self.focus.is_text_input() {
            let mut value = self.session.form.draft().get(field).to_string();
            value.pop();
            self.session.set_field(field, value);
        } else if field != FormField::WeightUnit {
            // Backspace clears a selector back to "nothing chosen"
            self.session.set_field(field, String::new());
        }
    }
}

fn numbered_options((min, max): (u32, u32)) -> Vec<String> {
    std::iter::once(String::new())
        .chain((min..=max).map(|n| n.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use workout_logger_lib::{
        FetchError, StandardColor, WorkoutCandidate, WorkoutId, WorkoutRecord, CUSTOM_EXERCISE,
    };

    struct CatalogOnly;

    #[async_trait]
    impl WorkoutGateway for CatalogOnly {
        async fn list_exercises(&self) -> Result<Vec<String>, FetchError> {
            Ok(vec!["Squat".to_string(), "Bench Press".to_string()])
        }
        async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, FetchError> {
            Ok(Vec::new())
        }
        async fn create_workout(&self, _candidate: &WorkoutCandidate) -> Result<(), FetchError> {
            Ok(())
        }
        async fn delete_workout(&self, _id: &WorkoutId) -> Result<(), FetchError> {
            Ok(())
        }
    }

    fn loaded_app(runtime: &tokio::runtime::Runtime) -> App {
        let dispatcher = Dispatcher::new(Arc::new(CatalogOnly), runtime.handle().clone());
        let mut app = App::new(dispatcher, "http://test".to_string(), StandardColor::Yellow);
        for _ in 0..200 {
            app.update();
            if app.session.history.is_loaded() && !app.session.catalog.names().is_empty() {
                return app;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("initial load never finished");
    }

    #[test]
    fn test_numbered_options() {
        let reps = numbered_options(REPS_RANGE);
        assert_eq!(reps.len(), 26);
        assert_eq!(reps[0], "");
        assert_eq!(reps[1], "1");
        assert_eq!(reps[25], "25");
        assert_eq!(numbered_options(RPE_RANGE).last().map(String::as_str), Some("10"));
    }

    #[test]
    fn test_exercise_selector_walks_catalog_then_custom() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded_app(&runtime);
        app.focus = FocusField::Exercise;

        app.cycle_selector(true);
        assert_eq!(app.session.form.draft().get(FormField::Exercise), "Squat");
        app.cycle_selector(true);
        app.cycle_selector(true);
        assert_eq!(app.session.form.draft().get(FormField::Exercise), CUSTOM_EXERCISE);
        assert!(app.custom_exercise_visible());

        app.focus_next();
        assert_eq!(app.focus, FocusField::CustomExercise);
        for c in "Sled Push".chars() {
            app.push_char(c);
        }
        app.pop_char();
        assert_eq!(app.session.form.draft().get(FormField::CustomExercise), "Sled Pus");
    }

    #[test]
    fn test_text_keys_ignored_on_selectors() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded_app(&runtime);
        app.focus = FocusField::Reps;

        app.push_char('7');
        assert_eq!(app.session.form.draft().get(FormField::Reps), "");
        app.cycle_selector(false);
        assert_eq!(app.session.form.draft().get(FormField::Reps), "25");
        app.pop_char();
        assert_eq!(app.session.form.draft().get(FormField::Reps), "");
    }

    #[test]
    fn test_unit_selector_offers_every_unit() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded_app(&runtime);
        assert_eq!(app.selector_options(FormField::WeightUnit), ["lbs", "kgs"]);

        app.focus = FocusField::WeightUnit;
        app.cycle_selector(true);
        assert_eq!(app.session.form.draft().get(FormField::WeightUnit), "kgs");
        app.cycle_selector(true);
        assert_eq!(app.session.form.draft().get(FormField::WeightUnit), "lbs");
    }

    #[test]
    fn test_delete_needs_a_selection() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = loaded_app(&runtime);

        app.open_delete_confirmation();
        assert_eq!(app.active_modal, ActiveModal::None);
    }
}
