//src/app/state.rs
use super::actions::Dispatcher;
use ratatui::widgets::ListState;
use workout_logger_lib::{FormField, Session, StandardColor, WorkoutId};

/// Everything that can hold keyboard focus, in Tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusField {
    Exercise,
    CustomExercise,
    Weight,
    WeightUnit,
    Reps,
    Rpe,
    Tempo,
    Submit,
    History,
}

const FOCUS_ORDER: [FocusField; 9] = [
    FocusField::Exercise,
    FocusField::CustomExercise,
    FocusField::Weight,
    FocusField::WeightUnit,
    FocusField::Reps,
    FocusField::Rpe,
    FocusField::Tempo,
    FocusField::Submit,
    FocusField::History,
];

impl FocusField {
    /// The draft field behind this widget, if any.
    pub fn form_field(self) -> Option<FormField> {
        match self {
            FocusField::Exercise => Some(FormField::Exercise),
            FocusField::CustomExercise => Some(FormField::CustomExercise),
            FocusField::Weight => Some(FormField::Weight),
            FocusField::WeightUnit => Some(FormField::WeightUnit),
            FocusField::Reps => Some(FormField::Reps),
            FocusField::Rpe => Some(FormField::Rpe),
            FocusField::Tempo => Some(FormField::Tempo),
            FocusField::Submit | FocusField::History => None,
        }
    }

    /// Free-text fields take printable keys; the others are selectors.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            FocusField::CustomExercise | FocusField::Weight | FocusField::Tempo
        )
    }

    pub fn is_selector(self) -> bool {
        matches!(
            self,
            FocusField::Exercise | FocusField::WeightUnit | FocusField::Reps | FocusField::Rpe
        )
    }

    /// Next focus stop. The custom name field is only a stop while "Custom"
    /// is the selected exercise.
    pub fn next(self, custom_visible: bool) -> Self {
        self.step(custom_visible, 1)
    }

    pub fn previous(self, custom_visible: bool) -> Self {
        self.step(custom_visible, FOCUS_ORDER.len() - 1)
    }

    fn step(self, custom_visible: bool, by: usize) -> Self {
        let len = FOCUS_ORDER.len();
        let mut i = FOCUS_ORDER.iter().position(|f| *f == self).unwrap_or(0);
        loop {
            i = (i + by) % len;
            let candidate = FOCUS_ORDER[i];
            if candidate != FocusField::CustomExercise || custom_visible {
                return candidate;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActiveModal {
    None,
    Help,
    ConfirmDeleteWorkout {
        workout_id: WorkoutId,
        exercise_name: String,
    },
}

// Holds the application state
pub struct App {
    pub session: Session,
    pub dispatcher: Dispatcher,
    pub api_url: String,
    pub accent: StandardColor,
    pub should_quit: bool,
    pub active_modal: ActiveModal,
    pub focus: FocusField,
    pub history_list_state: ListState,
}

impl App {
    /// Builds the app and kicks off the initial history and catalog loads.
    pub fn new(dispatcher: Dispatcher, api_url: String, accent: StandardColor) -> Self {
        let mut app = App {
            session: Session::new(),
            dispatcher,
            api_url,
            accent,
            should_quit: false,
            active_modal: ActiveModal::None,
            focus: FocusField::Exercise,
            history_list_state: ListState::default(),
        };
        for request in app.session.start() {
            app.dispatcher.dispatch(request);
        }
        app
    }

    pub fn custom_exercise_visible(&self) -> bool {
        self.session.form.draft().selecting_custom_exercise()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.custom_exercise_visible());
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous(self.custom_exercise_visible());
    }

    pub fn selected_workout_id(&self) -> Option<WorkoutId> {
        self.history_list_state
            .selected()
            .and_then(|i| self.session.history.records().get(i))
            .map(|record| record.id.clone())
    }
}
