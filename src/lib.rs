use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, error, info, warn};

// --- Declare modules ---
pub mod config;
pub mod form;
pub mod format;
pub mod gateway;
pub mod history;
pub mod logging;
pub mod model;
pub mod notification;

// --- Expose public types ---
pub use config::{Config, ConfigError, StandardColor};
pub use form::{
    normalize, ExerciseSelection, Form, FormDraft, FormField, FormPhase, ValidationError,
    CUSTOM_EXERCISE,
};
pub use gateway::{execute, FetchError, HttpGateway, Outcome, Request, RequestId, WorkoutGateway};
pub use history::{Applied, CatalogState, ExerciseCatalog, HistoryView, WorkoutCard};
pub use model::{ExerciseName, WeightUnit, WorkoutCandidate, WorkoutId, WorkoutRecord};
pub use notification::{Notification, NotificationChannel, Severity, AUTO_HIDE_AFTER};

pub const MSG_WORKOUT_ADDED: &str = "Workout added successfully!";
pub const MSG_WORKOUT_ADD_FAILED: &str = "Error adding workout";
pub const MSG_WORKOUT_DELETED: &str = "Workout deleted successfully!";
pub const MSG_WORKOUT_DELETE_FAILED: &str = "Error deleting workout";
pub const MSG_WORKOUTS_FETCH_FAILED: &str = "Error fetching workouts";
pub const MSG_EXERCISES_FETCH_FAILED: &str = "Error fetching exercises";

/// Everything the client knows during one run: the form, the fetched history
/// and catalog, and the notification slot.
///
/// The session never talks to the network itself. User actions return the
/// [`Request`]s to perform, and finished calls come back through
/// [`Session::apply`], which may ask for follow-up requests. A driver decides
/// how to run them (see [`Session::drive`] for the sequential one).
#[derive(Debug, Default)]
pub struct Session {
    pub form: Form,
    pub history: HistoryView,
    pub catalog: ExerciseCatalog,
    pub notifications: NotificationChannel,
    next_request: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    /// Initial load: history and catalog.
    pub fn start(&mut self) -> Vec<Request> {
        let catalog_request = self.load_catalog();
        vec![self.refresh(), catalog_request]
    }

    pub fn refresh(&mut self) -> Request {
        let id = self.next_id();
        self.history.begin_refresh(id);
        Request::ListWorkouts { id }
    }

    pub fn load_catalog(&mut self) -> Request {
        let id = self.next_id();
        self.catalog.begin_load(id);
        Request::ListExercises { id }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    /// Validates the draft and, if it is well formed, returns the create
    /// request. A rejected draft produces an error notification instead.
    pub fn submit(&mut self, now: Instant) -> Option<Request> {
        match normalize(self.form.draft()) {
            Ok(candidate) => {
                let id = self.next_id();
                self.form.begin_submit(id);
                info!("Submitting workout {} for '{}'", id, candidate.exercise);
                Some(Request::CreateWorkout { id, candidate })
            }
            Err(e) => {
                warn!("Rejected workout draft: {}", e);
                self.notifications.notify(e.to_string(), Severity::Error, now);
                None
            }
        }
    }

    pub fn delete(&mut self, workout_id: WorkoutId) -> Request {
        let id = self.next_id();
        info!("Deleting workout {} ({})", workout_id, id);
        Request::DeleteWorkout { id, workout_id }
    }

    /// Applies a finished call and returns the requests it triggers.
    pub fn apply(&mut self, outcome: Outcome, now: Instant) -> Vec<Request> {
        match outcome {
            Outcome::WorkoutsListed { id, result } => {
                if self.history.settle_refresh(id) == Applied::Stale {
                    debug!("Discarding stale workout list {}", id);
                    return Vec::new();
                }
                match result {
                    Ok(records) => self.history.replace(records),
                    Err(e) => {
                        error!("Error fetching workouts: {}", e);
                        self.notifications
                            .notify(MSG_WORKOUTS_FETCH_FAILED, Severity::Error, now);
                    }
                }
                Vec::new()
            }
            Outcome::ExercisesListed { id, result } => {
                let names = match result {
                    Ok(names) => Some(names),
                    Err(e) => {
                        error!("Error fetching exercises: {}", e);
                        None
                    }
                };
                let failed = names.is_none();
                if self.catalog.settle(id, names) == Applied::Stale {
                    debug!("Discarding stale exercise catalog {}", id);
                } else if failed {
                    self.notifications
                        .notify(MSG_EXERCISES_FETCH_FAILED, Severity::Error, now);
                }
                Vec::new()
            }
            Outcome::WorkoutCreated { id, result } => {
                let succeeded = result.is_ok();
                if !self.form.finish_submit(id, succeeded) {
                    debug!("Create {} finished after a newer submit, keeping draft", id);
                }
                match result {
                    Ok(()) => {
                        let refresh = self.refresh();
                        self.notifications
                            .notify(MSG_WORKOUT_ADDED, Severity::Success, now);
                        vec![refresh]
                    }
                    Err(e) => {
                        error!("Error adding workout: {}", e);
                        self.notifications
                            .notify(MSG_WORKOUT_ADD_FAILED, Severity::Error, now);
                        Vec::new()
                    }
                }
            }
            Outcome::WorkoutDeleted {
                id,
                workout_id,
                result,
            } => match result {
                Ok(()) => {
                    info!("Deleted workout {} ({})", workout_id, id);
                    let refresh = self.refresh();
                    self.notifications
                        .notify(MSG_WORKOUT_DELETED, Severity::Success, now);
                    vec![refresh]
                }
                Err(e) => {
                    error!("Error deleting workout {}: {}", workout_id, e);
                    self.notifications
                        .notify(MSG_WORKOUT_DELETE_FAILED, Severity::Error, now);
                    Vec::new()
                }
            },
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.notifications.tick(now);
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    /// Runs `request` and every follow-up it triggers, one at a time.
    pub async fn drive(&mut self, gateway: &dyn WorkoutGateway, request: Request) {
        let mut queue = VecDeque::from([request]);
        while let Some(next) = queue.pop_front() {
            let outcome = execute(gateway, next).await;
            queue.extend(self.apply(outcome, Instant::now()));
        }
    }
}
