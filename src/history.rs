//src/history.rs
use crate::form::CUSTOM_EXERCISE;
use crate::format::{format_date, format_weight};
use crate::gateway::RequestId;
use crate::model::{ExerciseName, WorkoutId, WorkoutRecord};

/// Result of offering a response to a view model.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Applied {
    Yes,
    /// A newer request of the same kind was issued after this one.
    Stale,
}

/// The workout list as last fetched from the server.
#[derive(Debug, Default, Clone)]
pub struct HistoryView {
    records: Vec<WorkoutRecord>,
    latest_refresh: Option<RequestId>,
    loaded: bool,
}

impl HistoryView {
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True once at least one fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_refreshing(&self) -> bool {
        self.latest_refresh.is_some()
    }

    pub fn get(&self, id: &WorkoutId) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub(crate) fn begin_refresh(&mut self, id: RequestId) {
        self.latest_refresh = Some(id);
    }

    /// Checks whether `id` is the newest refresh and settles it if so.
    pub(crate) fn settle_refresh(&mut self, id: RequestId) -> Applied {
        if self.latest_refresh != Some(id) {
            return Applied::Stale;
        }
        self.latest_refresh = None;
        Applied::Yes
    }

    /// Replaces the whole list. Order is kept as the server sent it.
    pub(crate) fn replace(&mut self, records: Vec<WorkoutRecord>) {
        self.records = records;
        self.loaded = true;
    }

    pub fn cards(&self) -> Vec<WorkoutCard> {
        self.records.iter().map(WorkoutCard::from).collect()
    }
}

/// Read-only summary of one record, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCard {
    pub id: WorkoutId,
    pub title: String,
    pub weight: String,
    pub reps: String,
    pub rpe: String,
    pub tempo: String,
    pub date: String,
}

impl From<&WorkoutRecord> for WorkoutCard {
    fn from(record: &WorkoutRecord) -> Self {
        WorkoutCard {
            id: record.id.clone(),
            title: record.exercise.clone(),
            weight: format!("Weight: {}", format_weight(record.weight, record.weight_unit)),
            reps: format!("Reps: {}", record.reps),
            rpe: format!("RPE: {}", record.rpe),
            tempo: format!("Tempo: {}", record.tempo),
            date: format_date(&record.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    NotLoaded,
    Loaded(Vec<ExerciseName>),
    /// The fetch failed; only custom names can be entered.
    Unavailable,
}

/// Exercise names fetched once per session.
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    state: CatalogState,
    latest_request: Option<RequestId>,
}

impl ExerciseCatalog {
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn names(&self) -> &[ExerciseName] {
        match &self.state {
            CatalogState::Loaded(names) => names,
            _ => &[],
        }
    }

    /// Values the exercise selector cycles through, not counting the empty
    /// "no selection" slot.
    pub fn options(&self) -> Vec<&str> {
        self.names()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(CUSTOM_EXERCISE))
            .collect()
    }

    pub(crate) fn begin_load(&mut self, id: RequestId) {
        self.latest_request = Some(id);
    }

    pub(crate) fn settle(&mut self, id: RequestId, names: Option<Vec<ExerciseName>>) -> Applied {
        if self.latest_request != Some(id) {
            return Applied::Stale;
        }
        self.latest_request = None;
        self.state = match names {
            Some(names) => CatalogState::Loaded(names),
            None => CatalogState::Unavailable,
        };
        Applied::Yes
    }
}
