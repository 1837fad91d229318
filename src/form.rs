//src/form.rs
//! Draft state for the "add workout" form and its normalization into a
//! [`WorkoutCandidate`].

use crate::gateway::RequestId;
use crate::model::{WeightUnit, WorkoutCandidate};
use std::fmt;
use strum_macros::EnumIter;
use thiserror::Error;

/// Selector value that switches the form to a user-typed exercise name.
pub const CUSTOM_EXERCISE: &str = "Custom";

pub const REPS_RANGE: (u32, u32) = (1, 25);
pub const RPE_RANGE: (u32, u32) = (1, 10);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum FormField {
    Exercise,
    CustomExercise,
    Weight,
    WeightUnit,
    Reps,
    Rpe,
    Tempo,
}

impl FormField {
    /// The field's name on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            FormField::Exercise => "exercise",
            FormField::CustomExercise => "customExercise",
            FormField::Weight => "weight",
            FormField::WeightUnit => "weight_unit",
            FormField::Reps => "reps",
            FormField::Rpe => "rpe",
            FormField::Tempo => "tempo",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for FormField {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "exercise" => Ok(FormField::Exercise),
            "customExercise" => Ok(FormField::CustomExercise),
            "weight" => Ok(FormField::Weight),
            "weight_unit" => Ok(FormField::WeightUnit),
            "reps" => Ok(FormField::Reps),
            "rpe" => Ok(FormField::Rpe),
            "tempo" => Ok(FormField::Tempo),
            other => Err(format!("Unknown form field: {other}")),
        }
    }
}

/// What the exercise selector currently holds.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ExerciseSelection {
    #[default]
    Unselected,
    Catalog(String),
    Custom,
}

impl ExerciseSelection {
    pub fn from_input(value: &str) -> Self {
        match value {
            "" => ExerciseSelection::Unselected,
            CUSTOM_EXERCISE => ExerciseSelection::Custom,
            name => ExerciseSelection::Catalog(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExerciseSelection::Unselected => "",
            ExerciseSelection::Catalog(name) => name,
            ExerciseSelection::Custom => CUSTOM_EXERCISE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormDraft {
    pub exercise: ExerciseSelection,
    pub custom_exercise: String,
    pub weight: String,
    pub weight_unit: String,
    pub reps: String,
    pub rpe: String,
    pub tempo: String,
}

impl Default for FormDraft {
    fn default() -> Self {
        FormDraft {
            exercise: ExerciseSelection::Unselected,
            custom_exercise: String::new(),
            weight: String::new(),
            weight_unit: WeightUnit::default().to_string(),
            reps: String::new(),
            rpe: String::new(),
            tempo: String::new(),
        }
    }
}

impl FormDraft {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Exercise => self.exercise.as_str(),
            FormField::CustomExercise => &self.custom_exercise,
            FormField::Weight => &self.weight,
            FormField::WeightUnit => &self.weight_unit,
            FormField::Reps => &self.reps,
            FormField::Rpe => &self.rpe,
            FormField::Tempo => &self.tempo,
        }
    }

    /// Replaces exactly one field. No validation happens here.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Exercise => self.exercise = ExerciseSelection::from_input(&value),
            FormField::CustomExercise => self.custom_exercise = value,
            FormField::Weight => self.weight = value,
            FormField::WeightUnit => self.weight_unit = value,
            FormField::Reps => self.reps = value,
            FormField::Rpe => self.rpe = value,
            FormField::Tempo => self.tempo = value,
        }
    }

    pub fn selecting_custom_exercise(&self) -> bool {
        self.exercise == ExerciseSelection::Custom
    }

    /// The name that will be submitted, if any. A leftover custom name is
    /// ignored unless the selector is on `Custom`.
    pub fn effective_exercise(&self) -> Option<&str> {
        let name = match &self.exercise {
            ExerciseSelection::Unselected => return None,
            ExerciseSelection::Catalog(name) => name.as_str(),
            ExerciseSelection::Custom => self.custom_exercise.as_str(),
        };
        let name = name.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn is_empty(&self) -> bool {
        *self == FormDraft::default()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Select an exercise.")]
    MissingExercise,
    #[error("Enter a name for the custom exercise.")]
    MissingCustomExercise,
    #[error("'{value}' is not a valid number for {field}.")]
    InvalidNumber { field: FormField, value: String },
    #[error("Weight cannot be negative (got {0}).")]
    NegativeWeight(f64),
    #[error("{field} must be between {min} and {max} (got {value}).")]
    OutOfRange {
        field: FormField,
        value: String,
        min: u32,
        max: u32,
    },
    #[error("Unknown weight unit '{0}', expected lbs or kgs.")]
    InvalidWeightUnit(String),
    #[error("Enter a tempo, e.g. 3-1-1.")]
    MissingTempo,
}

fn parse_float(field: FormField, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn check_range(field: FormField, value: f64, (min, max): (u32, u32)) -> Result<(), ValidationError> {
    if value < f64::from(min) || value > f64::from(max) {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// Turns a draft into the record that gets posted.
///
/// # Errors
/// Returns the first [`ValidationError`] found, checking fields in form order.
pub fn normalize(draft: &FormDraft) -> Result<WorkoutCandidate, ValidationError> {
    let exercise = match draft.effective_exercise() {
        Some(name) => name.to_string(),
        None if draft.selecting_custom_exercise() => {
            return Err(ValidationError::MissingCustomExercise)
        }
        None => return Err(ValidationError::MissingExercise),
    };
    let custom_exercise = draft.selecting_custom_exercise().then(|| exercise.clone());

    let weight = parse_float(FormField::Weight, &draft.weight)?;
    if weight < 0.0 {
        return Err(ValidationError::NegativeWeight(weight));
    }
    let weight_unit = WeightUnit::try_from(draft.weight_unit.as_str())
        .map_err(|_| ValidationError::InvalidWeightUnit(draft.weight_unit.clone()))?;

    let reps = draft
        .reps
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: FormField::Reps,
            value: draft.reps.clone(),
        })?;
    check_range(FormField::Reps, f64::from(reps), REPS_RANGE)?;

    let rpe = parse_float(FormField::Rpe, &draft.rpe)?;
    check_range(FormField::Rpe, rpe, RPE_RANGE)?;

    let tempo = draft.tempo.trim();
    if tempo.is_empty() {
        return Err(ValidationError::MissingTempo);
    }

    Ok(WorkoutCandidate {
        exercise,
        custom_exercise,
        weight,
        weight_unit,
        reps,
        rpe,
        tempo: tempo.to_string(),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Editing,
    Submitting,
}

/// The form: a draft plus the create request currently in flight for it.
#[derive(Clone, Debug, Default)]
pub struct Form {
    draft: FormDraft,
    pending_submit: Option<RequestId>,
}

impl Form {
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        if self.pending_submit.is_some() {
            FormPhase::Submitting
        } else if self.draft.is_empty() {
            FormPhase::Empty
        } else {
            FormPhase::Editing
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn reset(&mut self) {
        self.draft = FormDraft::default();
    }

    pub(crate) fn begin_submit(&mut self, id: RequestId) {
        self.pending_submit = Some(id);
    }

    /// Settles a create request. Returns `false` when a newer submission has
    /// been issued since, in which case the draft is left alone.
    pub(crate) fn finish_submit(&mut self, id: RequestId, succeeded: bool) -> bool {
        if self.pending_submit != Some(id) {
            return false;
        }
        self.pending_submit = None;
        if succeeded {
            self.reset();
        }
        true
    }
}
