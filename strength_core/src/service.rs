//! Boundary to the remote workout service.
//!
//! The library never talks HTTP itself; binaries provide an implementation.

use crate::{Result, WorkoutDocument};
use serde::Deserialize;

/// Operations the importer needs from the workout service
pub trait WorkoutService {
    /// Create a workout from a full document
    fn create_workout(&self, document: &WorkoutDocument) -> Result<CreatedWorkout>;

    /// List the workouts stored on the account
    fn list_workouts(&self) -> Result<Vec<WorkoutSummary>>;

    /// Delete one workout by id
    fn delete_workout(&self, workout_id: i64) -> Result<()>;
}

/// Response to a successful create
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWorkout {
    pub workout_id: Option<i64>,
}

/// One entry of the workout listing
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub workout_id: i64,
    #[serde(default)]
    pub workout_name: String,
}
