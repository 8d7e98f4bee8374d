//! Submission with a single fallback from specific to robust encoding.
//!
//! ```text
//! Specific --(validation rejection)--> Robust
//!    |                                   |
//!    +--> Created / Failed               +--> Created / Failed
//! ```
//!
//! Only a validation rejection of the specific payload moves to robust mode.
//! Robust mode has no fallback, so a workout is attempted at most twice.

use crate::payload::build_document;
use crate::resolver::Resolver;
use crate::service::WorkoutService;
use crate::{EncodingMode, Error, WorkoutSpec};
use std::fmt;

/// Final state of one workout's submission
#[derive(Debug)]
pub enum Outcome {
    Created {
        workout_id: Option<i64>,
        mode: EncodingMode,
    },
    Failed {
        mode: EncodingMode,
        error: Error,
    },
}

/// Result of submitting one workout
#[derive(Debug)]
pub struct SubmissionReport {
    pub workout_name: String,
    pub attempts: u8,
    pub outcome: Outcome,
}

impl SubmissionReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Created { .. })
    }
}

impl fmt::Display for SubmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = |value: &Option<i64>| {
            value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
        };
        match &self.outcome {
            Outcome::Created {
                workout_id,
                mode: EncodingMode::Specific,
            } => write!(f, "✓ {}: created (id {})", self.workout_name, id(workout_id)),
            Outcome::Created {
                workout_id,
                mode: EncodingMode::Robust,
            } => write!(
                f,
                "✓ {}: created in generic mode (id {})",
                self.workout_name,
                id(workout_id)
            ),
            Outcome::Failed { mode, error } => write!(
                f,
                "✗ {}: failed after {} attempt(s), last in {:?} mode: {}",
                self.workout_name, self.attempts, mode, error
            ),
        }
    }
}

/// Drives the specific → robust submission of workouts
pub struct SubmissionController<'a, S: WorkoutService + ?Sized> {
    service: &'a S,
    resolver: Resolver<'a>,
}

impl<'a, S: WorkoutService + ?Sized> SubmissionController<'a, S> {
    pub fn new(service: &'a S, resolver: Resolver<'a>) -> Self {
        Self { service, resolver }
    }

    /// Submit one workout, falling back to robust mode at most once
    pub fn submit(&self, workout: &WorkoutSpec) -> SubmissionReport {
        let workout_name = workout.display_name().to_string();
        let mut mode = EncodingMode::Specific;
        let mut attempts = 0u8;

        loop {
            attempts += 1;
            let document = build_document(workout, self.resolver, mode);
            tracing::info!("Submitting {:?} ({:?} mode)", workout_name, mode);

            let error = match self.service.create_workout(&document) {
                Ok(created) => {
                    tracing::info!(
                        "Created {:?} with id {:?}",
                        workout_name,
                        created.workout_id
                    );
                    return SubmissionReport {
                        workout_name,
                        attempts,
                        outcome: Outcome::Created {
                            workout_id: created.workout_id,
                            mode,
                        },
                    };
                }
                Err(error) => error,
            };

            match mode.fallback() {
                Some(next) if error.is_validation_rejection() => {
                    tracing::warn!(
                        "{:?} rejected in {:?} mode ({}), retrying in {:?} mode",
                        workout_name,
                        mode,
                        error,
                        next
                    );
                    mode = next;
                }
                _ => {
                    tracing::warn!("Giving up on {:?}: {}", workout_name, error);
                    return SubmissionReport {
                        workout_name,
                        attempts,
                        outcome: Outcome::Failed { mode, error },
                    };
                }
            }
        }
    }

    /// Submit workouts one after another; a failure never stops the batch
    pub fn submit_all(&self, workouts: &[WorkoutSpec]) -> Vec<SubmissionReport> {
        workouts.iter().map(|w| self.submit(w)).collect()
    }
}
