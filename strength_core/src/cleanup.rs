//! Bulk deletion of previously imported workouts, selected by name prefix.

use crate::service::{WorkoutService, WorkoutSummary};
use crate::{Error, Result};

/// Workouts whose name starts with any of the prefixes
pub fn select_for_deletion<'w>(
    workouts: &'w [WorkoutSummary],
    prefixes: &[String],
) -> Vec<&'w WorkoutSummary> {
    workouts
        .iter()
        .filter(|w| prefixes.iter().any(|p| w.workout_name.starts_with(p.as_str())))
        .collect()
}

/// What a cleanup run did
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// Workouts matching a prefix
    pub selected: Vec<WorkoutSummary>,
    pub deleted: Vec<WorkoutSummary>,
    pub failed: Vec<(WorkoutSummary, Error)>,
}

/// Delete every workout on the account whose name matches a prefix
///
/// A listing failure aborts; individual delete failures are collected and
/// the remaining workouts are still processed. With `dry_run` nothing is
/// deleted and only `selected` is filled.
pub fn delete_matching<S: WorkoutService + ?Sized>(
    service: &S,
    prefixes: &[String],
    dry_run: bool,
) -> Result<CleanupReport> {
    let workouts = service.list_workouts()?;
    let selected: Vec<WorkoutSummary> = select_for_deletion(&workouts, prefixes)
        .into_iter()
        .cloned()
        .collect();

    tracing::info!(
        "{} of {} workouts match {:?}",
        selected.len(),
        workouts.len(),
        prefixes
    );

    let mut report = CleanupReport {
        selected,
        ..Default::default()
    };
    if dry_run {
        return Ok(report);
    }

    for workout in report.selected.clone() {
        match service.delete_workout(workout.workout_id) {
            Ok(()) => {
                tracing::debug!("Deleted {} ({})", workout.workout_id, workout.workout_name);
                report.deleted.push(workout);
            }
            Err(e) => {
                tracing::warn!("Failed to delete {}: {}", workout.workout_id, e);
                report.failed.push((workout, e));
            }
        }
    }

    Ok(report)
}
