//! Turns one user-written step into executable step records.
//!
//! A step yields its exercise record, followed by a rest record when an
//! interval step asks for rest.

use crate::parse::{parse_duration, parse_reps, parse_weight, RepsTarget};
use crate::resolver::Resolver;
use crate::{
    CanonicalExercise, EncodingMode, EndCondition, ExerciseFields, StepRecord, StepSpec, StepType,
};

/// Builds step records, resolving exercise names as it goes
#[derive(Clone, Copy, Debug)]
pub struct StepBuilder<'a> {
    resolver: Resolver<'a>,
}

impl<'a> StepBuilder<'a> {
    pub fn new(resolver: Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Build the records for one step, numbering them from `order`
    pub fn build(&self, spec: &StepSpec, order: u32, mode: EncodingMode) -> Vec<StepRecord> {
        let step_type = StepType::from_phase(spec.phase.as_deref());
        let raw_name = spec.exercise_name();
        let pair = self.canonical_or_guess(raw_name);
        let end_condition = end_condition_for(spec, step_type);
        let weight = spec.weight.as_ref().and_then(parse_weight);

        let exercise = match mode {
            EncodingMode::Specific => ExerciseFields {
                category: Some(pair.category),
                exercise_name: Some(pair.exercise),
                description: spec.note.clone(),
                weight,
            },
            EncodingMode::Robust => ExerciseFields {
                category: None,
                exercise_name: None,
                description: Some(robust_description(
                    raw_name,
                    &pair.exercise,
                    spec.note.as_deref(),
                    weight,
                )),
                weight: None,
            },
        };

        tracing::debug!(
            "Step {}: {:?} {:?} ends on {:?}",
            order,
            raw_name,
            step_type,
            end_condition
        );

        let mut records = vec![StepRecord {
            step_order: order,
            step_type,
            end_condition,
            exercise: Some(exercise),
        }];

        if step_type == StepType::Interval {
            if let Some(seconds) = spec.rest.as_ref().and_then(parse_duration) {
                records.push(StepRecord::rest(order + 1, seconds));
            }
        }

        records
    }

    /// Resolved pair, or the name itself turned into a vendor-style key
    fn canonical_or_guess(&self, raw_name: &str) -> CanonicalExercise {
        self.resolver.resolve(raw_name).unwrap_or_else(|| {
            let key = raw_name.to_uppercase().replace(' ', "_");
            tracing::warn!("Unknown exercise {:?}, sending it as {}", raw_name, key);
            CanonicalExercise::from_key(key)
        })
    }
}

/// Pick the end condition for an exercise step
///
/// Reps only count on interval steps; warmup and cooldown steps fall
/// through to the time field.
fn end_condition_for(spec: &StepSpec, step_type: StepType) -> EndCondition {
    let counts_reps = !matches!(step_type, StepType::Warmup | StepType::Cooldown);

    if let Some(reps) = spec.reps_value().filter(|_| counts_reps) {
        return match parse_reps(reps) {
            RepsTarget::Count(n) => EndCondition::Reps(n),
            RepsTarget::Amrap | RepsTarget::Unparseable => EndCondition::LapButton,
        };
    }

    spec.time_value()
        .and_then(parse_duration)
        .map(EndCondition::Time)
        .unwrap_or(EndCondition::LapButton)
}

/// Free-text stand-in for the identifier and weight fields
fn robust_description(
    raw_name: &str,
    exercise_key: &str,
    note: Option<&str>,
    weight: Option<f64>,
) -> String {
    let note = note.unwrap_or("");
    let mut description = format!("Exercise: {} ({}). {}", raw_name, exercise_key, note)
        .trim()
        .to_string();
    if let Some(kg) = weight {
        description.push_str(&format!(" Target: {}kg", kg));
    }
    description
}
